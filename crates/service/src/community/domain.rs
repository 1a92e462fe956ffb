use std::str::FromStr;

use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Key a community listing is ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortTerm {
    #[default]
    Id,
    CreatedAt,
    PostsCount,
    SubscribersCount,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort term '{0}'")]
pub struct UnknownSortTerm(pub String);

impl FromStr for SortTerm {
    type Err = UnknownSortTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "createdat" => Ok(Self::CreatedAt),
            "postscount" => Ok(Self::PostsCount),
            "subscriberscount" => Ok(Self::SubscribersCount),
            _ => Err(UnknownSortTerm(s.to_string())),
        }
    }
}

impl SortTerm {
    /// Blank or absent input means `Id`; unrecognized input also falls back to `Id`.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::Id,
            Some(s) => s.parse().unwrap_or_else(|e: UnknownSortTerm| {
                debug!(error = %e, "falling back to id ordering");
                Self::Id
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreatedAt => "createdat",
            Self::PostsCount => "postscount",
            Self::SubscribersCount => "subscriberscount",
        }
    }
}

/// A listing request; pagination is validated when the query is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCommunities {
    pub pagination: Pagination,
    pub sort: SortTerm,
    pub ascending: bool,
    pub search_key: Option<String>,
}

impl Default for ListCommunities {
    fn default() -> Self {
        Self { pagination: Pagination::default(), sort: SortTerm::Id, ascending: true, search_key: None }
    }
}

impl ListCommunities {
    pub fn new(pagination: Pagination, sort: SortTerm, ascending: bool, search_key: Option<String>) -> Self {
        Self { pagination, sort, ascending, search_key }
    }

    /// Search key to filter on; whitespace-only keys disable filtering.
    pub fn search_key(&self) -> Option<&str> {
        self.search_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

/// Full representation sent to replace a stored community.
///
/// Absent `name`/`description` become empty strings; every column is overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceCommunity {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
}

impl ReplaceCommunity {
    /// Bind the representation to the row at `id`. A body id naming another row is rejected.
    pub fn into_model(self, id: i32) -> Result<models::community::Model, ServiceError> {
        if let Some(body_id) = self.id {
            if body_id != id {
                return Err(ServiceError::Validation(format!("body id {body_id} does not match path id {id}")));
            }
        }
        Ok(models::community::Model {
            id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        })
    }
}
