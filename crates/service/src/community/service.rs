use std::sync::Arc;
use tracing::{info, instrument};

use models::community::{Model, NewCommunity};

use crate::community::domain::{ListCommunities, ReplaceCommunity};
use crate::community::repository::CommunityRepository;
use crate::errors::ServiceError;

/// Application service encapsulating the community rules:
/// not-found signalling, body/path id consistency, full-replace updates.
pub struct CommunityService<R: CommunityRepository> {
    repo: Arc<R>,
}

impl<R: CommunityRepository> CommunityService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self), fields(sort = query.sort.as_str(), ascending = query.ascending))]
    pub async fn list(&self, query: &ListCommunities) -> Result<Vec<Model>, ServiceError> {
        self.repo.list(query).await
    }

    pub async fn get(&self, id: i32) -> Result<Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("community"))
    }

    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create(&self, new: NewCommunity) -> Result<Model, ServiceError> {
        let created = self.repo.create(new).await?;
        info!(id = created.id, "created community");
        Ok(created)
    }

    /// Existence is checked by id only; the stored row is not read or merged.
    #[instrument(skip(self, replacement))]
    pub async fn replace(&self, id: i32, replacement: ReplaceCommunity) -> Result<Model, ServiceError> {
        let model = replacement.into_model(id)?;
        if !self.repo.exists(id).await? {
            return Err(ServiceError::not_found("community"));
        }
        let updated = self.repo.replace(model).await?;
        info!(id, "replaced community");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("community"));
        }
        info!(id, "deleted community");
        Ok(())
    }
}
