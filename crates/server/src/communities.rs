use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use models::community::{Model as Community, NewCommunity};
use service::community::domain::{ListCommunities, ReplaceCommunity, SortTerm};
use service::pagination::Pagination;

use crate::{errors::JsonApiError, state::ServerState};

/// Listing query string. Names follow the public API (`isAssending` included);
/// `isAscending` is accepted as an alias.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number, default 1
    pub page_number: Option<i64>,
    /// Rows per page (1..=100), default 20
    pub page_size: Option<i64>,
    /// id | createdat | postscount | subscriberscount; anything else sorts by id
    pub sort_term: Option<String>,
    /// Ascending order, default true
    #[serde(alias = "isAscending")]
    pub is_assending: Option<bool>,
    /// Substring matched against name or description
    pub search_key: Option<String>,
}

impl From<ListQuery> for ListCommunities {
    fn from(q: ListQuery) -> Self {
        ListCommunities::new(
            Pagination::from_params(q.page_number, q.page_size),
            SortTerm::resolve(q.sort_term.as_deref()),
            q.is_assending.unwrap_or(true),
            q.search_key,
        )
    }
}

#[utoipa::path(
    get, path = "/communities", tag = "community",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of communities", body = [crate::openapi::CommunityDoc]),
        (status = 400, description = "Invalid paging parameters")
    )
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<Community>>, JsonApiError> {
    let query = ListCommunities::from(q);
    let rows = state.communities.list(&query).await?;
    info!(count = rows.len(), sort = query.sort.as_str(), "list communities");
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/communities/{id}", tag = "community",
    params(("id" = i32, Path, description = "Community ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CommunityDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Community>, JsonApiError> {
    Ok(Json(state.communities.get(id).await?))
}

/// Responds with an empty 200; the new id is only logged.
#[utoipa::path(
    post, path = "/communities", tag = "community",
    request_body = crate::openapi::CreateCommunityDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<NewCommunity>) -> Result<StatusCode, JsonApiError> {
    state.communities.create(input).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    put, path = "/communities/{id}", tag = "community",
    params(("id" = i32, Path, description = "Community ID")),
    request_body = crate::openapi::ReplaceCommunityDoc,
    responses(
        (status = 200, description = "Replaced"),
        (status = 400, description = "Body id does not match path id"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<i32>, Json(input): Json<ReplaceCommunity>) -> Result<StatusCode, JsonApiError> {
    state.communities.replace(id, input).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete, path = "/communities/{id}", tag = "community",
    params(("id" = i32, Path, description = "Community ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.communities.delete(id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults() {
        let q: ListCommunities = ListQuery::default().into();
        assert_eq!(q, ListCommunities::default());
        assert!(q.ascending);
        assert_eq!(q.sort, SortTerm::Id);
    }

    #[test]
    fn list_query_reads_public_names() {
        let q: ListQuery = serde_json::from_value(serde_json::json!({
            "pageNumber": 2,
            "pageSize": 5,
            "sortTerm": "PostsCount",
            "isAssending": false,
            "searchKey": "go"
        }))
        .unwrap();
        let q: ListCommunities = q.into();
        assert_eq!(q.pagination, Pagination { page: 2, per_page: 5 });
        assert_eq!(q.sort, SortTerm::PostsCount);
        assert!(!q.ascending);
        assert_eq!(q.search_key(), Some("go"));

        let alias: ListQuery = serde_json::from_value(serde_json::json!({"isAscending": false})).unwrap();
        assert_eq!(alias.is_assending, Some(false));
    }
}
