use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::community::{Model, NewCommunity};

use crate::community::domain::ListCommunities;
use crate::errors::ServiceError;

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    async fn list(&self, query: &ListCommunities) -> Result<Vec<Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Model>, ServiceError>;
    async fn create(&self, new: NewCommunity) -> Result<Model, ServiceError>;
    async fn exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn replace(&self, replacement: Model) -> Result<Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmCommunityRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCommunityRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CommunityRepository for SeaOrmCommunityRepository {
    async fn list(&self, query: &ListCommunities) -> Result<Vec<Model>, ServiceError> {
        crate::db::community_service::list_communities(&self.db, query).await
    }

    async fn get(&self, id: i32) -> Result<Option<Model>, ServiceError> {
        crate::db::community_service::get_community(&self.db, id).await
    }

    async fn create(&self, new: NewCommunity) -> Result<Model, ServiceError> {
        crate::db::community_service::create_community(&self.db, new).await
    }

    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        crate::db::community_service::community_exists(&self.db, id).await
    }

    async fn replace(&self, replacement: Model) -> Result<Model, ServiceError> {
        crate::db::community_service::replace_community(&self.db, replacement).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        crate::db::community_service::delete_community(&self.db, id).await
    }
}
