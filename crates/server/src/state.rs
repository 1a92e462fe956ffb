use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::community::{repository::SeaOrmCommunityRepository, CommunityService};

pub type Communities = CommunityService<SeaOrmCommunityRepository>;

/// Router state. Each request borrows a pooled connection through the repository.
#[derive(Clone)]
pub struct ServerState {
    pub communities: Arc<Communities>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = SeaOrmCommunityRepository::new(db);
        Self { communities: Arc::new(CommunityService::new(Arc::new(repo))) }
    }
}
