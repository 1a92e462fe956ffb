//! Membership join between a community and a user.
use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{community, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community_subscriber")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub community_id: i32,
    pub user_id: i32,
    pub subscribed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Community }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Community => Entity::belongs_to(community::Entity)
                .from(Column::CommunityId)
                .to(community::Column::Id)
                .into(),
        }
    }
}

impl Related<community::Entity> for Entity {
    fn to() -> RelationDef { Relation::Community.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn subscribe(db: &DatabaseConnection, community_id: i32, user_id: i32) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        community_id: Set(community_id),
        user_id: Set(user_id),
        subscribed_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
