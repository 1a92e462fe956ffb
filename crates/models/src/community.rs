use sea_orm::{entity::prelude::*, Set, DatabaseConnection, ActiveModelTrait, EntityTrait, PaginatorTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{community_subscriber, errors, post};

pub const NAME_MAX_LEN: usize = 256;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Post, Subscriber }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Post => Entity::has_many(post::Entity).into(),
            Relation::Subscriber => Entity::has_many(community_subscriber::Entity).into(),
        }
    }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { Relation::Post.def() }
}

impl Related<community_subscriber::Entity> for Entity {
    fn to() -> RelationDef { Relation::Subscriber.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Creation payload; the server deserializes request bodies straight into it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NewCommunity {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewCommunity {
    /// Map the payload to an insertable row stamped with `created_at`.
    /// The id is left for the store to assign.
    pub fn into_active_model_at(self, created_at: DateTimeWithTimeZone) -> Result<ActiveModel, errors::ModelError> {
        validate_name(&self.name)?;
        Ok(ActiveModel {
            name: Set(self.name),
            description: Set(self.description),
            created_at: Set(created_at),
            ..Default::default()
        })
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("name longer than {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, new: NewCommunity) -> Result<Model, errors::ModelError> {
    let am = new.into_active_model_at(Utc::now().into())?;
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Existence check by primary key only; the row is not fetched.
pub async fn exists(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let n = Entity::find_by_id(id)
        .count(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(n > 0)
}

/// Overwrite every column of row `model.id` with `model`'s values.
pub async fn replace(db: &DatabaseConnection, model: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(model.id),
        name: Set(model.name),
        description: Set(model.description),
        created_at: Set(model.created_at),
    };
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: i32) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}
