//! Create `community_subscriber` membership table.
//!
//! One row per (community, user); the user side lives outside this schema.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommunitySubscriber::Table)
                    .if_not_exists()
                    .col(pk_auto(CommunitySubscriber::Id))
                    .col(integer(CommunitySubscriber::CommunityId).not_null())
                    .col(integer(CommunitySubscriber::UserId).not_null())
                    .col(timestamp_with_time_zone(CommunitySubscriber::SubscribedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_subscriber_community")
                            .from(CommunitySubscriber::Table, CommunitySubscriber::CommunityId)
                            .to(Community::Table, Community::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A user subscribes to a community at most once
        manager
            .create_index(
                Index::create()
                    .name("uniq_community_subscriber_member")
                    .table(CommunitySubscriber::Table)
                    .col(CommunitySubscriber::CommunityId)
                    .col(CommunitySubscriber::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CommunitySubscriber::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CommunitySubscriber { Table, Id, CommunityId, UserId, SubscribedAt }

#[derive(DeriveIden)]
enum Community { Table, Id }
