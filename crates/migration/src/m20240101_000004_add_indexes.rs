use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Post: index on community_id, backs the posts-count subquery
        manager
            .create_index(
                Index::create()
                    .name("idx_post_community")
                    .table(Post::Table)
                    .col(Post::CommunityId)
                    .to_owned(),
            )
            .await?;

        // Community: index on created_at for the createdat sort
        manager
            .create_index(
                Index::create()
                    .name("idx_community_created_at")
                    .table(Community::Table)
                    .col(Community::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_post_community").table(Post::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_community_created_at").table(Community::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Post { Table, CommunityId }

#[derive(DeriveIden)]
enum Community { Table, CreatedAt }
