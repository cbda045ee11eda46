//! Create `favourite_post` link table between `user` and `post`.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FavouritePost::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavouritePost::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FavouritePost::UserId).big_integer().not_null())
                    .col(ColumnDef::new(FavouritePost::PostId).big_integer().not_null())
                    .col(ColumnDef::new(FavouritePost::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(FavouritePost::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(FavouritePost::UpdatedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(FavouritePost::DeletedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favourite_post_user")
                            .from(FavouritePost::Table, FavouritePost::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favourite_post_post")
                            .from(FavouritePost::Table, FavouritePost::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FavouritePost::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum FavouritePost { Table, Id, UserId, PostId, IsDeleted, CreatedAt, UpdatedAt, DeletedAt }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Post { Table, Id }
