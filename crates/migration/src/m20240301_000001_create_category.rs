//! Create `category` table with a self-referencing parent FK.
//!
//! Rows are soft-deleted (`is_deleted`, `deleted_at`), never removed.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Category::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Category::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Category::ParentId).big_integer().null())
                    .col(ColumnDef::new(Category::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Category::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Category::UpdatedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Category::DeletedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_parent")
                            .from(Category::Table, Category::ParentId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Category::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Category { Table, Id, Name, ParentId, IsDeleted, CreatedAt, UpdatedAt, DeletedAt }
