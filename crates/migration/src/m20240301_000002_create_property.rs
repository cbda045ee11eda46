//! Create `property` table with FK to `category`.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Property::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Property::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Property::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Property::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(Property::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Property::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Property::UpdatedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Property::DeletedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_category")
                            .from(Property::Table, Property::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Property::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Property { Table, Id, Name, CategoryId, IsDeleted, CreatedAt, UpdatedAt, DeletedAt }

#[derive(DeriveIden)]
enum Category { Table, Id }
