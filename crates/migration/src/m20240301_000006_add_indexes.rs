use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Uniqueness only holds among live rows, so these are partial indexes.
const LIVE_UNIQUE_INDEXES: [(&str, &str); 2] = [
    (
        "uniq_category_name_live",
        r#"CREATE UNIQUE INDEX IF NOT EXISTS "uniq_category_name_live" ON "category" ("name") WHERE "is_deleted" = FALSE"#,
    ),
    (
        "uniq_property_name_category_live",
        r#"CREATE UNIQUE INDEX IF NOT EXISTS "uniq_property_name_category_live" ON "property" ("name", "category_id") WHERE "is_deleted" = FALSE"#,
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        for (_, sql) in LIVE_UNIQUE_INDEXES {
            conn.execute_unprepared(sql).await?;
        }

        // Property: index on category_id
        manager
            .create_index(
                Index::create()
                    .name("idx_property_category")
                    .table(Property::Table)
                    .col(Property::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Category: index on parent_id
        manager
            .create_index(
                Index::create()
                    .name("idx_category_parent")
                    .table(Category::Table)
                    .col(Category::ParentId)
                    .to_owned(),
            )
            .await?;

        // FavouritePost: composite unique (user_id, post_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_favourite_post_user_post")
                    .table(FavouritePost::Table)
                    .col(FavouritePost::UserId)
                    .col(FavouritePost::PostId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_favourite_post_user_post").table(FavouritePost::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_category_parent").table(Category::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_property_category").table(Property::Table).to_owned())
            .await?;
        let conn = manager.get_connection();
        for (name, _) in LIVE_UNIQUE_INDEXES {
            conn.execute_unprepared(&format!(r#"DROP INDEX IF EXISTS "{name}""#)).await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Category { Table, ParentId }

#[derive(DeriveIden)]
enum Property { Table, CategoryId }

#[derive(DeriveIden)]
enum FavouritePost { Table, UserId, PostId }
