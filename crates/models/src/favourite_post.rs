use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{errors, post, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favourite_post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub is_deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Post,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::Post => Entity::belongs_to(post::Entity).from(Column::PostId).to(post::Column::Id).into(),
        }
    }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { Relation::Post.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Live favourites of a user joined with their posts, oldest first.
/// Favourites whose post is gone or tombstoned are skipped.
pub async fn find_for_user(db: &DatabaseConnection, user_id: i64) -> Result<Vec<(Model, post::Model)>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::CreatedAt)
        .find_also_related(post::Entity)
        .filter(post::Column::IsDeleted.eq(false))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(rows.into_iter().filter_map(|(fav, post)| post.map(|p| (fav, p))).collect())
}
