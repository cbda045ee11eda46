//! Read projection of a user's favourite posts.

use models::{favourite_post, post, user};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavouritePostViewDto {
    pub user_id: i64,
    pub user: user::Model,
    pub post_id: i64,
    pub post: post::Model,
}

impl From<(user::Model, post::Model)> for FavouritePostViewDto {
    fn from((user, post): (user::Model, post::Model)) -> Self {
        Self { user_id: user.id, user, post_id: post.id, post }
    }
}

/// Favourites of a live user, oldest first.
pub async fn list_for_user(db: &DatabaseConnection, user_id: i64) -> Result<Vec<FavouritePostViewDto>, ServiceError> {
    let owner = user::Entity::find_by_id(user_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .filter(|u| !u.is_deleted)
        .ok_or_else(|| ServiceError::not_found("User"))?;
    let rows = favourite_post::find_for_user(db, user_id).await?;
    Ok(rows.into_iter().map(|(_, post)| FavouritePostViewDto::from((owner.clone(), post))).collect())
}
