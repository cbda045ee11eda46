use std::sync::Arc;

use chrono::Utc;
use models::{category, SoftDelete};
use tracing::{debug, info, instrument, warn};

use super::dto::{CategoryCreateDto, CategoryUpdateDto, CategoryViewDto};
use crate::errors::ServiceError;
use crate::repository::Repository;

const ENTITY: &str = "Category";

/// Category business service independent of storage and transport.
pub struct CategoryService<R: Repository<category::Model>> {
    repo: Arc<R>,
}

impl<R: Repository<category::Model>> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a category, or bring back a deleted one with the same name.
    ///
    /// # Examples
    /// ```
    /// use service::category::{CategoryService, CategoryCreateDto};
    /// use service::repository::mock::InMemoryRepository;
    /// use std::sync::Arc;
    /// let svc = CategoryService::new(Arc::new(InMemoryRepository::default()));
    /// let created = tokio_test::block_on(svc.create(CategoryCreateDto { name: "Electronics".into(), parent_id: None })).unwrap();
    /// assert_eq!(created.id, 1);
    /// let again = tokio_test::block_on(svc.create(CategoryCreateDto { name: "Electronics".into(), parent_id: None }));
    /// assert_eq!(again.unwrap_err().status(), 409);
    /// ```
    #[instrument(skip(self, dto), fields(name = %dto.name))]
    pub async fn create(&self, dto: CategoryCreateDto) -> Result<CategoryViewDto, ServiceError> {
        let rows = self.repo.select_all().await?;
        let same_name = || rows.iter().filter(|c| c.name == dto.name);

        if same_name().any(|c| !c.is_deleted) {
            return Err(ServiceError::conflict(ENTITY));
        }
        let tombstoned = same_name().find(|c| c.is_deleted).map(|c| c.id);
        if let Some(id) = tombstoned {
            info!(category_id = id, "restoring_deleted_category");
            return self.update_with_restore(id, dto.into(), true).await;
        }

        if let Some(parent_id) = dto.parent_id {
            // Any existing row counts as a parent, tombstoned or not.
            if !rows.iter().any(|c| c.id == parent_id) {
                debug!(parent_id, "parent_category_missing");
                return Err(ServiceError::not_found(ENTITY));
            }
        }

        let created = self.repo.insert(dto.into()).await?;
        self.repo.save().await?;
        info!(category_id = created.id, "category_created");
        Ok(created.into())
    }

    /// Tombstone a category. Children and properties are left untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let mut existing = self.repo.select_by_id(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))?;
        existing.mark_deleted(Utc::now().into());
        self.repo.delete(existing).await?;
        self.repo.save().await?;
        info!(category_id = id, "category_deleted");
        Ok(true)
    }

    pub async fn get_all(&self) -> Result<Vec<CategoryViewDto>, ServiceError> {
        let rows = self.repo.select_all().await?;
        Ok(rows.into_iter().filter(|c| !c.is_deleted).map(CategoryViewDto::from).collect())
    }

    /// Tombstoned categories are reported as not found.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<CategoryViewDto, ServiceError> {
        let found = self.repo.select_by_id(id).await?.filter(|c| !c.is_deleted);
        debug!(found = found.is_some(), "category_lookup");
        found.map(CategoryViewDto::from).ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    /// Overwrite name and parent of a live category.
    pub async fn update(&self, id: i64, dto: CategoryUpdateDto) -> Result<CategoryViewDto, ServiceError> {
        self.update_with_restore(id, dto, false).await
    }

    /// `restore` is the recreate path: it also accepts and revives a tombstoned row.
    #[instrument(skip(self, dto), fields(name = %dto.name))]
    async fn update_with_restore(&self, id: i64, dto: CategoryUpdateDto, restore: bool) -> Result<CategoryViewDto, ServiceError> {
        let mut existing = self.repo.select_by_id(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))?;
        if restore {
            existing.restore();
        } else if existing.is_deleted {
            return Err(ServiceError::not_found(ENTITY));
        }

        let taken = self.repo.select_all().await?.iter().any(|c| c.id != id && !c.is_deleted && c.name == dto.name);
        if taken {
            warn!(category_id = id, name = %dto.name, "category_update_conflict");
            return Err(ServiceError::conflict(ENTITY));
        }

        existing.name = dto.name;
        existing.parent_id = dto.parent_id;
        existing.updated_at = Some(Utc::now().into());

        let updated = self.repo.update(existing).await?;
        self.repo.save().await?;
        info!(category_id = updated.id, restored = restore, "category_updated");
        Ok(updated.into())
    }
}
