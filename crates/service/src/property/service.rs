use std::sync::Arc;

use chrono::Utc;
use models::{property, SoftDelete};
use tracing::{debug, info, instrument, warn};

use super::dto::{PropertyCreateDto, PropertyUpdateDto, PropertyViewDto};
use crate::errors::ServiceError;
use crate::repository::Repository;

const ENTITY: &str = "Property";

/// Property business service. Properties are unique per `(name, category_id)`;
/// the category reference itself is not validated here.
pub struct PropertyService<R: Repository<property::Model>> {
    repo: Arc<R>,
}

impl<R: Repository<property::Model>> PropertyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a property, or bring back a deleted one with the same key.
    ///
    /// # Examples
    /// ```
    /// use service::property::{PropertyService, PropertyCreateDto};
    /// use service::repository::mock::InMemoryRepository;
    /// use std::sync::Arc;
    /// let svc = PropertyService::new(Arc::new(InMemoryRepository::default()));
    /// let color = PropertyCreateDto { name: "Color".into(), category_id: 1 };
    /// let created = tokio_test::block_on(svc.create(color.clone())).unwrap();
    /// assert_eq!(created.category_id, 1);
    /// assert!(tokio_test::block_on(svc.create(color)).is_err());
    /// ```
    #[instrument(skip(self, dto), fields(name = %dto.name, category_id = dto.category_id))]
    pub async fn create(&self, dto: PropertyCreateDto) -> Result<PropertyViewDto, ServiceError> {
        let rows = self.repo.select_all().await?;
        let same_key = || rows.iter().filter(|p| p.name == dto.name && p.category_id == dto.category_id);

        if same_key().any(|p| !p.is_deleted) {
            return Err(ServiceError::conflict(ENTITY));
        }
        let tombstoned = same_key().find(|p| p.is_deleted).map(|p| p.id);
        if let Some(id) = tombstoned {
            info!(property_id = id, "restoring_deleted_property");
            return self.update_with_restore(id, dto.into(), true).await;
        }

        let created = self.repo.insert(dto.into()).await?;
        self.repo.save().await?;
        info!(property_id = created.id, "property_created");
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let mut existing = self.repo.select_by_id(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))?;
        existing.mark_deleted(Utc::now().into());
        self.repo.delete(existing).await?;
        self.repo.save().await?;
        info!(property_id = id, "property_deleted");
        Ok(true)
    }

    pub async fn get_all(&self) -> Result<Vec<PropertyViewDto>, ServiceError> {
        let rows = self.repo.select_all().await?;
        Ok(rows.into_iter().filter(|p| !p.is_deleted).map(PropertyViewDto::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<PropertyViewDto, ServiceError> {
        let found = self.repo.select_by_id(id).await?.filter(|p| !p.is_deleted);
        debug!(found = found.is_some(), "property_lookup");
        found.map(PropertyViewDto::from).ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    pub async fn update(&self, id: i64, dto: PropertyUpdateDto) -> Result<PropertyViewDto, ServiceError> {
        self.update_with_restore(id, dto, false).await
    }

    #[instrument(skip(self, dto), fields(name = %dto.name))]
    async fn update_with_restore(&self, id: i64, dto: PropertyUpdateDto, restore: bool) -> Result<PropertyViewDto, ServiceError> {
        let mut existing = self.repo.select_by_id(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))?;
        if restore {
            existing.restore();
        } else if existing.is_deleted {
            return Err(ServiceError::not_found(ENTITY));
        }

        let taken = self
            .repo
            .select_all()
            .await?
            .iter()
            .any(|p| p.id != id && !p.is_deleted && p.name == dto.name && p.category_id == dto.category_id);
        if taken {
            warn!(property_id = id, name = %dto.name, "property_update_conflict");
            return Err(ServiceError::conflict(ENTITY));
        }

        existing.name = dto.name;
        existing.category_id = dto.category_id;
        existing.updated_at = Some(Utc::now().into());

        let updated = self.repo.update(existing).await?;
        self.repo.save().await?;
        info!(property_id = updated.id, restored = restore, "property_updated");
        Ok(updated.into())
    }
}
