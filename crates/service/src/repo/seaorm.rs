use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityName, EntityTrait, IntoActiveModel,
    Iterable, PrimaryKeyToColumn, PrimaryKeyTrait, SqlErr,
};
use tracing::debug;

use models::SoftDelete;

use crate::errors::ServiceError;
use crate::repository::Repository;

/// SeaORM-backed repository for any entity keyed by an `i64` id.
///
/// Every write is its own statement on the pool, so concurrent callers never
/// share uncommitted state; `save()` has nothing left to flush. Races on live
/// keys are settled by the partial unique indexes and surface as `Conflict`.
pub struct SeaOrmRepository<E> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E: EntityTrait> SeaOrmRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, _entity: PhantomData }
    }

    fn table() -> String {
        E::default().table_name().to_owned()
    }
}

fn map_db_err(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => ServiceError::Conflict(msg),
        _ => ServiceError::Db(e.to_string()),
    }
}

#[async_trait]
impl<E> Repository<E::Model> for SeaOrmRepository<E>
where
    E: EntityTrait,
    E::Model: SoftDelete + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i64>,
{
    async fn select_all(&self) -> Result<Vec<E::Model>, ServiceError> {
        E::find().all(&self.db).await.map_err(map_db_err)
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<E::Model>, ServiceError> {
        E::find_by_id(id).one(&self.db).await.map_err(map_db_err)
    }

    async fn insert(&self, record: E::Model) -> Result<E::Model, ServiceError> {
        let mut am = record.into_active_model().reset_all();
        for key in E::PrimaryKey::iter() {
            am.not_set(key.into_column());
        }
        let created = am.insert(&self.db).await.map_err(map_db_err)?;
        debug!(table = %Self::table(), id = created.id(), "row_inserted");
        Ok(created)
    }

    async fn update(&self, record: E::Model) -> Result<E::Model, ServiceError> {
        let id = record.id();
        let am = record.into_active_model().reset_all();
        match am.update(&self.db).await {
            Ok(updated) => {
                debug!(table = %Self::table(), id, "row_updated");
                Ok(updated)
            }
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::NotFound(format!("{} {} not found", Self::table(), id))),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn delete(&self, mut record: E::Model) -> Result<(), ServiceError> {
        if !record.is_deleted() {
            record.mark_deleted(Utc::now().into());
        }
        self.update(record).await.map(|_| ())
    }

    async fn save(&self) -> Result<(), ServiceError> {
        // Writes above are already committed.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use models::{category, property};
    use sea_orm::{ColumnTrait, PaginatorTrait, QueryFilter};
    use uuid::Uuid;

    use crate::category::{CategoryCreateDto, CategoryService, CategoryUpdateDto};
    use crate::property::{PropertyCreateDto, PropertyService};
    use crate::test_support::get_db;

    fn unique(prefix: &str) -> String {
        format!("{}_{}", prefix, Uuid::new_v4())
    }

    #[tokio::test]
    async fn writes_are_visible_to_other_connections_immediately() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmRepository::<category::Entity>::new(db.clone());
        let name = unique("direct");

        let created = repo.insert(category::Model::draft(&name, None)).await?;
        assert!(created.id > 0);
        assert!(category::Entity::find_by_id(created.id).one(&db).await?.is_some());

        // Nothing pending, so save is a no-op
        repo.save().await?;
        assert!(repo.select_by_id(created.id).await?.is_some());

        category::Entity::delete_by_id(created.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn delete_persists_tombstone() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmRepository::<category::Entity>::new(db.clone());

        let created = repo.insert(category::Model::draft(&unique("tomb"), None)).await?;
        repo.save().await?;
        repo.delete(created.clone()).await?;
        repo.save().await?;

        let row = category::Entity::find_by_id(created.id).one(&db).await?.expect("row kept");
        assert!(row.is_deleted);
        assert!(row.deleted_at.is_some());

        category::Entity::delete_by_id(created.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_live_name_is_rejected_by_storage() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmRepository::<category::Entity>::new(db.clone());
        let name = unique("dup");

        let first = repo.insert(category::Model::draft(&name, None)).await?;
        repo.save().await?;
        // Skips the service pre-check, as a racing writer would
        let err = repo.insert(category::Model::draft(&name, None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {:?}", err);
        // The rejected insert leaves the first row alone
        assert!(repo.select_by_id(first.id).await?.is_some());

        category::Entity::delete_by_id(first.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_keep_one_live_row_per_name() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let svc = Arc::new(CategoryService::new(Arc::new(SeaOrmRepository::<category::Entity>::new(db.clone()))));
        let shared = unique("shared");
        let mut names: Vec<String> = (0..6).map(|_| unique("solo")).collect();
        names.extend(std::iter::repeat(shared.clone()).take(6));

        let handles: Vec<_> = names
            .iter()
            .cloned()
            .map(|name| {
                let svc = svc.clone();
                tokio::spawn(async move { (name.clone(), svc.create(CategoryCreateDto { name, parent_id: None }).await) })
            })
            .collect();

        let mut created = Vec::new();
        let mut shared_wins = 0;
        for handle in handles {
            let (name, result) = handle.await?;
            match result {
                Ok(view) => {
                    if name == shared {
                        shared_wins += 1;
                    }
                    created.push(view.id);
                }
                Err(e) => {
                    assert_eq!(name, shared, "unique name failed: {:?}", e);
                    assert_eq!(e.status(), 409, "got {:?}", e);
                }
            }
        }
        assert_eq!(shared_wins, 1);
        assert_eq!(created.len(), 7);

        // Every reported id was committed and is reachable from another connection
        for id in &created {
            assert!(category::Entity::find_by_id(*id).one(&db).await?.is_some(), "id {} missing", id);
        }
        let live_shared = category::Entity::find()
            .filter(category::Column::Name.eq(shared.as_str()))
            .filter(category::Column::IsDeleted.eq(false))
            .count(&db)
            .await?;
        assert_eq!(live_shared, 1);

        category::Entity::delete_many().filter(category::Column::Id.is_in(created)).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmRepository::<category::Entity>::new(db);
        let mut ghost = category::Model::draft(&unique("ghost"), None);
        ghost.id = i64::MAX;
        assert!(matches!(repo.update(ghost).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn category_service_resurrects_in_postgres() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let svc = CategoryService::new(Arc::new(SeaOrmRepository::<category::Entity>::new(db.clone())));
        let name = unique("Electronics");

        let created = svc.create(CategoryCreateDto { name: name.clone(), parent_id: None }).await?;
        assert!(svc.delete(created.id).await?);
        assert!(svc.get_all().await?.iter().all(|c| c.id != created.id));

        let again = svc.create(CategoryCreateDto { name: name.clone(), parent_id: None }).await?;
        assert_eq!(again.id, created.id);

        let renamed = svc.update(again.id, CategoryUpdateDto { name: unique("Gadgets"), parent_id: None }).await?;
        assert_eq!(renamed.id, created.id);

        category::Entity::delete_by_id(created.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn property_service_conflicts_in_postgres() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let categories = CategoryService::new(Arc::new(SeaOrmRepository::<category::Entity>::new(db.clone())));
        let properties = PropertyService::new(Arc::new(SeaOrmRepository::<property::Entity>::new(db.clone())));

        let cat = categories.create(CategoryCreateDto { name: unique("cat"), parent_id: None }).await?;
        let color = PropertyCreateDto { name: "Color".into(), category_id: cat.id };
        let created = properties.create(color.clone()).await?;
        let err = properties.create(color).await.unwrap_err();
        assert_eq!(err.status(), 409);

        property::Entity::delete_by_id(created.id).exec(&db).await?;
        category::Entity::delete_by_id(cat.id).exec(&db).await?;
        Ok(())
    }
}
