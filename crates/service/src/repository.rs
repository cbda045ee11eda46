use async_trait::async_trait;
use models::SoftDelete;

use crate::errors::ServiceError;

/// Generic persistence abstraction for soft-deletable rows.
///
/// Writes become durable no later than [`Repository::save`]; an
/// implementation may apply them immediately, making `save` a no-op.
#[async_trait]
pub trait Repository<T: SoftDelete>: Send + Sync {
    /// Every row, tombstoned ones included.
    async fn select_all(&self) -> Result<Vec<T>, ServiceError>;
    async fn select_by_id(&self, id: i64) -> Result<Option<T>, ServiceError>;
    /// Insert a new row; the returned record carries the assigned id.
    async fn insert(&self, record: T) -> Result<T, ServiceError>;
    /// Overwrite the row keyed by `record.id()`.
    async fn update(&self, record: T) -> Result<T, ServiceError>;
    /// Soft delete: persists the tombstone, stamping it if the caller did not.
    async fn delete(&self, record: T) -> Result<(), ServiceError>;
    async fn save(&self) -> Result<(), ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    struct State<T> {
        committed: BTreeMap<i64, T>,
        staged: Option<BTreeMap<i64, T>>,
        next_id: i64,
    }

    impl<T: Clone> State<T> {
        fn visible(&self) -> &BTreeMap<i64, T> {
            self.staged.as_ref().unwrap_or(&self.committed)
        }

        fn staged_mut(&mut self) -> &mut BTreeMap<i64, T> {
            let committed = &self.committed;
            self.staged.get_or_insert_with(|| committed.clone())
        }
    }

    /// Rows live in a `BTreeMap` keyed by id; ids are handed out from 1.
    pub struct InMemoryRepository<T> {
        state: Mutex<State<T>>, // committed snapshot + staged writes
    }

    impl<T> Default for InMemoryRepository<T> {
        fn default() -> Self {
            Self { state: Mutex::new(State { committed: BTreeMap::new(), staged: None, next_id: 1 }) }
        }
    }

    impl<T: SoftDelete> InMemoryRepository<T> {
        /// Start with already-committed rows, keeping their ids.
        pub fn with_rows(rows: impl IntoIterator<Item = T>) -> Self {
            let committed: BTreeMap<i64, T> = rows.into_iter().map(|r| (r.id(), r)).collect();
            let next_id = committed.keys().next_back().map_or(1, |max| max + 1);
            Self { state: Mutex::new(State { committed, staged: None, next_id }) }
        }

        /// Rows as of the last `save()`.
        pub fn committed(&self) -> Vec<T> {
            match self.state.lock() {
                Ok(state) => state.committed.values().cloned().collect(),
                Err(poisoned) => poisoned.into_inner().committed.values().cloned().collect(),
            }
        }

        fn lock(&self) -> Result<MutexGuard<'_, State<T>>, ServiceError> {
            self.state.lock().map_err(|_| ServiceError::Db("in-memory repository lock poisoned".into()))
        }
    }

    #[async_trait]
    impl<T: SoftDelete> Repository<T> for InMemoryRepository<T> {
        async fn select_all(&self) -> Result<Vec<T>, ServiceError> {
            let state = self.lock()?;
            Ok(state.visible().values().cloned().collect())
        }

        async fn select_by_id(&self, id: i64) -> Result<Option<T>, ServiceError> {
            let state = self.lock()?;
            Ok(state.visible().get(&id).cloned())
        }

        async fn insert(&self, mut record: T) -> Result<T, ServiceError> {
            let mut state = self.lock()?;
            let id = state.next_id;
            state.next_id += 1;
            record.set_id(id);
            state.staged_mut().insert(id, record.clone());
            Ok(record)
        }

        async fn update(&self, record: T) -> Result<T, ServiceError> {
            let mut state = self.lock()?;
            let rows = state.staged_mut();
            match rows.get_mut(&record.id()) {
                Some(row) => {
                    *row = record.clone();
                    Ok(record)
                }
                None => Err(ServiceError::NotFound(format!("record {} not found", record.id()))),
            }
        }

        async fn delete(&self, mut record: T) -> Result<(), ServiceError> {
            if !record.is_deleted() {
                record.mark_deleted(Utc::now().into());
            }
            self.update(record).await.map(|_| ())
        }

        async fn save(&self) -> Result<(), ServiceError> {
            let mut state = self.lock()?;
            if let Some(staged) = state.staged.take() {
                state.committed = staged;
            }
            Ok(())
        }
    }

}
