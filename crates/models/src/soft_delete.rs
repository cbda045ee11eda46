//! Soft-delete bookkeeping shared by every marketplace table.
//!
//! Rows are tombstoned (`is_deleted = true`, `deleted_at = now`) instead of
//! being removed, and can be brought back with [`SoftDelete::restore`].

use sea_orm::prelude::DateTimeWithTimeZone;

pub trait SoftDelete: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
    /// Identity is assigned by storage; only repositories call this.
    fn set_id(&mut self, id: i64);
    fn is_deleted(&self) -> bool;
    fn mark_deleted(&mut self, at: DateTimeWithTimeZone);
    fn restore(&mut self);
}

macro_rules! impl_soft_delete {
    ($($model:path),+ $(,)?) => {
        $(
            impl SoftDelete for $model {
                fn id(&self) -> i64 { self.id }
                fn set_id(&mut self, id: i64) { self.id = id; }
                fn is_deleted(&self) -> bool { self.is_deleted }
                fn mark_deleted(&mut self, at: DateTimeWithTimeZone) {
                    self.is_deleted = true;
                    self.deleted_at = Some(at);
                }
                fn restore(&mut self) {
                    self.is_deleted = false;
                    self.deleted_at = None;
                }
            }
        )+
    };
}

impl_soft_delete!(
    crate::category::Model,
    crate::property::Model,
    crate::user::Model,
    crate::post::Model,
    crate::favourite_post::Model,
);
