//! Service layer providing the marketplace catalog CRUD operations on top of models.
//! - Separates business rules (uniqueness, restore-on-recreate) from data access.
//! - Talks to storage only through the generic [`repository::Repository`].
//! - Returns transfer objects, never persistence entities.

pub mod errors;
pub mod repository;
pub mod repo;
pub mod category;
pub mod property;
pub mod favourite_post;
#[cfg(test)]
pub mod test_support;

pub use category::CategoryService;
pub use errors::ServiceError;
pub use property::PropertyService;
