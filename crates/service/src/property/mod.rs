//! Property CRUD: unique per `(name, category_id)`, soft-deletable.

pub mod dto;
pub mod service;

pub use dto::{PropertyCreateDto, PropertyUpdateDto, PropertyViewDto};
pub use service::PropertyService;
