//! Category CRUD: name-unique, soft-deletable, optionally parented.

pub mod dto;
pub mod service;

pub use dto::{CategoryCreateDto, CategoryUpdateDto, CategoryViewDto};
pub use service::CategoryService;
