use models::category;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreateDto {
    pub name: String,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdateDto {
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Category as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryViewDto {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl From<CategoryCreateDto> for CategoryUpdateDto {
    fn from(dto: CategoryCreateDto) -> Self {
        Self { name: dto.name, parent_id: dto.parent_id }
    }
}

impl From<CategoryCreateDto> for category::Model {
    fn from(dto: CategoryCreateDto) -> Self {
        category::Model::draft(&dto.name, dto.parent_id)
    }
}

impl From<category::Model> for CategoryViewDto {
    fn from(m: category::Model) -> Self {
        Self { id: m.id, name: m.name, parent_id: m.parent_id, created_at: m.created_at, updated_at: m.updated_at }
    }
}
