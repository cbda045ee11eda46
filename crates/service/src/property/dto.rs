use models::property;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyCreateDto {
    pub name: String,
    pub category_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyUpdateDto {
    pub name: String,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyViewDto {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl From<PropertyCreateDto> for PropertyUpdateDto {
    fn from(dto: PropertyCreateDto) -> Self {
        Self { name: dto.name, category_id: dto.category_id }
    }
}

impl From<PropertyCreateDto> for property::Model {
    fn from(dto: PropertyCreateDto) -> Self {
        property::Model::draft(&dto.name, dto.category_id)
    }
}

impl From<property::Model> for PropertyViewDto {
    fn from(m: property::Model) -> Self {
        Self { id: m.id, name: m.name, category_id: m.category_id, created_at: m.created_at, updated_at: m.updated_at }
    }
}
