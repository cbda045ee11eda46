use sea_orm::entity::prelude::*;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::category;

/// Category-scoped attribute (e.g. "Color" under "Electronics").
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub is_deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn draft(name: &str, category_id: i64) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            category_id,
            is_deleted: false,
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }
}
