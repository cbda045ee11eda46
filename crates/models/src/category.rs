use sea_orm::entity::prelude::*;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::property;

/// Marketplace category; `parent_id` forms a tree (cycles are not checked).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub is_deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Parent,
    Property,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Parent => Entity::belongs_to(Entity).from(Column::ParentId).to(Column::Id).into(),
            Relation::Property => Entity::has_many(property::Entity).into(),
        }
    }
}

impl Related<property::Entity> for Entity {
    fn to() -> RelationDef { Relation::Property.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Unsaved live row; storage assigns `id` on insert.
    pub fn draft(name: &str, parent_id: Option<i64>) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            parent_id,
            is_deleted: false,
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }
}
