use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A cataloged course. Immutable once cataloged for a catalog year.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub subject: String,
    /// Catalog number, possibly with a trailing letter suffix ("1510L")
    pub number: String,
    pub title: String,
    /// Parsed credit range, e.g. "3" or "1-3"
    pub credits: String,
    /// Attribute tags grouped by category, e.g. {"axle": ["HCA"]}
    pub attributes: Json,
    pub catalog_year: i16,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
