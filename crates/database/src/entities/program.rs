use models::requirements::ProgramRequirements;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "programs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    /// major, minor, certificate, ...
    pub program_type: String,
    pub catalog_year: i16,
    /// The full requirement tree, stored as JSON
    pub requirements: ProgramRequirements,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::plan_program::Entity")]
    PlanPrograms,
}

impl Related<super::plan_program::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlanPrograms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
