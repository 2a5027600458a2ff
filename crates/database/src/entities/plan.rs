use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    /// Catalog year the plan's courses resolve against
    pub catalog_year: i16,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::planned_course::Entity")]
    PlannedCourses,
    #[sea_orm(has_many = "super::plan_program::Entity")]
    PlanPrograms,
}

impl Related<super::planned_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlannedCourses.def()
    }
}

impl Related<super::plan_program::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlanPrograms.def()
    }
}

// Many-to-many relationship with programs
impl Related<super::program::Entity> for Entity {
    fn to() -> RelationDef {
        super::plan_program::Relation::Program.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::plan_program::Relation::Plan.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
