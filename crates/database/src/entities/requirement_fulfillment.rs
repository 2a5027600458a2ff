use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Links one planned course to one requirement of one plan program.
/// All rows for a plan program are regenerated together by the
/// assigner; there are no partial updates.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requirement_fulfillments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub plan_program_id: Uuid,
    /// Dot-joined `sectionId.requirementId` composite key
    pub requirement_id: String,
    pub planned_course_id: Uuid,
    pub credits_applied: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::plan_program::Entity",
        from = "Column::PlanProgramId",
        to = "super::plan_program::Column::Id"
    )]
    PlanProgram,
    #[sea_orm(
        belongs_to = "super::planned_course::Entity",
        from = "Column::PlannedCourseId",
        to = "super::planned_course::Column::Id"
    )]
    PlannedCourse,
}

impl Related<super::plan_program::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlanProgram.def()
    }
}

impl Related<super::planned_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlannedCourse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
