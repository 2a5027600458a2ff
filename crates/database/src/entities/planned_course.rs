use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A course slotted into a plan. Owned by its plan; deleted with it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "planned_courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub plan_id: Uuid,
    /// Denormalized course code, e.g. "CS 1101"
    pub course_code: String,
    pub semester_number: i16,
    /// Ordering within the semester
    pub position: i16,
    /// Credits actually counted for this entry; may differ from the
    /// catalog range for transfer/override credit
    pub credits: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::plan::Entity",
        from = "Column::PlanId",
        to = "super::plan::Column::Id"
    )]
    Plan,
    #[sea_orm(has_many = "super::requirement_fulfillment::Entity")]
    RequirementFulfillments,
}

impl Related<super::plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plan.def()
    }
}

impl Related<super::requirement_fulfillment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequirementFulfillments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
