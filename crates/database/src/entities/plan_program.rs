use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction table associating a plan with a program (primary major,
/// minor, ...). `position` is the plan-program list order consumed by
/// the assigner.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plan_programs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub plan_id: Uuid,
    pub program_id: Uuid,
    pub position: i16,
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
    #[sea_orm(
        belongs_to = "super::program::Entity",
        from = "Column::ProgramId",
        to = "super::program::Column::Id"
    )]
    Program,
    #[sea_orm(has_many = "super::requirement_fulfillment::Entity")]
    RequirementFulfillments,
}

impl Related<super::plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plan.def()
    }
}

impl Related<super::program::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Program.def()
    }
}

impl Related<super::requirement_fulfillment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequirementFulfillments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
