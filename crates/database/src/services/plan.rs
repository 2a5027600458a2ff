use crate::entities::{plan, plan_program, planned_course};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct PlanService;

impl PlanService {
    pub async fn get_plan(
        db: &DatabaseConnection,
        plan_id: Uuid,
    ) -> Result<Option<plan::Model>, DbErr> {
        plan::Entity::find_by_id(plan_id).one(db).await
    }

    /// Planned courses in assignment priority order: semester first,
    /// then position within the semester. Earlier entries get first
    /// claim on capacity-limited requirements.
    pub async fn get_planned_courses(
        db: &DatabaseConnection,
        plan_id: Uuid,
    ) -> Result<Vec<planned_course::Model>, DbErr> {
        planned_course::Entity::find()
            .filter(planned_course::Column::PlanId.eq(plan_id))
            .order_by_asc(planned_course::Column::SemesterNumber)
            .order_by_asc(planned_course::Column::Position)
            .all(db)
            .await
    }

    /// Plan-program associations in list order
    pub async fn get_plan_programs(
        db: &DatabaseConnection,
        plan_id: Uuid,
    ) -> Result<Vec<plan_program::Model>, DbErr> {
        plan_program::Entity::find()
            .filter(plan_program::Column::PlanId.eq(plan_id))
            .order_by_asc(plan_program::Column::Position)
            .all(db)
            .await
    }
}
