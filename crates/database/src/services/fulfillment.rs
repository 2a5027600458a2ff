use crate::entities::{program, requirement_fulfillment};
use crate::services::{course::CourseService, plan::PlanService, program::ProgramService};
use log::{info, warn};
use models::assignment::{self, AssignableCourse, ProgramContext};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;
use uuid::Uuid;

pub struct FulfillmentService;

impl FulfillmentService {
    /// Regenerates every fulfillment row for the plan: clear, match,
    /// assign, insert. Clear and insert are deliberately separate
    /// statements rather than one transaction; the pass is idempotent
    /// and safe to re-run, but callers must not overlap invocations
    /// for the same plan.
    ///
    /// A missing plan is logged and treated as a no-op. Store errors
    /// propagate to the caller.
    pub async fn auto_assign_fulfillments(
        db: &DatabaseConnection,
        plan_id: Uuid,
    ) -> Result<Vec<requirement_fulfillment::Model>, DbErr> {
        let Some(plan) = PlanService::get_plan(db, plan_id).await? else {
            warn!("auto-assign skipped: plan {plan_id} not found");
            return Ok(vec![]);
        };

        let (planned_courses, plan_programs) = futures::try_join!(
            PlanService::get_planned_courses(db, plan_id),
            PlanService::get_plan_programs(db, plan_id),
        )?;

        // Full regeneration: drop whatever the previous pass committed
        let plan_program_ids: Vec<Uuid> = plan_programs.iter().map(|pp| pp.id).collect();
        if !plan_program_ids.is_empty() {
            requirement_fulfillment::Entity::delete_many()
                .filter(
                    requirement_fulfillment::Column::PlanProgramId.is_in(plan_program_ids.clone()),
                )
                .exec(db)
                .await?;
        }

        if planned_courses.is_empty() || plan_programs.is_empty() {
            return Ok(vec![]);
        }

        // Resolve catalog courses for the plan's catalog year; planned
        // courses without a catalog hit are orphaned and skipped
        let codes: Vec<String> = planned_courses
            .iter()
            .map(|pc| pc.course_code.clone())
            .collect();
        let catalog = CourseService::get_courses_by_codes(db, &codes, plan.catalog_year).await?;

        let assignable: Vec<AssignableCourse> = planned_courses
            .iter()
            .filter_map(|pc| {
                let code: models::course_code::CourseCode = pc.course_code.parse().ok()?;
                let course = catalog.get(&code.to_string())?.clone();
                Some(AssignableCourse {
                    planned_course_id: pc.id,
                    course,
                    credits: pc.credits,
                })
            })
            .collect();

        let program_ids: Vec<Uuid> = plan_programs.iter().map(|pp| pp.program_id).collect();
        let programs = ProgramService::get_programs(db, program_ids).await?;
        let programs_by_id: HashMap<Uuid, program::Model> =
            programs.into_iter().map(|p| (p.id, p)).collect();

        // Keep plan-program list order; it decides which program sees
        // a course first
        let contexts: Vec<ProgramContext> = plan_programs
            .iter()
            .filter_map(|pp| {
                programs_by_id.get(&pp.program_id).map(|p| ProgramContext {
                    plan_program_id: pp.id,
                    requirements: p.requirements.clone(),
                })
            })
            .collect();

        let fulfillments = assignment::assign_fulfillments(&assignable, &contexts);
        info!(
            "assigned {} fulfillments across {} programs for plan {plan_id}",
            fulfillments.len(),
            contexts.len()
        );

        if fulfillments.is_empty() {
            return Ok(vec![]);
        }

        let rows: Vec<requirement_fulfillment::ActiveModel> = fulfillments
            .iter()
            .map(|f| requirement_fulfillment::ActiveModel {
                id: Set(Uuid::new_v4()),
                plan_program_id: Set(f.plan_program_id),
                requirement_id: Set(f.requirement_id.clone()),
                planned_course_id: Set(f.planned_course_id),
                credits_applied: Set(f.credits_applied),
                ..Default::default()
            })
            .collect();

        requirement_fulfillment::Entity::insert_many(rows).exec(db).await?;

        Self::get_fulfillments(db, plan_id).await
    }

    /// Current fulfillment rows across every program of the plan
    pub async fn get_fulfillments(
        db: &DatabaseConnection,
        plan_id: Uuid,
    ) -> Result<Vec<requirement_fulfillment::Model>, DbErr> {
        let plan_programs = PlanService::get_plan_programs(db, plan_id).await?;
        let plan_program_ids: Vec<Uuid> = plan_programs.iter().map(|pp| pp.id).collect();
        if plan_program_ids.is_empty() {
            return Ok(vec![]);
        }

        requirement_fulfillment::Entity::find()
            .filter(requirement_fulfillment::Column::PlanProgramId.is_in(plan_program_ids))
            .order_by_asc(requirement_fulfillment::Column::PlanProgramId)
            .order_by_asc(requirement_fulfillment::Column::RequirementId)
            .all(db)
            .await
    }

    /// Fulfillment rows for a single plan program
    pub async fn get_fulfillments_for_plan_program(
        db: &DatabaseConnection,
        plan_program_id: Uuid,
    ) -> Result<Vec<requirement_fulfillment::Model>, DbErr> {
        requirement_fulfillment::Entity::find()
            .filter(requirement_fulfillment::Column::PlanProgramId.eq(plan_program_id))
            .order_by_asc(requirement_fulfillment::Column::RequirementId)
            .all(db)
            .await
    }
}
