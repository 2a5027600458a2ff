use crate::dtos::progress::{
    ConstraintOutcomeResponse, ProgramProgressResponse, RequirementProgressResponse,
    SectionProgressResponse,
};
use axum::{Json, extract::Path, http::StatusCode};
use database::{
    db::create_connection,
    entities::{program, requirement_fulfillment},
    services::{
        course::CourseService, fulfillment::FulfillmentService, plan::PlanService,
        program::ProgramService,
    },
};
use models::{
    constraint::FulfilledCourse,
    course::Course,
    course_code::CourseCode,
    progress::{ProgressStatus, TakenCourse, evaluate_progress},
};
use sea_orm::prelude::Uuid;
use std::collections::HashMap;

/// Section and requirement progress for one plan/program pair
#[utoipa::path(
    get,
    path = "/plans/{plan_id}/programs/{program_id}/progress",
    params(
        ("plan_id" = Uuid, Path, description = "Plan ID"),
        ("program_id" = Uuid, Path, description = "Program ID")
    ),
    responses(
        (status = 200, description = "Progress computed successfully", body = ProgramProgressResponse),
        (status = 404, description = "Plan not found or not associated with the program"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Progress"
)]
pub async fn get_program_progress(
    Path((plan_id, program_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ProgramProgressResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let plan = PlanService::get_plan(&db, plan_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let plan_program = PlanService::get_plan_programs(&db, plan_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_iter()
        .find(|pp| pp.program_id == program_id)
        .ok_or(StatusCode::NOT_FOUND)?;

    let program = ProgramService::get_program(&db, program_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let fulfillments = FulfillmentService::get_fulfillments_for_plan_program(&db, plan_program.id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    // Resolve the fulfilling planned courses against the catalog
    let planned_courses = PlanService::get_planned_courses(&db, plan_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let codes: Vec<String> = planned_courses
        .iter()
        .map(|pc| pc.course_code.clone())
        .collect();
    let catalog = CourseService::get_courses_by_codes(&db, &codes, plan.catalog_year)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let courses_by_planned_id: HashMap<Uuid, Course> = planned_courses
        .iter()
        .filter_map(|pc| {
            let code: CourseCode = pc.course_code.parse().ok()?;
            let course = catalog.get(&code.to_string())?.clone();
            Some((pc.id, course))
        })
        .collect();

    Ok(Json(convert_to_progress_response(
        &program,
        &fulfillments,
        &courses_by_planned_id,
    )))
}

/// Helper function to assemble the per-requirement progress report
fn convert_to_progress_response(
    program: &program::Model,
    fulfillments: &[requirement_fulfillment::Model],
    courses_by_planned_id: &HashMap<Uuid, Course>,
) -> ProgramProgressResponse {
    // Fulfilling courses grouped by composite requirement key, with
    // the credits actually applied
    let mut by_requirement: HashMap<&str, Vec<(&Course, i32)>> = HashMap::new();
    let mut all_fulfilled = Vec::new();
    for fulfillment in fulfillments {
        if let Some(course) = courses_by_planned_id.get(&fulfillment.planned_course_id) {
            by_requirement
                .entry(fulfillment.requirement_id.as_str())
                .or_default()
                .push((course, fulfillment.credits_applied));
            all_fulfilled.push(FulfilledCourse {
                code: course.code.clone(),
                credits: fulfillment.credits_applied,
            });
        }
    }

    let sections = program
        .requirements
        .sections
        .iter()
        .map(|section| {
            let requirements = section
                .requirements
                .iter()
                .map(|requirement| {
                    let key = format!("{}.{}", section.id, requirement.id);

                    let taken: Vec<TakenCourse> = by_requirement
                        .get(key.as_str())
                        .map(|entries| {
                            entries
                                .iter()
                                .map(|(course, credits)| TakenCourse {
                                    course: (*course).clone(),
                                    credits: *credits,
                                })
                                .collect()
                        })
                        .unwrap_or_default();

                    let progress = evaluate_progress(&requirement.rule, &taken);

                    let fulfilled: Vec<FulfilledCourse> = taken
                        .iter()
                        .map(|t| FulfilledCourse {
                            code: t.course.code.clone(),
                            credits: t.credits,
                        })
                        .collect();
                    let constraints = requirement
                        .constraints_structured
                        .iter()
                        .map(|c| to_outcome_response(c.evaluate(&fulfilled)))
                        .collect();

                    RequirementProgressResponse {
                        id: key,
                        title: requirement.title.clone(),
                        credits_required: requirement.credits_required,
                        status: status_label(progress.status).to_string(),
                        percentage: progress.percentage,
                        detail: serde_json::to_value(&progress.detail)
                            .unwrap_or(serde_json::Value::Null),
                        constraints,
                    }
                })
                .collect();

            SectionProgressResponse {
                id: section.id.clone(),
                title: section.title.clone(),
                credits_required: section.credits_required,
                requirements,
            }
        })
        .collect();

    // Program-level constraints audit against the whole fulfillment set
    let constraints = program
        .requirements
        .constraints_structured
        .iter()
        .map(|c| to_outcome_response(c.evaluate(&all_fulfilled)))
        .collect();

    ProgramProgressResponse {
        program_id: program.id.to_string(),
        program_name: program.name.clone(),
        sections,
        constraints,
    }
}

fn to_outcome_response(
    outcome: models::constraint::ConstraintOutcome,
) -> ConstraintOutcomeResponse {
    ConstraintOutcomeResponse {
        satisfied: outcome.satisfied,
        message: outcome.message,
    }
}

fn status_label(status: ProgressStatus) -> &'static str {
    match status {
        ProgressStatus::NotStarted => "not_started",
        ProgressStatus::InProgress => "in_progress",
        ProgressStatus::Completed => "completed",
    }
}
