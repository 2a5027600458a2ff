use crate::dtos::fulfillment::{FulfillmentListResponse, FulfillmentResponse};
use axum::{Json, extract::Path, http::StatusCode};
use database::{
    db::create_connection, entities::requirement_fulfillment,
    services::fulfillment::FulfillmentService,
};
use sea_orm::prelude::Uuid;

/// Get the current fulfillment rows for a plan
#[utoipa::path(
    get,
    path = "/plans/{plan_id}/fulfillments",
    params(
        ("plan_id" = Uuid, Path, description = "Plan ID")
    ),
    responses(
        (status = 200, description = "Fulfillments retrieved successfully", body = FulfillmentListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Plans"
)]
pub async fn get_fulfillments(
    Path(plan_id): Path<Uuid>,
) -> Result<Json<FulfillmentListResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let rows = FulfillmentService::get_fulfillments(&db, plan_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(convert_to_list_response(rows)))
}

/// Re-run auto-assignment for a plan, regenerating every fulfillment
/// row. A missing plan yields an empty result, not an error.
#[utoipa::path(
    post,
    path = "/plans/{plan_id}/fulfillments/assign",
    params(
        ("plan_id" = Uuid, Path, description = "Plan ID")
    ),
    responses(
        (status = 200, description = "Assignment completed", body = FulfillmentListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Plans"
)]
pub async fn assign_fulfillments(
    Path(plan_id): Path<Uuid>,
) -> Result<Json<FulfillmentListResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let rows = FulfillmentService::auto_assign_fulfillments(&db, plan_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(convert_to_list_response(rows)))
}

/// Helper function to convert database models to the API response
fn convert_to_list_response(
    rows: Vec<requirement_fulfillment::Model>,
) -> FulfillmentListResponse {
    let fulfillments: Vec<FulfillmentResponse> = rows
        .into_iter()
        .map(|row| FulfillmentResponse {
            id: row.id.to_string(),
            plan_program_id: row.plan_program_id.to_string(),
            requirement_id: row.requirement_id,
            planned_course_id: row.planned_course_id.to_string(),
            credits_applied: row.credits_applied,
        })
        .collect();

    FulfillmentListResponse {
        count: fulfillments.len(),
        fulfillments,
    }
}
