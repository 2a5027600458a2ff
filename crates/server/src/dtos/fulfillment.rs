use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct FulfillmentResponse {
    pub id: String,
    pub plan_program_id: String,
    /// Dot-joined `sectionId.requirementId` composite key
    pub requirement_id: String,
    pub planned_course_id: String,
    pub credits_applied: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FulfillmentListResponse {
    pub count: usize,
    pub fulfillments: Vec<FulfillmentResponse>,
}
