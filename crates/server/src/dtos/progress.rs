use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgramProgressResponse {
    pub program_id: String,
    pub program_name: String,
    pub sections: Vec<SectionProgressResponse>,
    /// Program-level constraint audit
    pub constraints: Vec<ConstraintOutcomeResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionProgressResponse {
    pub id: String,
    pub title: String,
    pub credits_required: i32,
    pub requirements: Vec<RequirementProgressResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RequirementProgressResponse {
    /// Dot-joined composite key
    pub id: String,
    pub title: String,
    pub credits_required: i32,
    /// not_started, in_progress, or completed
    pub status: String,
    pub percentage: f64,
    /// Structured per-rule progress detail
    #[schema(value_type = Object)]
    pub detail: serde_json::Value,
    pub constraints: Vec<ConstraintOutcomeResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConstraintOutcomeResponse {
    pub satisfied: bool,
    pub message: String,
}
