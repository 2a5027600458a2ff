pub mod course;
pub mod plan;
pub mod plan_program;
pub mod planned_course;
pub mod program;
pub mod requirement_fulfillment;
