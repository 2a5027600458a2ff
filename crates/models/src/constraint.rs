use crate::{course_code::CourseCode, filter::Operator};
use serde::{Deserialize, Serialize};

/// Structured constraint attached to a requirement or to a whole
/// program. `allow_double_count` and `require_course_from_sections`
/// are enforced live by the assigner; the rest are audit conditions
/// evaluated against the final fulfillment set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Constraint {
    /// Lets the named course fulfill every listed requirement
    /// simultaneously. `requirements` holds dot-joined composite keys.
    AllowDoubleCount {
        course: CourseCode,
        requirements: Vec<String>,
    },

    /// Candidate assignments for the carrying requirement must also
    /// land in the listed sections (all of them for AND, any for OR)
    RequireCourseFromSections {
        sections: Vec<String>,
        operator: Operator,
    },

    MinCourseCount {
        count: u32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        courses: Vec<CourseCode>,
    },

    MaxCourseCount {
        count: u32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        courses: Vec<CourseCode>,
    },

    MinCredits {
        credits: i32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        courses: Vec<CourseCode>,
    },

    MaxCredits {
        credits: i32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        courses: Vec<CourseCode>,
    },

    /// At least `count` fulfilling courses numbered `minNumber` or
    /// above, optionally scoped to subjects
    CourseLevelMinimum {
        count: u32,
        min_number: u32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        subjects: Vec<String>,
    },

    /// Unrecognized constraint type; ignored by auditing
    #[serde(other)]
    Unknown,
}

/// One fulfilling course as the constraint auditor sees it
#[derive(Debug, Clone, PartialEq)]
pub struct FulfilledCourse {
    pub code: CourseCode,
    pub credits: i32,
}

/// Audit verdict for a single constraint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintOutcome {
    pub satisfied: bool,
    pub message: String,
}

impl ConstraintOutcome {
    fn new(satisfied: bool, message: String) -> Self {
        Self { satisfied, message }
    }
}

impl Constraint {
    /// Audits this constraint against a final fulfillment set. Never
    /// mutates anything; assignment-time enforcement happens in the
    /// assigner, not here.
    pub fn evaluate(&self, fulfilled: &[FulfilledCourse]) -> ConstraintOutcome {
        match self {
            Self::AllowDoubleCount {
                course,
                requirements,
            } => ConstraintOutcome::new(
                true,
                format!(
                    "{course} may count toward {} requirements simultaneously",
                    requirements.len()
                ),
            ),

            Self::RequireCourseFromSections { sections, operator } => {
                let connective = match operator {
                    Operator::And => "all of",
                    Operator::Or => "any of",
                };
                ConstraintOutcome::new(
                    true,
                    format!(
                        "courses must also satisfy {connective} sections: {}",
                        sections.join(", ")
                    ),
                )
            }

            Self::MinCourseCount { count, courses } => {
                let matched = count_matching(fulfilled, courses);
                ConstraintOutcome::new(
                    matched >= *count as usize,
                    format!("{matched} of at least {count} required courses"),
                )
            }

            Self::MaxCourseCount { count, courses } => {
                let matched = count_matching(fulfilled, courses);
                ConstraintOutcome::new(
                    matched <= *count as usize,
                    format!("{matched} of at most {count} allowed courses"),
                )
            }

            Self::MinCredits { credits, courses } => {
                let total = sum_credits(fulfilled, courses);
                ConstraintOutcome::new(
                    total >= *credits,
                    format!("{total} of at least {credits} required credits"),
                )
            }

            Self::MaxCredits { credits, courses } => {
                let total = sum_credits(fulfilled, courses);
                ConstraintOutcome::new(
                    total <= *credits,
                    format!("{total} of at most {credits} allowed credits"),
                )
            }

            Self::CourseLevelMinimum {
                count,
                min_number,
                subjects,
            } => {
                let matched = fulfilled
                    .iter()
                    .filter(|f| {
                        subjects.is_empty()
                            || subjects
                                .iter()
                                .any(|s| s.eq_ignore_ascii_case(f.code.subject()))
                    })
                    .filter(|f| f.code.numeric().is_some_and(|n| n >= *min_number))
                    .count();
                ConstraintOutcome::new(
                    matched >= *count as usize,
                    format!("{matched} of at least {count} courses numbered {min_number}+"),
                )
            }

            Self::Unknown => {
                ConstraintOutcome::new(true, "unrecognized constraint ignored".to_string())
            }
        }
    }
}

/// Courses in the fulfillment set restricted to the given subset;
/// an empty subset means every fulfilling course counts
fn matching<'a>(
    fulfilled: &'a [FulfilledCourse],
    courses: &'a [CourseCode],
) -> impl Iterator<Item = &'a FulfilledCourse> {
    fulfilled
        .iter()
        .filter(move |f| courses.is_empty() || courses.contains(&f.code))
}

fn count_matching(fulfilled: &[FulfilledCourse], courses: &[CourseCode]) -> usize {
    matching(fulfilled, courses).count()
}

fn sum_credits(fulfilled: &[FulfilledCourse], courses: &[CourseCode]) -> i32 {
    matching(fulfilled, courses).map(|f| f.credits).sum()
}
