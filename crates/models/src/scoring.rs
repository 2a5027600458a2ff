//! Specificity weights for rules and filters.
//!
//! Scores only break ties when a course could satisfy multiple
//! requirements; keeping every weight here keeps the model auditable
//! and testable in isolation.

/// Score of the match-everything placeholder filter
pub const PLACEHOLDER: f64 = 10.0;

/// Base score for a subject/number filter
pub const SUBJECT_NUMBER_BASE: f64 = 50.0;
/// Added when the filter pins specific catalog numbers
pub const SUBJECT_NUMBER_SPECIFIC_BONUS: f64 = 25.0;
/// Added when the filter constrains a number range
pub const SUBJECT_NUMBER_RANGE_BONUS: f64 = 15.0;
/// Added when exactly one subject is listed
pub const SINGLE_SUBJECT_BONUS: f64 = 5.0;

/// Base score for an attribute filter with a single tag
pub const ATTRIBUTE_BASE: f64 = 40.0;
/// Deducted per additional tag; more tags accept more courses
pub const ATTRIBUTE_BREADTH_PENALTY: f64 = 5.0;
/// An attribute filter never scores below this, keeping it above
/// the placeholder
pub const ATTRIBUTE_FLOOR: f64 = 15.0;
/// Added when a subject-exclusion clause narrows the filter
pub const ATTRIBUTE_EXCLUSION_BONUS: f64 = 10.0;

/// Base score for an explicit course allow-list
pub const COURSE_LIST_BASE: f64 = 85.0;
/// Added when exactly one course is listed
pub const COURSE_LIST_SINGLE_BONUS: f64 = 5.0;
/// Added when the list stays at or below [`COURSE_LIST_SMALL_MAX`]
pub const COURSE_LIST_SMALL_BONUS: f64 = 3.0;
pub const COURSE_LIST_SMALL_MAX: usize = 10;

/// Base score for a number-suffix filter
pub const SUFFIX_BASE: f64 = 60.0;
/// Added when the filter is scoped to specific subjects
pub const SUFFIX_SUBJECT_SCOPE_BONUS: f64 = 10.0;
/// Added when exactly one suffix is listed
pub const SUFFIX_SINGLE_BONUS: f64 = 5.0;
/// Added when an exclusion list is present
pub const SUFFIX_EXCLUSION_BONUS: f64 = 5.0;

/// Ceiling for composite OR filters; widening the matching set must
/// never look as specific as a single narrow filter
pub const COMPOSITE_OR_CAP: f64 = 70.0;

/// Score of a matched explicit `take_courses` rule
pub const TAKE_COURSES_MATCH: f64 = 100.0;
/// Score of a matched `take_from_list` rule
pub const TAKE_FROM_LIST_MATCH: f64 = 80.0;
/// Score of a matched open `take_any_courses` rule
pub const TAKE_ANY_MATCH: f64 = 10.0;

/// Saturation value for the vacuously-true empty AND group. The min
/// over no sub-rule scores would be unbounded; it is clamped to the
/// highest score any real rule produces instead.
pub const MAX_SPECIFICITY: f64 = 100.0;
