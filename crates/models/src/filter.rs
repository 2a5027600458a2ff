use crate::{course::Course, course_code::CourseCode, scoring};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// AND/OR connective shared by composite filters, rule groups, and
/// section restrictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    And,
    Or,
}

/// Constraint on the numeric part of a catalog number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NumberConstraint {
    /// Inclusive range, e.g. 3000-3999
    Range { min: u32, max: u32 },
    /// Explicit set of catalog numbers
    Specific { values: Vec<u32> },
}

/// Why a filter failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    NoSubjects,
    NoCourses,
    NoAttributes,
    NoSuffixes,
    EmptySpecificValues,
    CompositeTooSmall,
    UnknownType,
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::NoSubjects => write!(f, "subject/number filter must list at least one subject"),
            Self::NoCourses => write!(f, "course list filter must list at least one course"),
            Self::NoAttributes => write!(f, "attribute filter must list at least one attribute"),
            Self::NoSuffixes => write!(f, "suffix filter must list at least one suffix"),
            Self::EmptySpecificValues => {
                write!(f, "specific number constraint must list at least one value")
            }
            Self::CompositeTooSmall => {
                write!(f, "composite filter must combine at least two sub-filters")
            }
            Self::UnknownType => write!(f, "unrecognized filter type"),
        }
    }
}

impl std::error::Error for FilterError {}

/// A composable course-matching predicate, authored as tagged JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum CourseFilter {
    /// Matches every course
    Placeholder,

    /// Matches by subject prefix, optionally constrained by catalog
    /// number and an exclusion list
    SubjectNumber {
        subjects: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        number: Option<NumberConstraint>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        excluded_courses: Vec<CourseCode>,
    },

    /// Matches courses carrying any of the listed attribute tags
    Attribute {
        attributes: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        excluded_subjects: Vec<String>,
    },

    /// Explicit course-code allow-list
    CourseList { courses: Vec<CourseCode> },

    /// Matches by trailing catalog-number suffix (e.g. lab sections),
    /// optionally scoped to subjects
    CourseNumberSuffix {
        suffixes: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        subjects: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        excluded_courses: Vec<CourseCode>,
    },

    /// AND/OR over two or more sub-filters
    Composite {
        operator: Operator,
        filters: Vec<CourseFilter>,
    },

    /// Unrecognized filter type; never matches
    #[serde(other)]
    Unknown,
}

impl CourseFilter {
    /// Whether the filter accepts the given course
    pub fn evaluate(&self, course: &Course) -> bool {
        match self {
            Self::Placeholder => true,

            Self::SubjectNumber {
                subjects,
                number,
                excluded_courses,
            } => {
                if excluded_courses.contains(&course.code) {
                    return false;
                }

                if !subjects
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(course.code.subject()))
                {
                    return false;
                }

                match number {
                    None => true,
                    Some(NumberConstraint::Range { min, max }) => course
                        .code
                        .numeric()
                        .is_some_and(|n| n >= *min && n <= *max),
                    Some(NumberConstraint::Specific { values }) => {
                        course.code.numeric().is_some_and(|n| values.contains(&n))
                    }
                }
            }

            Self::Attribute {
                attributes,
                excluded_subjects,
            } => {
                if excluded_subjects
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(course.code.subject()))
                {
                    return false;
                }

                attributes.iter().any(|tag| course.has_attribute(tag))
            }

            Self::CourseList { courses } => courses.contains(&course.code),

            Self::CourseNumberSuffix {
                suffixes,
                subjects,
                excluded_courses,
            } => {
                if excluded_courses.contains(&course.code) {
                    return false;
                }

                if !subjects.is_empty()
                    && !subjects
                        .iter()
                        .any(|s| s.eq_ignore_ascii_case(course.code.subject()))
                {
                    return false;
                }

                course
                    .code
                    .suffix()
                    .is_some_and(|sfx| suffixes.iter().any(|s| s.eq_ignore_ascii_case(sfx)))
            }

            Self::Composite { operator, filters } => match operator {
                Operator::And => filters.iter().all(|f| f.evaluate(course)),
                Operator::Or => filters.iter().any(|f| f.evaluate(course)),
            },

            Self::Unknown => false,
        }
    }

    /// How narrowly this filter targets courses; higher is more
    /// specific. Deterministic in the filter shape alone.
    pub fn specificity(&self) -> f64 {
        match self {
            Self::Placeholder => scoring::PLACEHOLDER,

            Self::SubjectNumber {
                subjects, number, ..
            } => {
                let number_bonus = match number {
                    Some(NumberConstraint::Specific { .. }) => {
                        scoring::SUBJECT_NUMBER_SPECIFIC_BONUS
                    }
                    Some(NumberConstraint::Range { .. }) => scoring::SUBJECT_NUMBER_RANGE_BONUS,
                    None => 0.0,
                };
                let subject_bonus = if subjects.len() == 1 {
                    scoring::SINGLE_SUBJECT_BONUS
                } else {
                    0.0
                };

                scoring::SUBJECT_NUMBER_BASE + number_bonus + subject_bonus
            }

            Self::Attribute {
                attributes,
                excluded_subjects,
            } => {
                // Each extra tag widens the matching set
                let extra = attributes.len().saturating_sub(1) as f64;
                let base = (scoring::ATTRIBUTE_BASE - scoring::ATTRIBUTE_BREADTH_PENALTY * extra)
                    .max(scoring::ATTRIBUTE_FLOOR);
                let exclusion_bonus = if excluded_subjects.is_empty() {
                    0.0
                } else {
                    scoring::ATTRIBUTE_EXCLUSION_BONUS
                };

                base + exclusion_bonus
            }

            Self::CourseList { courses } => {
                let size_bonus = if courses.len() == 1 {
                    scoring::COURSE_LIST_SINGLE_BONUS
                } else if courses.len() <= scoring::COURSE_LIST_SMALL_MAX {
                    scoring::COURSE_LIST_SMALL_BONUS
                } else {
                    0.0
                };

                scoring::COURSE_LIST_BASE + size_bonus
            }

            Self::CourseNumberSuffix {
                suffixes,
                subjects,
                excluded_courses,
            } => {
                let scope_bonus = if subjects.is_empty() {
                    0.0
                } else {
                    scoring::SUFFIX_SUBJECT_SCOPE_BONUS
                };
                let single_bonus = if suffixes.len() == 1 {
                    scoring::SUFFIX_SINGLE_BONUS
                } else {
                    0.0
                };
                let exclusion_bonus = if excluded_courses.is_empty() {
                    0.0
                } else {
                    scoring::SUFFIX_EXCLUSION_BONUS
                };

                scoring::SUFFIX_BASE + scope_bonus + single_bonus + exclusion_bonus
            }

            Self::Composite { operator, filters } => {
                let mut scores: Vec<f64> = filters.iter().map(Self::specificity).collect();

                match operator {
                    // Average of the two highest sub-scores: a filter
                    // with two very specific components earns both
                    Operator::And => {
                        scores.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
                        match scores.len() {
                            0 => 0.0,
                            1 => scores[0],
                            _ => (scores[0] + scores[1]) / 2.0,
                        }
                    }
                    // An OR widens the matching set; cap it below any
                    // single highly-specific filter
                    Operator::Or => scores
                        .into_iter()
                        .fold(0.0, f64::max)
                        .min(scoring::COMPOSITE_OR_CAP),
                }
            }

            Self::Unknown => 0.0,
        }
    }

    /// Checks structural well-formedness, recursing into composite
    /// sub-filters and returning the first failure found
    pub fn validate(&self) -> Result<(), FilterError> {
        match self {
            Self::Placeholder => Ok(()),

            Self::SubjectNumber {
                subjects, number, ..
            } => {
                if subjects.is_empty() {
                    return Err(FilterError::NoSubjects);
                }
                if let Some(NumberConstraint::Specific { values }) = number
                    && values.is_empty()
                {
                    return Err(FilterError::EmptySpecificValues);
                }
                Ok(())
            }

            Self::Attribute { attributes, .. } => {
                if attributes.is_empty() {
                    return Err(FilterError::NoAttributes);
                }
                Ok(())
            }

            Self::CourseList { courses } => {
                if courses.is_empty() {
                    return Err(FilterError::NoCourses);
                }
                Ok(())
            }

            Self::CourseNumberSuffix { suffixes, .. } => {
                if suffixes.is_empty() {
                    return Err(FilterError::NoSuffixes);
                }
                Ok(())
            }

            Self::Composite { filters, .. } => {
                if filters.len() < 2 {
                    return Err(FilterError::CompositeTooSmall);
                }
                for filter in filters {
                    filter.validate()?;
                }
                Ok(())
            }

            Self::Unknown => Err(FilterError::UnknownType),
        }
    }
}
