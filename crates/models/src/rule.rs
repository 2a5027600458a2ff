use crate::{
    course::Course,
    course_code::CourseCode,
    filter::{CourseFilter, FilterError, Operator},
    scoring,
};
use serde::{Deserialize, Serialize};

/// How `take_from_list` counts progress toward its target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountType {
    #[default]
    Courses,
    Credits,
}

/// Result of matching a single course against a single rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleMatch {
    pub matches: bool,
    pub specificity: f64,
}

impl RuleMatch {
    fn hit(specificity: f64) -> Self {
        Self {
            matches: true,
            specificity,
        }
    }

    fn miss() -> Self {
        Self {
            matches: false,
            specificity: 0.0,
        }
    }
}

/// A requirement's matching rule, authored as tagged JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Rule {
    /// Explicit course list, all required
    TakeCourses { courses: Vec<CourseCode> },

    /// Choose `count` items (courses or credits) from a list
    TakeFromList {
        count: u32,
        #[serde(default)]
        count_type: CountType,
        courses: Vec<CourseCode>,
    },

    /// Open rule qualified by a course filter; `creditsRequired` is
    /// only consulted by progress reporting, never by matching
    TakeAnyCourses {
        filter: CourseFilter,
        #[serde(default)]
        credits_required: u32,
    },

    /// AND/OR over nested rules
    Group { operator: Operator, rules: Vec<Rule> },

    /// Unrecognized rule type; never matches
    #[serde(other)]
    Unknown,
}

impl Rule {
    /// Matches a single course against this rule. Pure: the same
    /// (rule, course) pair always yields the same result.
    pub fn evaluate(&self, course: &Course) -> RuleMatch {
        match self {
            Self::TakeCourses { courses } => {
                if courses.contains(&course.code) {
                    RuleMatch::hit(scoring::TAKE_COURSES_MATCH)
                } else {
                    RuleMatch::miss()
                }
            }

            // Matching only checks membership; quantity is progress
            // reporting's concern
            Self::TakeFromList { courses, .. } => {
                if courses.contains(&course.code) {
                    RuleMatch::hit(scoring::TAKE_FROM_LIST_MATCH)
                } else {
                    RuleMatch::miss()
                }
            }

            Self::TakeAnyCourses { filter, .. } => {
                if filter.evaluate(course) {
                    RuleMatch::hit(scoring::TAKE_ANY_MATCH)
                } else {
                    RuleMatch::miss()
                }
            }

            Self::Group { operator, rules } => match operator {
                Operator::And => {
                    // Empty sub-rule list is a vacuous truth; the min
                    // over no scores saturates at the model maximum
                    if rules.is_empty() {
                        return RuleMatch::hit(scoring::MAX_SPECIFICITY);
                    }

                    let mut min_score = f64::MAX;
                    for rule in rules {
                        let result = rule.evaluate(course);
                        if !result.matches {
                            return RuleMatch::miss();
                        }
                        min_score = min_score.min(result.specificity);
                    }

                    RuleMatch::hit(min_score)
                }
                Operator::Or => {
                    let best = rules
                        .iter()
                        .map(|rule| rule.evaluate(course))
                        .filter(|result| result.matches)
                        .map(|result| result.specificity)
                        .fold(f64::NEG_INFINITY, f64::max);

                    if best.is_finite() {
                        RuleMatch::hit(best)
                    } else {
                        RuleMatch::miss()
                    }
                }
            },

            Self::Unknown => RuleMatch::miss(),
        }
    }

    /// Validates every filter embedded in this rule tree, returning
    /// the first failure found
    pub fn validate_filters(&self) -> Result<(), FilterError> {
        match self {
            Self::TakeAnyCourses { filter, .. } => filter.validate(),
            Self::Group { rules, .. } => {
                for rule in rules {
                    rule.validate_filters()?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credits::CreditRange;

    fn course(code: &str) -> Course {
        Course::new(code.parse().unwrap(), "Test Course", CreditRange::Single(3.0))
    }

    fn codes(list: &[&str]) -> Vec<CourseCode> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn take_courses(list: &[&str]) -> Rule {
        Rule::TakeCourses {
            courses: codes(list),
        }
    }

    fn take_from_list(count: u32, list: &[&str]) -> Rule {
        Rule::TakeFromList {
            count,
            count_type: CountType::Courses,
            courses: codes(list),
        }
    }

    #[test]
    fn test_take_courses() {
        let rule = take_courses(&["CS 1101", "CS 2201"]);

        let hit = rule.evaluate(&course("CS 1101"));
        assert!(hit.matches);
        assert_eq!(hit.specificity, 100.0);

        let miss = rule.evaluate(&course("CS 3251"));
        assert!(!miss.matches);
        assert_eq!(miss.specificity, 0.0);
    }

    #[test]
    fn test_take_from_list() {
        let rule = take_from_list(2, &["MATH 1300", "MATH 1301", "MATH 2300"]);

        let hit = rule.evaluate(&course("MATH 1301"));
        assert!(hit.matches);
        assert_eq!(hit.specificity, 80.0);

        assert!(!rule.evaluate(&course("MATH 2810")).matches);
    }

    #[test]
    fn test_take_any_courses_delegates_to_filter() {
        let rule = Rule::TakeAnyCourses {
            filter: CourseFilter::Placeholder,
            credits_required: 12,
        };

        let hit = rule.evaluate(&course("ANTH 1101"));
        assert!(hit.matches);
        assert_eq!(hit.specificity, 10.0);

        let scoped = Rule::TakeAnyCourses {
            filter: CourseFilter::SubjectNumber {
                subjects: vec!["CS".to_string()],
                number: None,
                excluded_courses: vec![],
            },
            credits_required: 12,
        };
        assert!(scoped.evaluate(&course("CS 1101")).matches);
        assert!(!scoped.evaluate(&course("ANTH 1101")).matches);
    }

    #[test]
    fn test_group_and_takes_min_score() {
        let rule = Rule::Group {
            operator: Operator::And,
            rules: vec![
                take_courses(&["CS 1101"]),
                take_from_list(1, &["CS 1101", "CS 2201"]),
            ],
        };

        let result = rule.evaluate(&course("CS 1101"));
        assert!(result.matches);
        assert_eq!(result.specificity, 80.0);

        // One sub-rule missing sinks the whole AND
        assert!(!rule.evaluate(&course("CS 2201")).matches);
    }

    #[test]
    fn test_group_or_takes_max_matching_score() {
        let rule = Rule::Group {
            operator: Operator::Or,
            rules: vec![
                take_courses(&["CS 1101"]),
                take_from_list(1, &["CS 1101", "CS 2201"]),
            ],
        };

        let both = rule.evaluate(&course("CS 1101"));
        assert!(both.matches);
        assert_eq!(both.specificity, 100.0);

        let one = rule.evaluate(&course("CS 2201"));
        assert!(one.matches);
        assert_eq!(one.specificity, 80.0);

        assert!(!rule.evaluate(&course("CS 3251")).matches);
    }

    #[test]
    fn test_empty_and_group_is_vacuously_true() {
        let rule = Rule::Group {
            operator: Operator::And,
            rules: vec![],
        };

        let result = rule.evaluate(&course("CS 1101"));
        assert!(result.matches);
        // Saturated, never unbounded
        assert_eq!(result.specificity, scoring::MAX_SPECIFICITY);
    }

    #[test]
    fn test_empty_or_group_never_matches() {
        let rule = Rule::Group {
            operator: Operator::Or,
            rules: vec![],
        };

        assert!(!rule.evaluate(&course("CS 1101")).matches);
    }

    #[test]
    fn test_unknown_rule_type_never_matches() {
        let rule: Rule = serde_json::from_str(r#"{"type": "thesis_defense"}"#).unwrap();

        assert_eq!(rule, Rule::Unknown);
        let result = rule.evaluate(&course("CS 1101"));
        assert!(!result.matches);
        assert_eq!(result.specificity, 0.0);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let rule = Rule::Group {
            operator: Operator::Or,
            rules: vec![
                take_courses(&["CS 1101"]),
                Rule::TakeAnyCourses {
                    filter: CourseFilter::Placeholder,
                    credits_required: 3,
                },
            ],
        };
        let target = course("CS 1101");

        let first = rule.evaluate(&target);
        for _ in 0..10 {
            assert_eq!(rule.evaluate(&target), first);
        }
    }

    #[test]
    fn test_validate_filters_recurses() {
        let rule = Rule::Group {
            operator: Operator::And,
            rules: vec![
                take_courses(&["CS 1101"]),
                Rule::TakeAnyCourses {
                    filter: CourseFilter::CourseList { courses: vec![] },
                    credits_required: 3,
                },
            ],
        };

        assert_eq!(rule.validate_filters(), Err(FilterError::NoCourses));
    }

    #[test]
    fn test_tagged_json_shape() {
        let json = r#"{
            "type": "take_from_list",
            "count": 2,
            "countType": "credits",
            "courses": ["MATH 1300", "MATH 1301"]
        }"#;
        let rule: Rule = serde_json::from_str(json).unwrap();

        assert!(matches!(
            rule,
            Rule::TakeFromList {
                count: 2,
                count_type: CountType::Credits,
                ..
            }
        ));
    }
}
