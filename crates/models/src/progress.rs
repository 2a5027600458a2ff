use crate::{
    course::Course,
    course_code::CourseCode,
    filter::Operator,
    rule::{CountType, Rule},
};
use serde::Serialize;

/// Completion state of a rule for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// A course already counting toward the rule under evaluation
#[derive(Debug, Clone)]
pub struct TakenCourse {
    pub course: Course,
    pub credits: i32,
}

/// Display-oriented progress report for one rule. Not used for
/// assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleProgress {
    pub status: ProgressStatus,
    /// 0-100, capped even when over-fulfilled
    pub percentage: f64,
    pub detail: ProgressDetail,
}

/// Structured progress detail per rule shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ProgressDetail {
    Courses {
        taken: Vec<CourseCode>,
        missing: Vec<CourseCode>,
    },
    FromList {
        matched_courses: u32,
        matched_credits: i32,
        count: u32,
        count_type: CountType,
    },
    AnyCourses {
        credits_matched: i32,
        credits_required: u32,
    },
    Group {
        entries: Vec<RuleProgress>,
        /// For OR groups: index of the first sub-rule currently at the
        /// maximum percentage
        #[serde(skip_serializing_if = "Option::is_none")]
        active_option: Option<usize>,
    },
    None,
}

/// Computes completion percentage and structured detail for a rule
/// against the set of already-taken courses. Pure and independent of
/// the assigner.
pub fn evaluate_progress(rule: &Rule, taken: &[TakenCourse]) -> RuleProgress {
    match rule {
        Rule::TakeCourses { courses } => {
            let (taken_codes, missing): (Vec<CourseCode>, Vec<CourseCode>) = courses
                .iter()
                .cloned()
                .partition(|c| taken.iter().any(|t| t.course.code == *c));

            // An empty required list is vacuously complete
            let percentage = if courses.is_empty() {
                100.0
            } else {
                taken_codes.len() as f64 / courses.len() as f64 * 100.0
            };

            RuleProgress {
                status: status_for(percentage),
                percentage,
                detail: ProgressDetail::Courses {
                    taken: taken_codes,
                    missing,
                },
            }
        }

        Rule::TakeFromList {
            count,
            count_type,
            courses,
        } => {
            let matched: Vec<&TakenCourse> = taken
                .iter()
                .filter(|t| courses.contains(&t.course.code))
                .collect();
            let matched_courses = matched.len() as u32;
            let matched_credits: i32 = matched.iter().map(|t| t.credits).sum();

            let achieved = match count_type {
                CountType::Courses => matched_courses as f64,
                CountType::Credits => matched_credits as f64,
            };
            let percentage = capped_percentage(achieved, *count as f64);

            RuleProgress {
                status: status_for(percentage),
                percentage,
                detail: ProgressDetail::FromList {
                    matched_courses,
                    matched_credits,
                    count: *count,
                    count_type: *count_type,
                },
            }
        }

        Rule::TakeAnyCourses {
            filter,
            credits_required,
        } => {
            let credits_matched: i32 = taken
                .iter()
                .filter(|t| filter.evaluate(&t.course))
                .map(|t| t.credits)
                .sum();
            let percentage = capped_percentage(credits_matched as f64, *credits_required as f64);

            RuleProgress {
                status: status_for(percentage),
                percentage,
                detail: ProgressDetail::AnyCourses {
                    credits_matched,
                    credits_required: *credits_required,
                },
            }
        }

        Rule::Group { operator, rules } => {
            let entries: Vec<RuleProgress> =
                rules.iter().map(|r| evaluate_progress(r, taken)).collect();

            match operator {
                Operator::And => {
                    let percentage = if entries.is_empty() {
                        100.0
                    } else {
                        entries.iter().map(|e| e.percentage).sum::<f64>() / entries.len() as f64
                    };

                    // Completed only when every branch is; untouched
                    // only when every branch is
                    let status = if entries.iter().all(|e| e.status == ProgressStatus::Completed) {
                        ProgressStatus::Completed
                    } else if entries.iter().all(|e| e.status == ProgressStatus::NotStarted) {
                        ProgressStatus::NotStarted
                    } else {
                        ProgressStatus::InProgress
                    };

                    RuleProgress {
                        status,
                        percentage,
                        detail: ProgressDetail::Group {
                            entries,
                            active_option: None,
                        },
                    }
                }
                Operator::Or => {
                    let percentage = entries.iter().map(|e| e.percentage).fold(0.0, f64::max);
                    // First option at the maximum wins the tie
                    let active_option = entries.iter().position(|e| e.percentage == percentage);

                    RuleProgress {
                        status: status_for(percentage),
                        percentage,
                        detail: ProgressDetail::Group {
                            entries,
                            active_option,
                        },
                    }
                }
            }
        }

        Rule::Unknown => RuleProgress {
            status: ProgressStatus::NotStarted,
            percentage: 0.0,
            detail: ProgressDetail::None,
        },
    }
}

fn capped_percentage(achieved: f64, required: f64) -> f64 {
    if required <= 0.0 {
        return 100.0;
    }
    (achieved / required * 100.0).min(100.0)
}

fn status_for(percentage: f64) -> ProgressStatus {
    if percentage >= 100.0 {
        ProgressStatus::Completed
    } else if percentage > 0.0 {
        ProgressStatus::InProgress
    } else {
        ProgressStatus::NotStarted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credits::CreditRange;
    use crate::filter::CourseFilter;

    fn taken(entries: &[(&str, i32)]) -> Vec<TakenCourse> {
        entries
            .iter()
            .map(|(code, credits)| TakenCourse {
                course: Course::new(
                    code.parse().unwrap(),
                    "Test Course",
                    CreditRange::Single(*credits as f32),
                ),
                credits: *credits,
            })
            .collect()
    }

    fn codes(list: &[&str]) -> Vec<CourseCode> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_take_courses_progress() {
        let rule = Rule::TakeCourses {
            courses: codes(&["CS 1101", "CS 2201", "CS 2212"]),
        };

        let none = evaluate_progress(&rule, &[]);
        assert_eq!(none.status, ProgressStatus::NotStarted);
        assert_eq!(none.percentage, 0.0);

        let partial = evaluate_progress(&rule, &taken(&[("CS 1101", 3), ("CS 2201", 3)]));
        assert_eq!(partial.status, ProgressStatus::InProgress);
        assert!((partial.percentage - 200.0 / 3.0).abs() < 1e-9);

        let done = evaluate_progress(
            &rule,
            &taken(&[("CS 1101", 3), ("CS 2201", 3), ("CS 2212", 3)]),
        );
        assert_eq!(done.status, ProgressStatus::Completed);
        assert_eq!(done.percentage, 100.0);
    }

    #[test]
    fn test_take_courses_empty_list_is_complete() {
        let rule = Rule::TakeCourses { courses: vec![] };

        let progress = evaluate_progress(&rule, &[]);
        assert_eq!(progress.status, ProgressStatus::Completed);
        assert_eq!(progress.percentage, 100.0);
    }

    #[test]
    fn test_take_from_list_by_course_count() {
        let rule = Rule::TakeFromList {
            count: 2,
            count_type: CountType::Courses,
            courses: codes(&["MATH 1300", "MATH 1301", "MATH 2810"]),
        };

        let progress = evaluate_progress(&rule, &taken(&[("MATH 1300", 4)]));
        assert_eq!(progress.status, ProgressStatus::InProgress);
        assert_eq!(progress.percentage, 50.0);
    }

    #[test]
    fn test_take_from_list_by_credits_caps_at_100() {
        let rule = Rule::TakeFromList {
            count: 6,
            count_type: CountType::Credits,
            courses: codes(&["MATH 1300", "MATH 1301", "MATH 2810"]),
        };

        let over = evaluate_progress(
            &rule,
            &taken(&[("MATH 1300", 4), ("MATH 1301", 4), ("MATH 2810", 3)]),
        );
        assert_eq!(over.status, ProgressStatus::Completed);
        assert_eq!(over.percentage, 100.0);

        match over.detail {
            ProgressDetail::FromList {
                matched_credits, ..
            } => assert_eq!(matched_credits, 11),
            _ => panic!("expected FromList detail"),
        }
    }

    #[test]
    fn test_take_any_courses_progress() {
        let rule = Rule::TakeAnyCourses {
            filter: CourseFilter::SubjectNumber {
                subjects: vec!["CS".to_string()],
                number: None,
                excluded_courses: vec![],
            },
            credits_required: 12,
        };

        let progress = evaluate_progress(
            &rule,
            &taken(&[("CS 1101", 3), ("CS 2201", 3), ("HIST 2700", 3)]),
        );
        assert_eq!(progress.status, ProgressStatus::InProgress);
        assert_eq!(progress.percentage, 50.0);

        match progress.detail {
            ProgressDetail::AnyCourses { credits_matched, .. } => {
                assert_eq!(credits_matched, 6)
            }
            _ => panic!("expected AnyCourses detail"),
        }
    }

    #[test]
    fn test_group_and_averages_percentages() {
        let rule = Rule::Group {
            operator: Operator::And,
            rules: vec![
                Rule::TakeCourses {
                    courses: codes(&["CS 1101"]),
                },
                Rule::TakeCourses {
                    courses: codes(&["CS 2201", "CS 2212"]),
                },
            ],
        };

        let progress = evaluate_progress(&rule, &taken(&[("CS 1101", 3), ("CS 2201", 3)]));
        assert_eq!(progress.status, ProgressStatus::InProgress);
        assert_eq!(progress.percentage, 75.0);
    }

    #[test]
    fn test_group_and_status_edges() {
        let rule = Rule::Group {
            operator: Operator::And,
            rules: vec![
                Rule::TakeCourses {
                    courses: codes(&["CS 1101"]),
                },
                Rule::TakeCourses {
                    courses: codes(&["CS 2201"]),
                },
            ],
        };

        let untouched = evaluate_progress(&rule, &[]);
        assert_eq!(untouched.status, ProgressStatus::NotStarted);

        let done = evaluate_progress(&rule, &taken(&[("CS 1101", 3), ("CS 2201", 3)]));
        assert_eq!(done.status, ProgressStatus::Completed);
    }

    #[test]
    fn test_group_or_takes_max_and_tracks_active_option() {
        let rule = Rule::Group {
            operator: Operator::Or,
            rules: vec![
                Rule::TakeCourses {
                    courses: codes(&["MATH 1300", "MATH 1301"]),
                },
                Rule::TakeCourses {
                    courses: codes(&["MATH 1310"]),
                },
            ],
        };

        let progress = evaluate_progress(&rule, &taken(&[("MATH 1310", 4)]));
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.status, ProgressStatus::Completed);

        match progress.detail {
            ProgressDetail::Group { active_option, .. } => assert_eq!(active_option, Some(1)),
            _ => panic!("expected Group detail"),
        }
    }

    #[test]
    fn test_group_or_tie_picks_first_declared() {
        let rule = Rule::Group {
            operator: Operator::Or,
            rules: vec![
                Rule::TakeCourses {
                    courses: codes(&["MATH 1300"]),
                },
                Rule::TakeCourses {
                    courses: codes(&["MATH 1310"]),
                },
            ],
        };

        let progress = evaluate_progress(&rule, &[]);
        match progress.detail {
            ProgressDetail::Group { active_option, .. } => assert_eq!(active_option, Some(0)),
            _ => panic!("expected Group detail"),
        }
    }
}
