use crate::{constraint::Constraint, course::Course, course_code::CourseCode, rule::Rule};
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// A single gradeable unit inside a section, carrying a matching rule
/// and a credit target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Unique within the owning section
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Capacity consulted by the assigner; a soft preference, not a
    /// hard cap
    #[serde(default)]
    pub credits_required: i32,
    pub rule: Rule,
    /// Free-form advisory text shown alongside the requirement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints_structured: Vec<Constraint>,
}

/// A named grouping of requirements inside a program's tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementSection {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub credits_required: i32,
    pub requirements: Vec<Requirement>,
}

/// A program's whole requirement tree, stored as a JSON column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRequirements {
    pub sections: Vec<RequirementSection>,
    /// Program-level constraints that may reference requirements
    /// across sections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints_structured: Vec<Constraint>,
}

/// A single (section, requirement) match with its specificity score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementMatch {
    pub section_id: String,
    pub requirement_id: String,
    pub specificity: f64,
}

impl RequirementMatch {
    /// Dot-joined composite key, the unit of assignment
    pub fn qualified_id(&self) -> String {
        format!("{}.{}", self.section_id, self.requirement_id)
    }
}

impl ProgramRequirements {
    /// Every requirement whose rule accepts the course, most specific
    /// first. Equal scores keep section/requirement declaration order
    /// (stable sort); declaration order is the implicit priority.
    pub fn find_matching_requirements(&self, course: &Course) -> Vec<RequirementMatch> {
        let mut matches = Vec::new();

        for section in &self.sections {
            for requirement in &section.requirements {
                let result = requirement.rule.evaluate(course);
                if result.matches {
                    matches.push(RequirementMatch {
                        section_id: section.id.clone(),
                        requirement_id: requirement.id.clone(),
                        specificity: result.specificity,
                    });
                }
            }
        }

        matches.sort_by(|a, b| {
            b.specificity
                .partial_cmp(&a.specificity)
                .unwrap_or(Ordering::Equal)
        });
        matches
    }

    /// Looks up a requirement by its dot-joined composite key
    pub fn requirement(&self, qualified_id: &str) -> Option<(&RequirementSection, &Requirement)> {
        let (section_id, requirement_id) = qualified_id.split_once('.')?;
        let section = self.sections.iter().find(|s| s.id == section_id)?;
        let requirement = section.requirements.iter().find(|r| r.id == requirement_id)?;
        Some((section, requirement))
    }

    /// First double-count exception naming the course, searching the
    /// program-level constraints before requirement-level ones
    pub fn double_count_for(&self, code: &CourseCode) -> Option<&[String]> {
        self.constraints_structured
            .iter()
            .chain(
                self.sections
                    .iter()
                    .flat_map(|s| s.requirements.iter())
                    .flat_map(|r| r.constraints_structured.iter()),
            )
            .find_map(|constraint| match constraint {
                Constraint::AllowDoubleCount {
                    course,
                    requirements,
                } if course == code => Some(requirements.as_slice()),
                _ => None,
            })
    }

    /// Load-time configuration check: duplicate composite keys and
    /// malformed filters, reported as descriptive strings. Callers
    /// decide whether to reject the configuration; the engine itself
    /// treats bad rules as no-matches.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for section in &self.sections {
            for requirement in &section.requirements {
                let key = format!("{}.{}", section.id, requirement.id);
                if !seen.insert(key.clone()) {
                    errors.push(format!("duplicate requirement id {key}"));
                }
                if let Err(e) = requirement.rule.validate_filters() {
                    errors.push(format!("{key}: {e}"));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credits::CreditRange;
    use crate::filter::CourseFilter;

    fn course(code: &str) -> Course {
        Course::new(code.parse().unwrap(), "Test Course", CreditRange::Single(3.0))
    }

    fn codes(list: &[&str]) -> Vec<CourseCode> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn requirement(id: &str, rule: Rule) -> Requirement {
        Requirement {
            id: id.to_string(),
            title: String::new(),
            credits_required: 3,
            rule,
            constraints: None,
            constraints_structured: vec![],
        }
    }

    fn tree() -> ProgramRequirements {
        ProgramRequirements {
            sections: vec![
                RequirementSection {
                    id: "core".to_string(),
                    title: "Core".to_string(),
                    credits_required: 6,
                    requirements: vec![
                        requirement(
                            "calculus",
                            Rule::TakeCourses {
                                courses: codes(&["MATH 1300", "MATH 1301"]),
                            },
                        ),
                        requirement(
                            "math_elective",
                            Rule::TakeFromList {
                                count: 1,
                                count_type: Default::default(),
                                courses: codes(&["MATH 1300", "MATH 2810"]),
                            },
                        ),
                    ],
                },
                RequirementSection {
                    id: "electives".to_string(),
                    title: "Electives".to_string(),
                    credits_required: 12,
                    requirements: vec![requirement(
                        "open",
                        Rule::TakeAnyCourses {
                            filter: CourseFilter::Placeholder,
                            credits_required: 12,
                        },
                    )],
                },
            ],
            constraints_structured: vec![],
        }
    }

    #[test]
    fn test_matches_sorted_by_specificity() {
        let matches = tree().find_matching_requirements(&course("MATH 1300"));

        let ids: Vec<String> = matches.iter().map(RequirementMatch::qualified_id).collect();
        assert_eq!(
            ids,
            vec!["core.calculus", "core.math_elective", "electives.open"]
        );
        assert_eq!(matches[0].specificity, 100.0);
        assert_eq!(matches[1].specificity, 80.0);
        assert_eq!(matches[2].specificity, 10.0);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let tree = ProgramRequirements {
            sections: vec![RequirementSection {
                id: "s".to_string(),
                title: String::new(),
                credits_required: 0,
                requirements: vec![
                    requirement(
                        "first",
                        Rule::TakeCourses {
                            courses: codes(&["CS 1101"]),
                        },
                    ),
                    requirement(
                        "second",
                        Rule::TakeCourses {
                            courses: codes(&["CS 1101"]),
                        },
                    ),
                ],
            }],
            constraints_structured: vec![],
        };

        let matches = tree.find_matching_requirements(&course("CS 1101"));
        let ids: Vec<String> = matches.iter().map(|m| m.requirement_id.clone()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_requirement_lookup() {
        let tree = tree();

        assert!(tree.requirement("core.calculus").is_some());
        assert!(tree.requirement("core.missing").is_none());
        assert!(tree.requirement("nope.calculus").is_none());
        assert!(tree.requirement("no_dot").is_none());
    }

    #[test]
    fn test_double_count_lookup() {
        let mut tree = tree();
        tree.constraints_structured.push(Constraint::AllowDoubleCount {
            course: "CS 1151".parse().unwrap(),
            requirements: vec!["core.calculus".into(), "electives.open".into()],
        });

        let listed = tree.double_count_for(&"CS 1151".parse().unwrap()).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(tree.double_count_for(&"CS 1101".parse().unwrap()).is_none());
    }

    #[test]
    fn test_validate_reports_duplicates_and_bad_filters() {
        let tree = ProgramRequirements {
            sections: vec![RequirementSection {
                id: "s".to_string(),
                title: String::new(),
                credits_required: 0,
                requirements: vec![
                    requirement(
                        "dup",
                        Rule::TakeCourses {
                            courses: codes(&["CS 1101"]),
                        },
                    ),
                    requirement(
                        "dup",
                        Rule::TakeAnyCourses {
                            filter: CourseFilter::CourseList { courses: vec![] },
                            credits_required: 3,
                        },
                    ),
                ],
            }],
            constraints_structured: vec![],
        };

        let errors = tree.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("duplicate requirement id s.dup"));
        assert!(errors[1].contains("at least one course"));
    }

    #[test]
    fn test_tree_round_trips_through_json() {
        let json = serde_json::to_string(&tree()).unwrap();
        let back: ProgramRequirements = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree());
    }
}
