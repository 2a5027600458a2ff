use crate::{
    constraint::Constraint,
    course::Course,
    filter::Operator,
    requirements::{ProgramRequirements, RequirementMatch},
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A planned course ready for assignment: plan-entry identity plus its
/// resolved catalog course and the credits actually counted (which may
/// differ from the catalog range for transfer/override entries)
#[derive(Debug, Clone)]
pub struct AssignableCourse {
    pub planned_course_id: Uuid,
    pub course: Course,
    pub credits: i32,
}

/// One program associated with the plan. Callers supply these in
/// plan-program list order; that order decides which program sees a
/// course first.
#[derive(Debug, Clone)]
pub struct ProgramContext {
    pub plan_program_id: Uuid,
    pub requirements: ProgramRequirements,
}

/// The committed link between one planned course and one requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    pub plan_program_id: Uuid,
    /// Dot-joined `sectionId.requirementId` composite key
    pub requirement_id: String,
    pub planned_course_id: Uuid,
    pub credits_applied: i32,
}

/// Credits committed so far in one assignment pass, per plan program
/// and composite requirement key. Scoped to a single call; never
/// shared across passes.
type CapacityLedger = HashMap<Uuid, HashMap<String, i32>>;

/// Greedy, deterministic assignment over an entire plan. Planned
/// courses must already be in priority order (semester, then position):
/// earlier-planned courses get first claim on capacity-limited
/// requirements. The result is a pure function of its inputs.
pub fn assign_fulfillments(
    planned: &[AssignableCourse],
    programs: &[ProgramContext],
) -> Vec<Fulfillment> {
    let mut committed: CapacityLedger = HashMap::new();
    let mut fulfillments = Vec::new();

    for entry in planned {
        for program in programs {
            let matches = program.requirements.find_matching_requirements(&entry.course);
            if matches.is_empty() {
                // No match across a program is a normal outcome
                continue;
            }

            // A double-count exception bypasses the one-winner rule
            // for exactly the listed requirement set
            if let Some(listed) = program.requirements.double_count_for(&entry.course.code) {
                for qualified_id in listed {
                    if program.requirements.requirement(qualified_id).is_none() {
                        continue;
                    }
                    commit(
                        &mut fulfillments,
                        &mut committed,
                        program,
                        qualified_id.clone(),
                        entry,
                    );
                }
                continue;
            }

            let candidates = prune_by_section_restrictions(&program.requirements, &matches);
            if candidates.is_empty() {
                continue;
            }

            // Prefer the most specific candidate that still has
            // remaining capacity; if every candidate is full, overflow
            // to the most specific one anyway
            let winner = candidates
                .iter()
                .find(|m| has_remaining_capacity(&program.requirements, &committed, program, m))
                .unwrap_or(&candidates[0]);

            commit(
                &mut fulfillments,
                &mut committed,
                program,
                winner.qualified_id(),
                entry,
            );
        }
    }

    fulfillments
}

/// Applies `require_course_from_sections`: a candidate survives only
/// if the course's other matches cover the listed sections (all for
/// AND, at least one for OR)
fn prune_by_section_restrictions<'a>(
    requirements: &ProgramRequirements,
    matches: &'a [RequirementMatch],
) -> Vec<&'a RequirementMatch> {
    let matched_sections: HashSet<&str> = matches.iter().map(|m| m.section_id.as_str()).collect();

    matches
        .iter()
        .filter(|m| {
            let Some((_, requirement)) = requirements.requirement(&m.qualified_id()) else {
                return false;
            };

            requirement.constraints_structured.iter().all(|constraint| {
                match constraint {
                    Constraint::RequireCourseFromSections { sections, operator } => match operator {
                        Operator::And => sections
                            .iter()
                            .all(|s| matched_sections.contains(s.as_str())),
                        Operator::Or => sections
                            .iter()
                            .any(|s| matched_sections.contains(s.as_str())),
                    },
                    _ => true,
                }
            })
        })
        .collect()
}

fn has_remaining_capacity(
    requirements: &ProgramRequirements,
    committed: &CapacityLedger,
    program: &ProgramContext,
    candidate: &RequirementMatch,
) -> bool {
    let qualified_id = candidate.qualified_id();
    let Some((_, requirement)) = requirements.requirement(&qualified_id) else {
        return false;
    };

    let used = committed
        .get(&program.plan_program_id)
        .and_then(|per_requirement| per_requirement.get(&qualified_id))
        .copied()
        .unwrap_or(0);

    used < requirement.credits_required
}

fn commit(
    fulfillments: &mut Vec<Fulfillment>,
    committed: &mut CapacityLedger,
    program: &ProgramContext,
    requirement_id: String,
    entry: &AssignableCourse,
) {
    *committed
        .entry(program.plan_program_id)
        .or_default()
        .entry(requirement_id.clone())
        .or_insert(0) += entry.credits;

    fulfillments.push(Fulfillment {
        plan_program_id: program.plan_program_id,
        requirement_id,
        planned_course_id: entry.planned_course_id,
        credits_applied: entry.credits,
    });
}
