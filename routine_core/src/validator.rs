//! Post-hoc invariant checks over composer output.
//!
//! The validator never repairs a routine. The first broken invariant is
//! returned as a `RoutineInvariantViolation`, which the generation service
//! treats as an internal defect.

use crate::composer::{self, TimeBudget};
use crate::config::Tuning;
use crate::constraints::{self, Relevance};
use crate::types::{MuscleGroup, Routine, RoutineEntry, Slot};
use crate::Catalog;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// The invariants a generated routine must satisfy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Invariant {
    UnknownExercise,
    UniqueExercise,
    EquipmentSubset,
    DifficultyCeiling,
    GroupRelevance,
    ExecutionOrder,
    ResolvedVolume,
    TotalDuration,
    TimeCeiling,
    TimeFloor,
    CoverageReport,
    Coverage,
}

impl Invariant {
    pub fn name(&self) -> &'static str {
        match self {
            Invariant::UnknownExercise => "known-exercise",
            Invariant::UniqueExercise => "unique-exercise",
            Invariant::EquipmentSubset => "equipment-subset",
            Invariant::DifficultyCeiling => "difficulty-ceiling",
            Invariant::GroupRelevance => "group-relevance",
            Invariant::ExecutionOrder => "execution-order",
            Invariant::ResolvedVolume => "resolved-volume",
            Invariant::TotalDuration => "total-duration",
            Invariant::TimeCeiling => "time-ceiling",
            Invariant::TimeFloor => "time-floor",
            Invariant::CoverageReport => "coverage-report",
            Invariant::Coverage => "coverage",
        }
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A broken routine invariant, with the offending exercise when there is one
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutineInvariantViolation {
    pub invariant: Invariant,
    pub exercise_id: Option<String>,
    pub detail: String,
}

impl fmt::Display for RoutineInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invariant '{}' violated", self.invariant)?;
        if let Some(id) = &self.exercise_id {
            write!(f, " by '{}'", id)?;
        }
        write!(f, ": {}", self.detail)
    }
}

impl std::error::Error for RoutineInvariantViolation {}

type Check = std::result::Result<(), RoutineInvariantViolation>;

fn violation(invariant: Invariant, entry: Option<&RoutineEntry>, detail: String) -> Check {
    Err(RoutineInvariantViolation {
        invariant,
        exercise_id: entry.map(|e| e.exercise.id.clone()),
        detail,
    })
}

/// Re-check every routine invariant against the catalog it was built from
pub fn validate(routine: &Routine, catalog: &Catalog, tuning: &Tuning) -> Check {
    let prefs = &routine.preferences;
    let covered = composer::covered_groups(prefs, catalog);
    let budget = TimeBudget::new(prefs, &covered, tuning);

    check_entries(routine, catalog, tuning, &covered)?;
    check_order(routine)?;
    check_time(routine, catalog, tuning, &budget)?;
    check_coverage(routine, catalog, tuning, &budget)
}

fn check_entries(
    routine: &Routine,
    catalog: &Catalog,
    tuning: &Tuning,
    covered: &[MuscleGroup],
) -> Check {
    let prefs = &routine.preferences;
    let mut seen = HashSet::new();

    for entry in &routine.entries {
        let id = entry.exercise.id.as_str();
        let Ok(known) = catalog.by_id(id) else {
            return violation(
                Invariant::UnknownExercise,
                Some(entry),
                "not in the catalog".into(),
            );
        };
        if *known != entry.exercise {
            return violation(
                Invariant::UnknownExercise,
                Some(entry),
                "differs from the catalog definition".into(),
            );
        }

        if !seen.insert(id) {
            return violation(
                Invariant::UniqueExercise,
                Some(entry),
                "appears more than once".into(),
            );
        }

        if !constraints::equipment_available(known, prefs) {
            return violation(
                Invariant::EquipmentSubset,
                Some(entry),
                format!(
                    "requires {:?}, available {:?}",
                    known.equipment, prefs.equipment
                ),
            );
        }

        if !constraints::within_level(known, prefs) {
            return violation(
                Invariant::DifficultyCeiling,
                Some(entry),
                format!(
                    "{} exercise above {} level",
                    known.difficulty, prefs.fitness_level
                ),
            );
        }

        if let Slot::Group(group) = entry.slot {
            if !covered.contains(&group) {
                return violation(
                    Invariant::GroupRelevance,
                    Some(entry),
                    format!("scheduled for {} which has no candidate pool", group),
                );
            }
            if constraints::relevance(known, group).is_none() {
                return violation(
                    Invariant::GroupRelevance,
                    Some(entry),
                    format!("scheduled for {} but does not work it", group),
                );
            }
        }

        let volume = composer::resolve_volume(known, prefs.fitness_level, tuning);
        if (entry.sets, entry.reps, entry.estimated_seconds)
            != (volume.sets, volume.reps, volume.seconds)
        {
            return violation(
                Invariant::ResolvedVolume,
                Some(entry),
                format!(
                    "{}x{} in {}s, expected {}x{} in {}s",
                    entry.sets,
                    entry.reps,
                    entry.estimated_seconds,
                    volume.sets,
                    volume.reps,
                    volume.seconds
                ),
            );
        }
    }

    Ok(())
}

/// Group slots in enum order, top-up entries last
fn check_order(routine: &Routine) -> Check {
    let mut last_group: Option<MuscleGroup> = None;
    let mut topped_up = false;

    for entry in &routine.entries {
        match entry.slot {
            Slot::Group(group) => {
                if topped_up {
                    return violation(
                        Invariant::ExecutionOrder,
                        Some(entry),
                        format!("{} entry after the top-up entries", group),
                    );
                }
                if last_group.is_some_and(|last| last > group) {
                    return violation(
                        Invariant::ExecutionOrder,
                        Some(entry),
                        format!("{} entry out of group order", group),
                    );
                }
                last_group = Some(group);
            }
            Slot::TopUp => topped_up = true,
        }
    }

    Ok(())
}

fn check_time(routine: &Routine, catalog: &Catalog, tuning: &Tuning, budget: &TimeBudget) -> Check {
    let sum: u64 = routine
        .entries
        .iter()
        .map(|e| u64::from(e.estimated_seconds))
        .sum();
    if sum != u64::from(routine.total_seconds) {
        return violation(
            Invariant::TotalDuration,
            None,
            format!(
                "total {}s but entries sum to {}s",
                routine.total_seconds, sum
            ),
        );
    }

    if routine.total_seconds > budget.ceiling() {
        return violation(
            Invariant::TimeCeiling,
            None,
            format!(
                "{}s exceeds the {}s ceiling",
                routine.total_seconds,
                budget.ceiling()
            ),
        );
    }

    if routine.total_seconds < budget.floor() {
        // Short routines are fine only when nothing else fits
        let used: HashSet<&str> = routine.exercise_ids().collect();
        let prefs = &routine.preferences;
        let addable = constraints::admissible(prefs, catalog)
            .filter(|e| !used.contains(e.id.as_str()))
            .find(|e| {
                let volume = composer::resolve_volume(e, prefs.fitness_level, tuning);
                routine.total_seconds.saturating_add(volume.seconds) <= budget.ceiling()
            });
        if let Some(exercise) = addable {
            return violation(
                Invariant::TimeFloor,
                None,
                format!(
                    "{}s is below the {}s floor while '{}' still fits",
                    routine.total_seconds,
                    budget.floor(),
                    exercise.id
                ),
            );
        }
    }

    Ok(())
}

fn check_coverage(
    routine: &Routine,
    catalog: &Catalog,
    tuning: &Tuning,
    budget: &TimeBudget,
) -> Check {
    let prefs = &routine.preferences;
    let primaries: BTreeSet<MuscleGroup> = routine
        .entries
        .iter()
        .map(|e| e.exercise.primary_muscle)
        .collect();
    let expected: BTreeSet<MuscleGroup> = prefs
        .targets()
        .into_iter()
        .filter(|g| !primaries.contains(g))
        .collect();

    if expected != routine.uncovered_groups {
        return violation(
            Invariant::CoverageReport,
            None,
            format!(
                "reported uncovered {:?}, actually uncovered {:?}",
                routine.uncovered_groups, expected
            ),
        );
    }

    for &group in &routine.uncovered_groups {
        let fitting = constraints::candidates_for_group(group, prefs, catalog)
            .into_iter()
            .filter(|c| c.relevance == Relevance::Primary)
            .find(|c| {
                let seconds =
                    composer::resolve_volume(c.exercise, prefs.fitness_level, tuning).seconds;
                routine.total_seconds.saturating_add(seconds) <= budget.ceiling()
            });
        if let Some(candidate) = fitting {
            return violation(
                Invariant::Coverage,
                None,
                format!(
                    "{} left uncovered although '{}' fits under the {}s ceiling",
                    group,
                    candidate.exercise.id,
                    budget.ceiling()
                ),
            );
        }
    }

    Ok(())
}
