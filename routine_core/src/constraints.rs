//! Admissibility rules for a single exercise under a preference set.

use crate::catalog::Catalog;
use crate::preferences::WorkoutPreferences;
use crate::types::{Exercise, MuscleGroup};

/// How an exercise relates to a muscle group. Primary sorts before Secondary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relevance {
    Primary,
    Secondary,
}

/// An admissible exercise in a group's candidate pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub exercise: &'a Exercise,
    pub relevance: Relevance,
}

/// Required equipment is a subset of what the user has.
///
/// With no equipment available only bodyweight exercises pass.
pub fn equipment_available(exercise: &Exercise, prefs: &WorkoutPreferences) -> bool {
    exercise.equipment.is_subset(&prefs.equipment)
}

/// The exercise is not harder than the user's fitness level
pub fn within_level(exercise: &Exercise, prefs: &WorkoutPreferences) -> bool {
    exercise.difficulty <= prefs.fitness_level
}

pub fn is_admissible(exercise: &Exercise, prefs: &WorkoutPreferences) -> bool {
    equipment_available(exercise, prefs) && within_level(exercise, prefs)
}

pub fn relevance(exercise: &Exercise, group: MuscleGroup) -> Option<Relevance> {
    if exercise.primary_muscle == group {
        Some(Relevance::Primary)
    } else if exercise.secondary_muscles.contains(&group) {
        Some(Relevance::Secondary)
    } else {
        None
    }
}

/// Every admissible exercise in the catalog, in ascending id order
pub fn admissible<'a>(
    prefs: &'a WorkoutPreferences,
    catalog: &'a Catalog,
) -> impl Iterator<Item = &'a Exercise> + 'a {
    catalog.all().iter().filter(move |e| is_admissible(e, prefs))
}

/// Admissible exercises working `group`: primary matches first, then
/// secondary matches, ties broken by ascending id
pub fn candidates_for_group<'a>(
    group: MuscleGroup,
    prefs: &WorkoutPreferences,
    catalog: &'a Catalog,
) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate<'a>> = catalog
        .all()
        .iter()
        .filter(|e| is_admissible(e, prefs))
        .filter_map(|exercise| {
            relevance(exercise, group).map(|relevance| Candidate {
                exercise,
                relevance,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        a.relevance
            .cmp(&b.relevance)
            .then_with(|| a.exercise.id.cmp(&b.exercise.id))
    });
    candidates
}
