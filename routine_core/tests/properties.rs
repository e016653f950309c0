//! Property tests: every generated routine satisfies the routine invariants,
//! for the built-in catalog and for arbitrary well-formed catalogs.

use proptest::prelude::*;
use routine_core::composer::resolve_volume;
use routine_core::constraints;
use routine_core::{
    default_catalog, generate, Catalog, DifficultyTier, ExerciseRecord, MuscleGroup, Routine,
    Tuning, WorkoutPreferences,
};
use std::collections::HashSet;

const TAGS: [&str; 6] = [
    "dumbbells",
    "barbell",
    "kettlebell",
    "resistance-bands",
    "bench",
    "pull-up-bar",
];

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_level() -> impl Strategy<Value = DifficultyTier> {
    prop::sample::select(DifficultyTier::ALL.to_vec())
}

fn arb_group() -> impl Strategy<Value = MuscleGroup> {
    prop::sample::select(MuscleGroup::ALL.to_vec())
}

fn arb_prefs() -> impl Strategy<Value = WorkoutPreferences> {
    (
        10u32..=120,
        arb_level(),
        prop::sample::subsequence(TAGS.to_vec(), 0..=TAGS.len()),
        prop::sample::subsequence(MuscleGroup::ALL.to_vec(), 0..=MuscleGroup::ALL.len()),
    )
        .prop_map(|(minutes, level, equipment, targets)| {
            WorkoutPreferences::new(minutes, level)
                .with_equipment(equipment)
                .with_targets(targets)
        })
}

fn arb_record(index: usize) -> impl Strategy<Value = ExerciseRecord> {
    (
        arb_group(),
        prop::collection::vec(arb_group(), 0..3),
        arb_level(),
        prop::sample::subsequence(TAGS.to_vec(), 0..=2),
        (0i64..=60, 1i64..=6, 0i64..=120),
        (1i64..=5, 1i64..=20),
    )
        .prop_map(move |(primary, secondary, tier, equipment, timing, volume)| {
            ExerciseRecord::new(format!("ex_{:03}", index), format!("Exercise {}", index), primary, tier)
                .secondary(&secondary)
                .equipment(&equipment)
                .timing(timing.0, timing.1, timing.2)
                .volume(volume.0, volume.1)
                .steps(&["Move"])
        })
}

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    (1usize..30)
        .prop_flat_map(|n| (0..n).map(arb_record).collect::<Vec<_>>())
        .prop_map(|records| Catalog::load(records).expect("generated records are well-formed"))
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

fn assert_invariants(routine: &Routine, catalog: &Catalog) -> Result<(), TestCaseError> {
    let prefs = &routine.preferences;
    let tuning = Tuning::default();
    let budget = prefs.budget_seconds();
    let ceiling = budget * 120 / 100;
    let floor = (budget * 70).div_ceil(100);

    let ids: HashSet<&str> = routine.exercise_ids().collect();
    prop_assert_eq!(ids.len(), routine.entries.len(), "duplicate exercise");

    prop_assert!(routine.total_seconds <= ceiling);
    let sum: u32 = routine.entries.iter().map(|e| e.estimated_seconds).sum();
    prop_assert_eq!(sum, routine.total_seconds);

    for entry in &routine.entries {
        prop_assert!(entry.exercise.equipment.is_subset(&prefs.equipment));
        prop_assert!(entry.exercise.difficulty <= prefs.fitness_level);
    }

    if routine.total_seconds < floor {
        for exercise in constraints::admissible(prefs, catalog) {
            if ids.contains(exercise.id.as_str()) {
                continue;
            }
            let cost = resolve_volume(exercise, prefs.fitness_level, &tuning).seconds;
            prop_assert!(
                routine.total_seconds + cost > ceiling,
                "{} still fits below the floor",
                exercise.id
            );
        }
    }

    for group in &routine.uncovered_groups {
        prop_assert!(prefs.targets().contains(group));
        prop_assert!(routine.entries.iter().all(|e| e.exercise.primary_muscle != *group));
    }

    assert_coverage(routine, catalog)
}

/// A target group is covered whenever one of its admissible primary exercises
/// still fits under the overall ceiling
fn assert_coverage(routine: &Routine, catalog: &Catalog) -> Result<(), TestCaseError> {
    let prefs = &routine.preferences;
    let tuning = Tuning::default();
    let ceiling = prefs.budget_seconds() * 120 / 100;

    for group in prefs.targets() {
        if routine.entries.iter().any(|e| e.exercise.primary_muscle == group) {
            continue;
        }
        prop_assert!(routine.uncovered_groups.contains(&group));
        for exercise in constraints::admissible(prefs, catalog).filter(|e| e.primary_muscle == group) {
            let cost = resolve_volume(exercise, prefs.fitness_level, &tuning).seconds;
            prop_assert!(
                routine.total_seconds + cost > ceiling,
                "{} uncovered although {} ({}s) fits in {}s of {}s",
                group,
                exercise.id,
                cost,
                routine.total_seconds,
                ceiling
            );
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Routines from the built-in catalog hold every invariant.
    #[test]
    fn default_catalog_routines_hold_invariants(
        prefs in arb_prefs(),
        seed in prop::option::of(any::<u64>()),
    ) {
        let catalog = default_catalog();
        let routine = generate(&prefs, catalog, seed).unwrap();
        assert_invariants(&routine, catalog)?;
    }

    /// Arbitrary catalogs never make the composer produce an invalid routine.
    #[test]
    fn arbitrary_catalogs_never_fail_validation(
        catalog in arb_catalog(),
        prefs in arb_prefs(),
        seed in prop::option::of(any::<u64>()),
    ) {
        let routine = generate(&prefs, &catalog, seed);
        prop_assert!(routine.is_ok(), "generation failed: {:?}", routine.as_ref().err());
        assert_invariants(&routine.unwrap(), &catalog)?;
    }

    /// Short full-body routines still reach every group that has room left.
    #[test]
    fn short_routines_cover_reachable_groups(
        minutes in 10u32..=25,
        level in arb_level(),
        equipment in prop::sample::subsequence(TAGS.to_vec(), 0..=2),
        seed in prop::option::of(any::<u64>()),
    ) {
        let catalog = default_catalog();
        let prefs = WorkoutPreferences::new(minutes, level).with_equipment(equipment);
        let routine = generate(&prefs, catalog, seed).unwrap();
        assert_coverage(&routine, catalog)?;
    }

    /// Same inputs serialize to the same bytes.
    #[test]
    fn generation_is_deterministic(
        prefs in arb_prefs(),
        seed in prop::option::of(any::<u64>()),
    ) {
        let catalog = default_catalog();
        let first = serde_json::to_vec(&generate(&prefs, catalog, seed).unwrap()).unwrap();
        let second = serde_json::to_vec(&generate(&prefs, catalog, seed).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}
