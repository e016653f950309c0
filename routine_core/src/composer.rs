//! Routine composition: time budgeting and seeded greedy selection.
//!
//! The composer works in six steps:
//! 1. Build a candidate pool per target group; empty pools leave the group uncovered
//! 2. Split the time budget evenly across groups with candidates
//! 3. Greedily fill each group's budget from its (optionally shuffled) pool,
//!    never reusing an exercise and never passing the group's allowance
//! 4. Give every target group still missing a primary-muscle exercise its
//!    cheapest one, as long as the overall ceiling allows
//! 5. Top up with the cheapest unused admissible exercises if the routine is
//!    still below the floor
//! 6. Report every target group left without a primary-muscle exercise

use crate::config::Tuning;
use crate::constraints::{self, Candidate, Relevance};
use crate::preferences::WorkoutPreferences;
use crate::types::{DifficultyTier, Exercise, MuscleGroup, RoutineEntry, Slot};
use crate::Catalog;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeSet, HashSet};

/// Sets, reps and time for one exercise at a given fitness level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Volume {
    pub sets: u32,
    pub reps: u32,
    pub seconds: u32,
}

/// Scale default reps by the level's percentage, rounding half up
pub fn scale_reps(default_reps: u32, level: DifficultyTier, tuning: &Tuning) -> u32 {
    let percent = u64::from(tuning.rep_scale_percent.for_level(level));
    let scaled = (u64::from(default_reps) * percent + 50) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

pub fn resolve_volume(exercise: &Exercise, level: DifficultyTier, tuning: &Tuning) -> Volume {
    let sets = exercise.default_sets;
    let reps = scale_reps(exercise.default_reps, level, tuning);
    Volume {
        sets,
        reps,
        seconds: exercise.time_cost.estimate(sets, reps),
    }
}

fn percent_of(value: u32, percent: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Time budget of one routine, split across the groups that have candidates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeBudget {
    total: u32,
    floor: u32,
    ceiling: u32,
    overshoot_percent: u32,
    groups: Vec<(MuscleGroup, u32)>,
}

impl TimeBudget {
    /// `groups` must be in enum order; the first one absorbs the remainder
    pub fn new(prefs: &WorkoutPreferences, groups: &[MuscleGroup], tuning: &Tuning) -> Self {
        let total = prefs.budget_seconds();
        // Round the floor up so that "at least N%" holds in whole seconds
        let floor = u32::try_from(
            (u64::from(total) * u64::from(tuning.floor_percent)).div_ceil(100),
        )
        .unwrap_or(u32::MAX);
        let ceiling = percent_of(total, 100 + tuning.overshoot_percent);

        let groups = match u32::try_from(groups.len()) {
            Ok(n) if n > 0 => {
                let share = total / n;
                let remainder = total % n;
                groups
                    .iter()
                    .enumerate()
                    .map(|(i, &g)| (g, if i == 0 { share + remainder } else { share }))
                    .collect()
            }
            _ => Vec::new(),
        };

        Self {
            total,
            floor,
            ceiling,
            overshoot_percent: tuning.overshoot_percent,
            groups,
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub fn group_budget(&self, group: MuscleGroup) -> Option<u32> {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, seconds)| *seconds)
    }

    /// Group budget plus the overshoot tolerance
    pub fn allowance(&self, group: MuscleGroup) -> Option<u32> {
        self.group_budget(group)
            .map(|seconds| percent_of(seconds, 100 + self.overshoot_percent))
    }

    pub fn groups(&self) -> impl Iterator<Item = MuscleGroup> + '_ {
        self.groups.iter().map(|(g, _)| *g)
    }
}

/// Target groups that have at least one admissible candidate, in enum order
pub fn covered_groups(prefs: &WorkoutPreferences, catalog: &Catalog) -> Vec<MuscleGroup> {
    prefs
        .targets()
        .into_iter()
        .filter(|&g| !constraints::candidates_for_group(g, prefs, catalog).is_empty())
        .collect()
}

/// Composer output, before it is wrapped into a `Routine`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composition {
    pub entries: Vec<RoutineEntry>,
    pub total_seconds: u32,
    pub uncovered_groups: BTreeSet<MuscleGroup>,
}

/// Instruction steps followed by the resolved volume line
pub fn display_instructions(exercise: &Exercise, volume: &Volume) -> Vec<String> {
    let mut lines = exercise.instructions.clone();
    let volume_line = if volume.sets > 1 && exercise.time_cost.rest_seconds > 0 {
        format!(
            "Complete {} sets of {} reps, resting {} s between sets.",
            volume.sets, volume.reps, exercise.time_cost.rest_seconds
        )
    } else if volume.sets > 1 {
        format!("Complete {} sets of {} reps.", volume.sets, volume.reps)
    } else {
        format!("Complete 1 set of {} reps.", volume.reps)
    };
    lines.push(volume_line);
    lines
}

fn entry(exercise: &Exercise, slot: Slot, volume: Volume) -> RoutineEntry {
    RoutineEntry {
        exercise: exercise.clone(),
        slot,
        sets: volume.sets,
        reps: volume.reps,
        estimated_seconds: volume.seconds,
        instructions: display_instructions(exercise, &volume),
    }
}

fn has_primary(entries: &[RoutineEntry], group: MuscleGroup) -> bool {
    entries.iter().any(|e| e.exercise.primary_muscle == group)
}

/// Group slots in enum order, top-ups last
fn slot_rank(slot: Slot) -> (u8, Option<MuscleGroup>) {
    match slot {
        Slot::Group(group) => (0, Some(group)),
        Slot::TopUp => (1, None),
    }
}

/// Shuffle primary and secondary matches separately, keeping primaries first
fn arrange<'a>(mut pool: Vec<Candidate<'a>>, rng: Option<&mut StdRng>) -> Vec<Candidate<'a>> {
    if let Some(rng) = rng {
        let split = pool
            .iter()
            .position(|c| c.relevance == Relevance::Secondary)
            .unwrap_or(pool.len());
        let (primary, secondary) = pool.split_at_mut(split);
        primary.shuffle(&mut *rng);
        secondary.shuffle(&mut *rng);
    }
    pool
}

/// Select and order exercises for `prefs`
///
/// Deterministic: the same catalog, preferences, tuning and seed always give
/// the same composition. Without a seed the candidate order is the sorted
/// order from `candidates_for_group`.
pub fn compose(
    catalog: &Catalog,
    prefs: &WorkoutPreferences,
    tuning: &Tuning,
    seed: Option<u64>,
) -> Composition {
    let targets = prefs.targets();
    let mut rng = seed.map(StdRng::seed_from_u64);

    let pools: Vec<(MuscleGroup, Vec<Candidate<'_>>)> = targets
        .iter()
        .map(|&g| (g, constraints::candidates_for_group(g, prefs, catalog)))
        .collect();

    let covered: Vec<MuscleGroup> = pools
        .iter()
        .filter(|(_, pool)| !pool.is_empty())
        .map(|(g, _)| *g)
        .collect();
    let budget = TimeBudget::new(prefs, &covered, tuning);

    let mut used: HashSet<&str> = HashSet::new();
    let mut entries = Vec::new();
    let mut total = 0u32;

    for (group, pool) in pools {
        let (Some(group_budget), Some(allowance)) =
            (budget.group_budget(group), budget.allowance(group))
        else {
            tracing::debug!("No admissible candidates for {}", group);
            continue;
        };

        let mut spent = 0u32;
        for candidate in arrange(pool, rng.as_mut()) {
            if spent >= group_budget {
                break;
            }
            let exercise = candidate.exercise;
            if used.contains(exercise.id.as_str()) {
                continue;
            }
            let volume = resolve_volume(exercise, prefs.fitness_level, tuning);
            if spent.saturating_add(volume.seconds) > allowance {
                tracing::trace!(
                    "Skipping {} for {}: {}s would exceed allowance {}s",
                    exercise.id,
                    group,
                    spent + volume.seconds,
                    allowance
                );
                continue;
            }

            used.insert(exercise.id.as_str());
            spent += volume.seconds;
            entries.push(entry(exercise, Slot::Group(group), volume));
        }

        tracing::debug!(
            "Group {}: {}s of {}s budget (allowance {}s)",
            group,
            spent,
            group_budget,
            allowance
        );
        total += spent;
    }

    for &group in &targets {
        if has_primary(&entries, group) {
            continue;
        }
        let cheapest = constraints::admissible(prefs, catalog)
            .filter(|e| e.primary_muscle == group && !used.contains(e.id.as_str()))
            .map(|e| (e, resolve_volume(e, prefs.fitness_level, tuning)))
            .min_by(|(a, va), (b, vb)| va.seconds.cmp(&vb.seconds).then_with(|| a.id.cmp(&b.id)));
        let Some((exercise, volume)) = cheapest else {
            continue;
        };
        if total.saturating_add(volume.seconds) > budget.ceiling() {
            tracing::debug!(
                "Cannot cover {}: {} needs {}s, {}s left under the ceiling",
                group,
                exercise.id,
                volume.seconds,
                budget.ceiling().saturating_sub(total)
            );
            continue;
        }

        tracing::debug!("Covering {} with {} ({}s)", group, exercise.id, volume.seconds);
        used.insert(exercise.id.as_str());
        total += volume.seconds;
        entries.push(entry(exercise, Slot::Group(group), volume));
    }
    // Stable, so each group's coverage entry lands after its greedy picks
    entries.sort_by_key(|e| slot_rank(e.slot));

    if total < budget.floor() {
        let mut extras: Vec<(&Exercise, Volume)> = constraints::admissible(prefs, catalog)
            .filter(|e| !used.contains(e.id.as_str()))
            .map(|e| (e, resolve_volume(e, prefs.fitness_level, tuning)))
            .collect();
        extras.sort_by(|(a, va), (b, vb)| va.seconds.cmp(&vb.seconds).then_with(|| a.id.cmp(&b.id)));

        for (exercise, volume) in extras {
            if total >= budget.floor() {
                break;
            }
            if total.saturating_add(volume.seconds) > budget.ceiling() {
                continue;
            }
            used.insert(exercise.id.as_str());
            total += volume.seconds;
            entries.push(entry(exercise, Slot::TopUp, volume));
        }

        if total < budget.floor() {
            tracing::debug!(
                "Admissible catalog exhausted at {}s, below the {}s floor",
                total,
                budget.floor()
            );
        }
    }

    let uncovered_groups = targets
        .into_iter()
        .filter(|&g| !has_primary(&entries, g))
        .collect();

    Composition {
        entries,
        total_seconds: total,
        uncovered_groups,
    }
}
