//! Core domain types for the routine generator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Muscle groups and difficulty tiers
//! - Exercises and their time cost model
//! - Routine entries and generated routines

use crate::preferences::WorkoutPreferences;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Enumerations
// ============================================================================

/// Muscle group targeted by an exercise.
///
/// Declaration order is the canonical "enum order" used when budgeting time
/// and concatenating group selections.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
}

impl MuscleGroup {
    /// All muscle groups in enum order
    pub const ALL: [MuscleGroup; 6] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Core,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Core => "core",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Core => "Core",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MuscleGroup {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        MuscleGroup::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVariant {
                kind: "muscle group",
                value: s.to_string(),
            })
    }
}

/// Difficulty tier of an exercise, also used as the user's fitness level.
///
/// Ordered `Beginner < Intermediate < Advanced`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
}

/// A user's fitness level shares the difficulty scale
pub type FitnessLevel = DifficultyTier;

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] = [
        DifficultyTier::Beginner,
        DifficultyTier::Intermediate,
        DifficultyTier::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Beginner => "beginner",
            DifficultyTier::Intermediate => "intermediate",
            DifficultyTier::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DifficultyTier::Beginner => "Beginner",
            DifficultyTier::Intermediate => "Intermediate",
            DifficultyTier::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DifficultyTier {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        DifficultyTier::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVariant {
                kind: "difficulty tier",
                value: s.to_string(),
            })
    }
}

/// A string did not name any known enum value
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

// ============================================================================
// Equipment tags
// ============================================================================

/// Normalize an equipment tag: trimmed, lowercase.
///
/// Returns `None` for blank tags and for the tags that mean "no equipment"
/// (`bodyweight`, `none`).
pub fn normalize_equipment_tag(tag: &str) -> Option<String> {
    let tag = tag.trim().to_lowercase();
    match tag.as_str() {
        "" | "bodyweight" | "none" => None,
        _ => Some(tag),
    }
}

/// Human-readable label for an equipment set, e.g. "Dumbbells, Bench"
pub fn equipment_label(equipment: &BTreeSet<String>) -> String {
    if equipment.is_empty() {
        return "Bodyweight".to_string();
    }

    equipment
        .iter()
        .map(|tag| {
            tag.split('-')
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Exercise Types
// ============================================================================

/// Time cost model for an exercise
///
/// Estimated seconds for a volume are
/// `warmup + sets * reps * seconds_per_rep + (sets - 1) * rest`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeCost {
    pub warmup_seconds: u32,
    pub seconds_per_rep: u32,
    pub rest_seconds: u32,
}

impl TimeCost {
    pub fn estimate(&self, sets: u32, reps: u32) -> u32 {
        let work = sets.saturating_mul(reps).saturating_mul(self.seconds_per_rep);
        let rest = sets.saturating_sub(1).saturating_mul(self.rest_seconds);
        self.warmup_seconds.saturating_add(work).saturating_add(rest)
    }
}

/// An immutable catalog entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub primary_muscle: MuscleGroup,
    pub secondary_muscles: BTreeSet<MuscleGroup>,
    /// Required equipment tags; empty means bodyweight
    pub equipment: BTreeSet<String>,
    pub difficulty: DifficultyTier,
    pub time_cost: TimeCost,
    pub default_sets: u32,
    pub default_reps: u32,
    pub instructions: Vec<String>,
    pub image_url: Option<String>,
}

impl Exercise {
    pub fn is_bodyweight(&self) -> bool {
        self.equipment.is_empty()
    }

    pub fn equipment_label(&self) -> String {
        equipment_label(&self.equipment)
    }
}

// ============================================================================
// Routine Types
// ============================================================================

/// Why an entry was placed in the routine
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "group", rename_all = "snake_case")]
pub enum Slot {
    /// Selected from the candidate pool of a target muscle group
    Group(MuscleGroup),
    /// Added by the top-up pass to reach the minimum duration
    TopUp,
}

/// One exercise in a generated routine, with its resolved volume
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutineEntry {
    pub exercise: Exercise,
    pub slot: Slot,
    pub sets: u32,
    pub reps: u32,
    pub estimated_seconds: u32,
    /// Exercise steps followed by the volume line; render as-is
    pub instructions: Vec<String>,
}

/// A generated workout routine. Entry order is execution order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Routine {
    pub generation_id: Uuid,
    pub seed: Option<u64>,
    pub preferences: WorkoutPreferences,
    pub entries: Vec<RoutineEntry>,
    pub total_seconds: u32,
    /// Requested groups no entry covers with its primary muscle
    pub uncovered_groups: BTreeSet<MuscleGroup>,
}

/// Coverage outcome of a generated routine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Coverage<'a> {
    Full,
    Partial(&'a BTreeSet<MuscleGroup>),
}

impl Routine {
    pub fn coverage(&self) -> Coverage<'_> {
        if self.uncovered_groups.is_empty() {
            Coverage::Full
        } else {
            Coverage::Partial(&self.uncovered_groups)
        }
    }

    pub fn is_partial(&self) -> bool {
        !self.uncovered_groups.is_empty()
    }

    /// Total estimated time rounded to the nearest minute
    pub fn total_minutes(&self) -> u32 {
        (self.total_seconds + 30) / 60
    }

    pub fn exercise_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.exercise.id.as_str())
    }
}
