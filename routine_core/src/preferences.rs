//! Workout preferences supplied by the caller.
//!
//! `RawPreferences` mirrors what the preference form submits; converting it
//! into `WorkoutPreferences` parses enum names and normalizes equipment tags,
//! reporting the first failing field as `Error::InvalidPreferences`.

use crate::types::{normalize_equipment_tag, FitnessLevel, MuscleGroup};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MIN_DURATION_MINUTES: u32 = 10;
pub const MAX_DURATION_MINUTES: u32 = 120;

/// Validated, typed preferences for one generation request
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutPreferences {
    pub duration_minutes: u32,
    pub fitness_level: FitnessLevel,
    /// Equipment the user has access to; empty means bodyweight only
    #[serde(default)]
    pub equipment: BTreeSet<String>,
    /// Requested groups; empty means every group is eligible
    #[serde(default)]
    pub target_muscle_groups: BTreeSet<MuscleGroup>,
}

impl WorkoutPreferences {
    /// Bodyweight-only preferences targeting every group
    pub fn new(duration_minutes: u32, fitness_level: FitnessLevel) -> Self {
        Self {
            duration_minutes,
            fitness_level,
            equipment: BTreeSet::new(),
            target_muscle_groups: BTreeSet::new(),
        }
    }

    pub fn with_equipment<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.equipment = tags
            .into_iter()
            .filter_map(|t| normalize_equipment_tag(t.as_ref()))
            .collect();
        self
    }

    pub fn with_targets<I>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = MuscleGroup>,
    {
        self.target_muscle_groups = groups.into_iter().collect();
        self
    }

    /// Total time budget in seconds
    pub fn budget_seconds(&self) -> u32 {
        self.duration_minutes.saturating_mul(60)
    }

    /// Target groups in enum order; all groups when none were requested
    pub fn targets(&self) -> Vec<MuscleGroup> {
        if self.target_muscle_groups.is_empty() {
            MuscleGroup::ALL.to_vec()
        } else {
            self.target_muscle_groups.iter().copied().collect()
        }
    }

    /// Structural validation, re-run defensively by the generation service
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration_minutes) {
            return Err(Error::invalid(
                "duration",
                format!(
                    "must be between {} and {} minutes (got {})",
                    MIN_DURATION_MINUTES, MAX_DURATION_MINUTES, self.duration_minutes
                ),
            ));
        }

        for tag in &self.equipment {
            if tag.trim().is_empty() {
                return Err(Error::invalid("equipment", "tags must not be blank"));
            }
            if tag.trim() != tag || tag.to_lowercase() != *tag {
                return Err(Error::invalid(
                    "equipment",
                    format!("tag '{}' must be trimmed lowercase", tag),
                ));
            }
        }

        Ok(())
    }
}

/// Preferences as submitted by the form, before any parsing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawPreferences {
    pub duration: i64,
    pub fitness_level: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub target_muscle_groups: Vec<String>,
}

impl TryFrom<RawPreferences> for WorkoutPreferences {
    type Error = Error;

    fn try_from(raw: RawPreferences) -> Result<Self> {
        let duration_minutes = u32::try_from(raw.duration)
            .ok()
            .filter(|d| (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(d))
            .ok_or_else(|| {
                Error::invalid(
                    "duration",
                    format!(
                        "must be between {} and {} minutes (got {})",
                        MIN_DURATION_MINUTES, MAX_DURATION_MINUTES, raw.duration
                    ),
                )
            })?;

        let fitness_level = raw
            .fitness_level
            .parse::<FitnessLevel>()
            .map_err(|e| Error::invalid("fitness_level", e.to_string()))?;

        let mut equipment = BTreeSet::new();
        for tag in &raw.equipment {
            if tag.trim().is_empty() {
                return Err(Error::invalid("equipment", "tags must not be blank"));
            }
            if let Some(tag) = normalize_equipment_tag(tag) {
                equipment.insert(tag);
            }
        }

        let target_muscle_groups = raw
            .target_muscle_groups
            .iter()
            .map(|g| g.parse::<MuscleGroup>())
            .collect::<std::result::Result<BTreeSet<_>, _>>()
            .map_err(|e| Error::invalid("target_muscle_groups", e.to_string()))?;

        let prefs = WorkoutPreferences {
            duration_minutes,
            fitness_level,
            equipment,
            target_muscle_groups,
        };
        prefs.validate()?;
        Ok(prefs)
    }
}
