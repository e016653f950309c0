//! Generation service: preference checks, composition, validation.
//!
//! `generate` is pure over its inputs. It reads the catalog snapshot it is
//! given and nothing else, so concurrent calls only need to share an
//! `Arc<Catalog>`.

use crate::composer::{self, Composition};
use crate::config::Tuning;
use crate::preferences::WorkoutPreferences;
use crate::types::{Coverage, Routine};
use crate::validator;
use crate::{Catalog, Error, Result};
use uuid::Uuid;

/// Generates routines with a fixed set of composer constants
#[derive(Clone, Debug, Default)]
pub struct Generator {
    tuning: Tuning,
}

impl Generator {
    pub fn new(tuning: Tuning) -> Result<Self> {
        tuning.validate()?;
        Ok(Self { tuning })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Generate a routine for `prefs` from `catalog`
    ///
    /// ## Flow
    ///
    /// 1. **Preferences**: structural checks, `InvalidPreferences` on failure
    /// 2. **Composition**: per-group greedy selection, then top-up
    /// 3. **Assembly**: the generation id is derived from the catalog
    ///    fingerprint, preferences and seed
    /// 4. **Validation**: any broken invariant becomes `Error::Internal`
    ///
    /// A routine that misses some target groups is still a success; the
    /// groups are listed in `uncovered_groups`.
    pub fn generate(
        &self,
        prefs: &WorkoutPreferences,
        catalog: &Catalog,
        seed: Option<u64>,
    ) -> Result<Routine> {
        prefs.validate()?;

        tracing::info!(
            "Generating {} min {} routine (seed {:?}, {} equipment tag(s))",
            prefs.duration_minutes,
            prefs.fitness_level,
            seed,
            prefs.equipment.len()
        );

        let composition = composer::compose(catalog, prefs, &self.tuning, seed);
        self.finish(prefs, catalog, seed, composition)
    }

    fn finish(
        &self,
        prefs: &WorkoutPreferences,
        catalog: &Catalog,
        seed: Option<u64>,
        composition: Composition,
    ) -> Result<Routine> {
        let routine = Routine {
            generation_id: generation_id(catalog, prefs, seed)?,
            seed,
            preferences: prefs.clone(),
            entries: composition.entries,
            total_seconds: composition.total_seconds,
            uncovered_groups: composition.uncovered_groups,
        };

        if let Err(violation) = validator::validate(&routine, catalog, &self.tuning) {
            tracing::error!(
                invariant = violation.invariant.name(),
                exercise = violation.exercise_id.as_deref().unwrap_or("-"),
                generation = %routine.generation_id,
                "Generated routine failed validation: {}",
                violation.detail
            );
            return Err(Error::Internal(violation));
        }

        match routine.coverage() {
            Coverage::Full => tracing::info!(
                "Generated routine {} with {} exercises ({}s)",
                routine.generation_id,
                routine.entries.len(),
                routine.total_seconds
            ),
            Coverage::Partial(groups) => tracing::warn!(
                "Generated routine {} with {} exercises ({}s); uncovered groups: {:?}",
                routine.generation_id,
                routine.entries.len(),
                routine.total_seconds,
                groups
            ),
        }

        Ok(routine)
    }
}

/// Stable id for one (catalog, preferences, seed) combination
fn generation_id(catalog: &Catalog, prefs: &WorkoutPreferences, seed: Option<u64>) -> Result<Uuid> {
    let key = serde_json::to_vec(&(prefs, seed))?;
    Ok(Uuid::new_v5(&catalog.fingerprint(), &key))
}

/// Generate a routine with the default composer constants
pub fn generate(
    prefs: &WorkoutPreferences,
    catalog: &Catalog,
    seed: Option<u64>,
) -> Result<Routine> {
    Generator::default().generate(prefs, catalog, seed)
}
