//! Exercise catalog: loading, integrity checks, queries, and the built-in
//! default catalog.
//!
//! A `Catalog` is immutable once loaded. Every integrity problem in the source
//! records is collected and reported together by `Catalog::load`, so a bad
//! catalog fails at startup rather than during generation.

use crate::types::*;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::load(default_records()).expect("built-in catalog passes integrity checks")
});

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

// ============================================================================
// Source records
// ============================================================================

/// One exercise as it appears in a catalog source, before integrity checks
///
/// Numeric fields are signed so that negative values in a source file are
/// reported as integrity issues instead of parse failures.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseRecord {
    pub id: String,
    pub name: String,
    pub primary_muscle: MuscleGroup,
    #[serde(default)]
    pub secondary_muscles: Vec<MuscleGroup>,
    #[serde(default)]
    pub equipment: Vec<String>,
    pub difficulty: DifficultyTier,
    pub warmup_seconds: i64,
    pub seconds_per_rep: i64,
    pub rest_seconds: i64,
    pub default_sets: i64,
    pub default_reps: i64,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ExerciseRecord {
    /// A bodyweight record with 3x10 volume and a 30s/3s/45s time model
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        primary_muscle: MuscleGroup,
        difficulty: DifficultyTier,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            primary_muscle,
            secondary_muscles: Vec::new(),
            equipment: Vec::new(),
            difficulty,
            warmup_seconds: 30,
            seconds_per_rep: 3,
            rest_seconds: 45,
            default_sets: 3,
            default_reps: 10,
            instructions: Vec::new(),
            image_url: None,
        }
    }

    pub fn secondary(mut self, groups: &[MuscleGroup]) -> Self {
        self.secondary_muscles = groups.to_vec();
        self
    }

    pub fn equipment(mut self, tags: &[&str]) -> Self {
        self.equipment = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn timing(mut self, warmup_seconds: i64, seconds_per_rep: i64, rest_seconds: i64) -> Self {
        self.warmup_seconds = warmup_seconds;
        self.seconds_per_rep = seconds_per_rep;
        self.rest_seconds = rest_seconds;
        self
    }

    pub fn volume(mut self, sets: i64, reps: i64) -> Self {
        self.default_sets = sets;
        self.default_reps = reps;
        self
    }

    pub fn steps(mut self, steps: &[&str]) -> Self {
        self.instructions = steps.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn image(mut self, url: &str) -> Self {
        self.image_url = Some(url.to_string());
        self
    }

    /// Check this record and convert it, pushing every problem onto `issues`
    fn check(self, issues: &mut Vec<String>) -> Option<Exercise> {
        let before = issues.len();
        let label = if self.id.trim().is_empty() {
            format!("exercise '{}'", self.name)
        } else {
            format!("exercise '{}'", self.id)
        };

        if self.id.trim().is_empty() {
            issues.push(format!("{} has an empty id", label));
        }
        if self.name.trim().is_empty() {
            issues.push(format!("{} has an empty name", label));
        }
        if self.instructions.is_empty() {
            issues.push(format!("{} has no instructions", label));
        }
        if self.instructions.iter().any(|s| s.trim().is_empty()) {
            issues.push(format!("{} has a blank instruction step", label));
        }
        if self.equipment.iter().any(|t| t.trim().is_empty()) {
            issues.push(format!("{} has a blank equipment tag", label));
        }

        let seconds_per_rep = positive(self.seconds_per_rep, &label, "seconds_per_rep", issues);
        let default_sets = positive(self.default_sets, &label, "default_sets", issues);
        let default_reps = positive(self.default_reps, &label, "default_reps", issues);
        let warmup_seconds = non_negative(self.warmup_seconds, &label, "warmup_seconds", issues);
        let rest_seconds = non_negative(self.rest_seconds, &label, "rest_seconds", issues);

        if issues.len() > before {
            return None;
        }

        let primary_muscle = self.primary_muscle;
        let secondary_muscles: BTreeSet<MuscleGroup> = self
            .secondary_muscles
            .into_iter()
            .filter(|g| *g != primary_muscle)
            .collect();
        let equipment = self
            .equipment
            .iter()
            .filter_map(|t| normalize_equipment_tag(t))
            .collect();

        Some(Exercise {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            primary_muscle,
            secondary_muscles,
            equipment,
            difficulty: self.difficulty,
            time_cost: TimeCost {
                warmup_seconds,
                seconds_per_rep,
                rest_seconds,
            },
            default_sets,
            default_reps,
            instructions: self
                .instructions
                .into_iter()
                .map(|s| s.trim().to_string())
                .collect(),
            image_url: self.image_url.filter(|u| !u.trim().is_empty()),
        })
    }
}

fn positive(value: i64, label: &str, field: &str, issues: &mut Vec<String>) -> u32 {
    match u32::try_from(value) {
        Ok(v) if v > 0 => v,
        _ => {
            issues.push(format!("{} has non-positive {} ({})", label, field, value));
            0
        }
    }
}

fn non_negative(value: i64, label: &str, field: &str, issues: &mut Vec<String>) -> u32 {
    match u32::try_from(value) {
        Ok(v) => v,
        Err(_) => {
            issues.push(format!("{} has out-of-range {} ({})", label, field, value));
            0
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// The immutable, queryable collection of exercises
#[derive(Clone, Debug)]
pub struct Catalog {
    /// Sorted by ascending id
    exercises: Vec<Exercise>,
    index: HashMap<String, usize>,
    fingerprint: Uuid,
    loaded_at: DateTime<Utc>,
}

/// Filter for `Catalog::lookup`; unset fields match everything
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupCriteria {
    pub muscle: Option<MuscleGroup>,
    /// When filtering by muscle, also match secondary muscles
    pub include_secondary: bool,
    pub max_difficulty: Option<DifficultyTier>,
    /// Only exercises whose equipment is a subset of these tags
    pub equipment: Option<BTreeSet<String>>,
}

impl LookupCriteria {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn muscle(mut self, group: MuscleGroup) -> Self {
        self.muscle = Some(group);
        self
    }

    pub fn including_secondary(mut self) -> Self {
        self.include_secondary = true;
        self
    }

    pub fn at_most(mut self, tier: DifficultyTier) -> Self {
        self.max_difficulty = Some(tier);
        self
    }

    pub fn with_equipment<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.equipment = Some(
            tags.into_iter()
                .filter_map(|t| normalize_equipment_tag(t.as_ref()))
                .collect(),
        );
        self
    }

    fn matches(&self, exercise: &Exercise) -> bool {
        let muscle_ok = match self.muscle {
            None => true,
            Some(group) => {
                exercise.primary_muscle == group
                    || (self.include_secondary && exercise.secondary_muscles.contains(&group))
            }
        };
        let tier_ok = self
            .max_difficulty
            .map_or(true, |max| exercise.difficulty <= max);
        let equipment_ok = self
            .equipment
            .as_ref()
            .map_or(true, |have| exercise.equipment.is_subset(have));

        muscle_ok && tier_ok && equipment_ok
    }
}

impl Catalog {
    /// Build a catalog from source records
    ///
    /// Fails with `Error::CatalogLoad` listing every integrity issue found:
    /// empty ids or names, duplicate ids, missing or blank instructions,
    /// non-positive time cost or volume, negative warm-up or rest.
    pub fn load(records: Vec<ExerciseRecord>) -> Result<Self> {
        let mut issues = Vec::new();
        let mut exercises = Vec::with_capacity(records.len());
        let mut seen = BTreeSet::new();

        for record in records {
            let id = record.id.trim().to_string();
            if !id.is_empty() && !seen.insert(id.clone()) {
                issues.push(format!("duplicate exercise id '{}'", id));
                continue;
            }
            if let Some(exercise) = record.check(&mut issues) {
                exercises.push(exercise);
            }
        }

        if !issues.is_empty() {
            tracing::error!("Catalog failed integrity checks with {} issue(s)", issues.len());
            return Err(Error::CatalogLoad(issues));
        }

        exercises.sort_by(|a, b| a.id.cmp(&b.id));
        let index = exercises
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        let fingerprint = Uuid::new_v5(&Uuid::NAMESPACE_OID, &serde_json::to_vec(&exercises)?);

        tracing::info!(
            "Loaded catalog with {} exercises (fingerprint {})",
            exercises.len(),
            fingerprint
        );

        Ok(Self {
            exercises,
            index,
            fingerprint,
            loaded_at: Utc::now(),
        })
    }

    /// Every exercise, in ascending id order
    pub fn all(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Result<&Exercise> {
        self.index
            .get(id)
            .map(|&i| &self.exercises[i])
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Exercises matching `criteria`, in ascending id order
    pub fn lookup(&self, criteria: &LookupCriteria) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|e| criteria.matches(e))
            .collect()
    }

    /// Content hash of the catalog; identical contents give identical values
    pub fn fingerprint(&self) -> Uuid {
        self.fingerprint
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

// ============================================================================
// Built-in exercises
// ============================================================================

/// Records of the built-in catalog
pub fn default_records() -> Vec<ExerciseRecord> {
    use DifficultyTier::{Advanced, Beginner, Intermediate};
    use MuscleGroup::{Arms, Back, Chest, Core, Legs, Shoulders};

    vec![
        // Chest
        ExerciseRecord::new("push_up", "Push-ups", Chest, Beginner)
            .secondary(&[Arms, Shoulders, Core])
            .volume(3, 12)
            .steps(&[
                "Start in a plank position with hands shoulder-width apart",
                "Lower your body until your chest nearly touches the floor",
                "Push back up to the starting position",
            ])
            .image("https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=600&q=80"),
        ExerciseRecord::new("incline_push_up", "Incline Push-ups", Chest, Beginner)
            .secondary(&[Arms])
            .equipment(&["bench"])
            .volume(3, 12)
            .steps(&[
                "Place your hands on the edge of a bench, slightly wider than shoulders",
                "Walk your feet back until your body forms a straight line",
                "Lower your chest to the bench and press back up",
            ]),
        ExerciseRecord::new("archer_push_up", "Archer Push-ups", Chest, Advanced)
            .secondary(&[Arms, Core])
            .timing(30, 4, 60)
            .volume(3, 8)
            .steps(&[
                "Start in a wide push-up position",
                "Shift your weight to one arm while the other stays straight",
                "Lower toward the working hand and press back up",
                "Alternate sides each rep",
            ]),
        ExerciseRecord::new("dumbbell_bench_press", "Dumbbell Bench Press", Chest, Intermediate)
            .secondary(&[Arms, Shoulders])
            .equipment(&["dumbbells", "bench"])
            .timing(60, 4, 60)
            .steps(&[
                "Lie on the bench holding a dumbbell in each hand above your chest",
                "Lower the dumbbells to the sides of your chest",
                "Press them back up until your arms are straight",
            ]),
        ExerciseRecord::new("barbell_bench_press", "Barbell Bench Press", Chest, Intermediate)
            .secondary(&[Arms, Shoulders])
            .equipment(&["barbell", "bench"])
            .timing(90, 4, 90)
            .volume(4, 8)
            .steps(&[
                "Lie on the bench with your feet flat on the ground",
                "Grip the barbell with hands slightly wider than shoulder-width",
                "Lower the barbell to your chest",
                "Press the barbell back up to starting position",
            ])
            .image("https://images.unsplash.com/photo-1571019614242-c5c5dee9f50b?w=600&q=80"),
        ExerciseRecord::new("dumbbell_fly", "Dumbbell Flyes", Chest, Intermediate)
            .secondary(&[Shoulders])
            .equipment(&["dumbbells", "bench"])
            .timing(30, 3, 60)
            .volume(3, 12)
            .steps(&[
                "Lie on the bench with dumbbells held above your chest, palms facing",
                "Open your arms in a wide arc with a slight bend in the elbows",
                "Squeeze your chest to bring the dumbbells back together",
            ]),
        ExerciseRecord::new("cable_crossover", "Cable Crossover", Chest, Intermediate)
            .secondary(&[Shoulders])
            .equipment(&["cable-machine"])
            .volume(3, 12)
            .steps(&[
                "Set both pulleys high and grab a handle in each hand",
                "Step forward with a slight lean and soft elbows",
                "Bring the handles together in front of your hips",
                "Return slowly until you feel a stretch across the chest",
            ]),
        // Back
        ExerciseRecord::new("superman_hold", "Superman Hold", Back, Beginner)
            .secondary(&[Core])
            .timing(30, 3, 30)
            .steps(&[
                "Lie face down with arms extended overhead",
                "Lift your arms, chest and legs off the floor",
                "Hold briefly at the top, then lower with control",
            ]),
        ExerciseRecord::new("band_pull_apart", "Band Pull-aparts", Back, Beginner)
            .secondary(&[Shoulders])
            .equipment(&["resistance-bands"])
            .timing(30, 2, 30)
            .volume(3, 15)
            .steps(&[
                "Hold a band in front of you at shoulder height with straight arms",
                "Pull the band apart until it touches your chest",
                "Return slowly to the start",
            ]),
        ExerciseRecord::new("kettlebell_row", "Kettlebell Bent-over Row", Back, Beginner)
            .secondary(&[Arms])
            .equipment(&["kettlebell"])
            .steps(&[
                "Hinge at the hips holding a kettlebell in one hand",
                "Row the kettlebell to your hip, keeping your back flat",
                "Lower it under control and switch sides after the set",
            ]),
        ExerciseRecord::new("cable_lat_pulldown", "Cable Lat Pulldown", Back, Beginner)
            .secondary(&[Arms])
            .equipment(&["cable-machine"])
            .timing(45, 3, 60)
            .volume(3, 12)
            .steps(&[
                "Grip the bar slightly wider than shoulder-width",
                "Pull the bar to your upper chest, driving the elbows down",
                "Let the bar rise slowly until your arms are straight",
            ]),
        ExerciseRecord::new("dumbbell_row", "Dumbbell Rows", Back, Intermediate)
            .secondary(&[Arms])
            .equipment(&["dumbbells"])
            .timing(45, 3, 60)
            .steps(&[
                "Bend at the waist with a dumbbell in one hand",
                "Pull the dumbbell up to your side while keeping your back straight",
                "Lower it with control and switch sides after the set",
            ])
            .image("https://images.unsplash.com/photo-1603287681836-b174ce5074c2?w=600&q=80"),
        ExerciseRecord::new("pull_up", "Pull-ups", Back, Advanced)
            .secondary(&[Arms])
            .equipment(&["pull-up-bar"])
            .timing(60, 4, 90)
            .volume(4, 6)
            .steps(&[
                "Hang from the bar with an overhand grip",
                "Pull yourself up until your chin clears the bar",
                "Lower all the way down before the next rep",
            ]),
        ExerciseRecord::new("barbell_deadlift", "Barbell Deadlift", Back, Advanced)
            .secondary(&[Legs, Core])
            .equipment(&["barbell"])
            .timing(120, 5, 120)
            .volume(4, 5)
            .steps(&[
                "Stand with the bar over mid-foot and grip it just outside your legs",
                "Brace your core and keep your back flat",
                "Drive through your heels to stand up with the bar",
                "Hinge back down, keeping the bar close to your legs",
            ]),
        // Legs
        ExerciseRecord::new("bodyweight_squat", "Squats", Legs, Beginner)
            .secondary(&[Core])
            .timing(30, 2, 45)
            .volume(4, 15)
            .steps(&[
                "Stand with feet shoulder-width apart",
                "Lower your body by bending your knees and pushing your hips back",
                "Stand back up by driving through your heels",
            ])
            .image("https://images.unsplash.com/photo-1574680178050-55c6a6a96e0a?w=600&q=80"),
        ExerciseRecord::new("walking_lunge", "Walking Lunges", Legs, Beginner)
            .secondary(&[Core])
            .volume(3, 12)
            .steps(&[
                "Step forward and lower your back knee toward the floor",
                "Push through the front heel to bring the back foot forward",
                "Continue alternating legs as you walk",
            ]),
        ExerciseRecord::new("glute_bridge", "Glute Bridges", Legs, Beginner)
            .secondary(&[Core])
            .timing(15, 2, 30)
            .volume(3, 15)
            .steps(&[
                "Lie on your back with knees bent and feet flat",
                "Drive your hips up until your body forms a straight line",
                "Squeeze your glutes at the top, then lower slowly",
            ]),
        ExerciseRecord::new("goblet_squat", "Goblet Squats", Legs, Intermediate)
            .secondary(&[Core])
            .equipment(&["kettlebell"])
            .timing(45, 3, 60)
            .volume(3, 12)
            .steps(&[
                "Hold a kettlebell by the horns against your chest",
                "Squat down keeping your chest tall and elbows inside your knees",
                "Stand up by driving through your heels",
            ]),
        ExerciseRecord::new("kettlebell_swing", "Kettlebell Swings", Legs, Intermediate)
            .secondary(&[Back, Core])
            .equipment(&["kettlebell"])
            .timing(45, 2, 45)
            .volume(3, 15)
            .steps(&[
                "Hinge at the hips with the kettlebell between your feet",
                "Hike it back, then snap your hips forward to swing it to chest height",
                "Let it fall back into the hinge and repeat",
            ]),
        ExerciseRecord::new("dumbbell_romanian_deadlift", "Dumbbell Romanian Deadlift", Legs, Intermediate)
            .secondary(&[Back])
            .equipment(&["dumbbells"])
            .timing(45, 4, 60)
            .steps(&[
                "Hold the dumbbells in front of your thighs",
                "Push your hips back and lower the weights along your legs",
                "Stop when you feel a hamstring stretch and stand back up",
            ]),
        ExerciseRecord::new("jump_squat", "Jump Squats", Legs, Advanced)
            .timing(45, 3, 60)
            .volume(3, 12)
            .steps(&[
                "Lower into a squat with arms back",
                "Explode upward and jump as high as you can",
                "Land softly and go straight into the next rep",
            ]),
        ExerciseRecord::new("bulgarian_split_squat", "Bulgarian Split Squats", Legs, Advanced)
            .secondary(&[Core])
            .equipment(&["dumbbells", "bench"])
            .timing(45, 4, 60)
            .steps(&[
                "Stand in front of a bench and rest one foot on it behind you",
                "Lower until your front thigh is parallel to the floor",
                "Drive through the front heel to stand, then switch legs after the set",
            ]),
        ExerciseRecord::new("barbell_back_squat", "Barbell Back Squat", Legs, Advanced)
            .secondary(&[Core, Back])
            .equipment(&["barbell"])
            .timing(120, 5, 120)
            .volume(5, 5)
            .steps(&[
                "Rest the bar on your upper back and unrack it",
                "Squat down until your hips are below your knees",
                "Drive up keeping your chest tall",
            ]),
        // Shoulders
        ExerciseRecord::new("plank_shoulder_tap", "Plank Shoulder Taps", Shoulders, Beginner)
            .secondary(&[Core])
            .timing(15, 2, 30)
            .volume(3, 16)
            .steps(&[
                "Hold a high plank with feet hip-width apart",
                "Tap your left shoulder with your right hand without rocking your hips",
                "Alternate hands each rep",
            ]),
        ExerciseRecord::new("band_lateral_raise", "Band Lateral Raises", Shoulders, Beginner)
            .equipment(&["resistance-bands"])
            .timing(15, 2, 30)
            .volume(3, 12)
            .steps(&[
                "Stand on the band holding an end in each hand",
                "Raise your arms out to the sides until they reach shoulder height",
                "Lower slowly",
            ]),
        ExerciseRecord::new("dumbbell_shoulder_press", "Dumbbell Shoulder Press", Shoulders, Beginner)
            .secondary(&[Arms])
            .equipment(&["dumbbells"])
            .timing(45, 3, 60)
            .steps(&[
                "Hold the dumbbells at shoulder height, palms forward",
                "Press them overhead until your arms are straight",
                "Lower back to shoulder height",
            ]),
        ExerciseRecord::new("dumbbell_lateral_raise", "Dumbbell Lateral Raises", Shoulders, Beginner)
            .equipment(&["dumbbells"])
            .volume(3, 12)
            .steps(&[
                "Stand holding the dumbbells at your sides",
                "Raise them out to the sides to shoulder height with soft elbows",
                "Lower under control",
            ]),
        ExerciseRecord::new("pike_push_up", "Pike Push-ups", Shoulders, Intermediate)
            .secondary(&[Arms, Chest])
            .timing(30, 3, 60)
            .steps(&[
                "Start in a downward-dog position with hips high",
                "Bend your elbows to lower the top of your head toward the floor",
                "Press back up to the start",
            ]),
        ExerciseRecord::new("kettlebell_halo", "Kettlebell Halos", Shoulders, Intermediate)
            .secondary(&[Core])
            .equipment(&["kettlebell"])
            .steps(&[
                "Hold the kettlebell upside down by the horns at chest height",
                "Circle it around your head, keeping it close",
                "Reverse direction each rep",
            ]),
        ExerciseRecord::new("barbell_overhead_press", "Barbell Overhead Press", Shoulders, Advanced)
            .secondary(&[Arms, Core])
            .equipment(&["barbell"])
            .timing(90, 4, 90)
            .volume(4, 6)
            .steps(&[
                "Hold the bar at your collarbone with a shoulder-width grip",
                "Brace and press the bar straight overhead",
                "Lower it back to your collarbone",
            ]),
        // Arms
        ExerciseRecord::new("bench_dip", "Bench Dips", Arms, Beginner)
            .secondary(&[Chest, Shoulders])
            .equipment(&["bench"])
            .volume(3, 12)
            .steps(&[
                "Sit on the edge of a bench with hands beside your hips",
                "Slide off the bench and lower yourself by bending your elbows",
                "Press back up until your arms are straight",
            ]),
        ExerciseRecord::new("dumbbell_curl", "Dumbbell Biceps Curls", Arms, Beginner)
            .equipment(&["dumbbells"])
            .volume(3, 12)
            .steps(&[
                "Stand holding the dumbbells with palms facing forward",
                "Curl the weights toward your shoulders keeping elbows still",
                "Lower them slowly",
            ]),
        ExerciseRecord::new("band_curl", "Resistance Band Curls", Arms, Beginner)
            .equipment(&["resistance-bands"])
            .timing(15, 2, 30)
            .volume(3, 15)
            .steps(&[
                "Stand on the band with an end in each hand",
                "Curl your hands toward your shoulders",
                "Lower slowly against the band's pull",
            ]),
        ExerciseRecord::new("cable_triceps_pushdown", "Cable Triceps Pushdown", Arms, Beginner)
            .equipment(&["cable-machine"])
            .volume(3, 12)
            .steps(&[
                "Grip the rope or bar at chest height with elbows at your sides",
                "Push down until your arms are fully straight",
                "Return slowly without letting the elbows drift",
            ]),
        ExerciseRecord::new("diamond_push_up", "Diamond Push-ups", Arms, Intermediate)
            .secondary(&[Chest])
            .timing(30, 3, 60)
            .steps(&[
                "Form a diamond shape with your thumbs and index fingers under your chest",
                "Lower your chest to your hands keeping elbows close",
                "Press back up",
            ]),
        ExerciseRecord::new("hammer_curl", "Hammer Curls", Arms, Intermediate)
            .equipment(&["dumbbells"])
            .steps(&[
                "Hold the dumbbells with palms facing each other",
                "Curl them up keeping the neutral grip",
                "Lower under control",
            ]),
        ExerciseRecord::new("barbell_curl", "Barbell Curls", Arms, Intermediate)
            .equipment(&["barbell"])
            .timing(45, 3, 60)
            .steps(&[
                "Hold the bar with an underhand, shoulder-width grip",
                "Curl it toward your shoulders without swinging",
                "Lower it slowly",
            ]),
        ExerciseRecord::new("chin_up", "Chin-ups", Arms, Advanced)
            .secondary(&[Back])
            .equipment(&["pull-up-bar"])
            .timing(60, 4, 90)
            .volume(4, 6)
            .steps(&[
                "Hang from the bar with an underhand grip",
                "Pull until your chin is over the bar",
                "Lower all the way down",
            ]),
        // Core
        ExerciseRecord::new("forearm_plank", "Forearm Plank", Core, Beginner)
            .secondary(&[Shoulders])
            .timing(15, 45, 30)
            .volume(3, 1)
            .steps(&[
                "Rest on your forearms and toes with elbows under your shoulders",
                "Keep a straight line from head to heels",
                "Hold for 45 seconds per set",
            ]),
        ExerciseRecord::new("dead_bug", "Dead Bugs", Core, Beginner)
            .timing(15, 3, 30)
            .volume(3, 12)
            .steps(&[
                "Lie on your back with arms up and knees bent at 90 degrees",
                "Lower the opposite arm and leg toward the floor",
                "Return and switch sides",
            ]),
        ExerciseRecord::new("bicycle_crunch", "Bicycle Crunches", Core, Beginner)
            .timing(15, 2, 30)
            .volume(3, 20)
            .steps(&[
                "Lie on your back with hands behind your head",
                "Bring one elbow toward the opposite knee while extending the other leg",
                "Alternate sides in a pedaling motion",
            ]),
        ExerciseRecord::new("mountain_climber", "Mountain Climbers", Core, Intermediate)
            .secondary(&[Shoulders, Legs])
            .timing(30, 2, 45)
            .volume(3, 20)
            .steps(&[
                "Start in a high plank",
                "Drive one knee toward your chest, then switch legs quickly",
                "Keep your hips level throughout",
            ]),
        ExerciseRecord::new("kettlebell_russian_twist", "Kettlebell Russian Twists", Core, Intermediate)
            .equipment(&["kettlebell"])
            .timing(30, 2, 45)
            .volume(3, 16)
            .steps(&[
                "Sit with knees bent holding a kettlebell at your chest",
                "Lean back slightly and lift your feet",
                "Rotate the kettlebell from side to side",
            ]),
        ExerciseRecord::new("hanging_knee_raise", "Hanging Knee Raises", Core, Intermediate)
            .secondary(&[Arms])
            .equipment(&["pull-up-bar"])
            .timing(30, 3, 60)
            .steps(&[
                "Hang from the bar with straight arms",
                "Raise your knees toward your chest without swinging",
                "Lower them slowly",
            ]),
        ExerciseRecord::new("cable_woodchop", "Cable Woodchops", Core, Intermediate)
            .secondary(&[Shoulders])
            .equipment(&["cable-machine"])
            .volume(3, 12)
            .steps(&[
                "Set the pulley high and stand side-on to the machine",
                "Pull the handle diagonally across your body to the opposite hip",
                "Return with control and switch sides after the set",
            ]),
        ExerciseRecord::new("hollow_body_rock", "Hollow Body Rocks", Core, Advanced)
            .timing(30, 3, 60)
            .volume(3, 15)
            .steps(&[
                "Lie on your back and lift your shoulders and legs into a hollow hold",
                "Rock back and forth while keeping the shape",
            ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ExerciseRecord {
        ExerciseRecord::new(id, "Test Exercise", MuscleGroup::Chest, DifficultyTier::Beginner)
            .steps(&["Do the thing"])
    }

    #[test]
    fn test_default_catalog_loads() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), default_records().len());
        assert!(catalog.by_id("push_up").is_ok());
    }

    #[test]
    fn test_default_catalog_covers_every_group_and_tier() {
        let catalog = default_catalog();
        for group in MuscleGroup::ALL {
            for tier in DifficultyTier::ALL {
                let found = catalog
                    .all()
                    .iter()
                    .any(|e| e.primary_muscle == group && e.difficulty == tier);
                assert!(found, "no {:?} exercise for {:?}", tier, group);
            }
            let bodyweight_beginner = catalog
                .all()
                .iter()
                .any(|e| e.primary_muscle == group && e.is_bodyweight() && e.difficulty == DifficultyTier::Beginner);
            if group != MuscleGroup::Arms {
                assert!(bodyweight_beginner, "no bodyweight beginner exercise for {:?}", group);
            }
        }
    }

    #[test]
    fn test_all_is_sorted_by_id() {
        let ids: Vec<_> = default_catalog().all().iter().map(|e| e.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_by_id_not_found() {
        let err = default_catalog().by_id("handstand_walk").unwrap_err();
        assert!(matches!(err, Error::NotFound(id) if id == "handstand_walk"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::load(vec![record("a"), record("b"), record("a")]).unwrap_err();
        match err {
            Error::CatalogLoad(issues) => {
                assert_eq!(issues, vec!["duplicate exercise id 'a'".to_string()]);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_every_integrity_issue_reported() {
        let records = vec![
            record("no_steps").steps(&[]),
            record("zero_rep_time").timing(30, 0, 45),
            record("negative_rest").timing(30, 3, -1),
            record("zero_sets").volume(0, 10),
            record("blank_step").steps(&["Stand", "  "]),
            record(""),
        ];
        let err = Catalog::load(records).unwrap_err();
        let Error::CatalogLoad(issues) = err else {
            panic!("expected CatalogLoad");
        };

        assert_eq!(issues.len(), 6, "issues: {:?}", issues);
        assert!(issues.iter().any(|i| i.contains("no_steps") && i.contains("no instructions")));
        assert!(issues.iter().any(|i| i.contains("zero_rep_time") && i.contains("seconds_per_rep")));
        assert!(issues.iter().any(|i| i.contains("negative_rest") && i.contains("rest_seconds")));
        assert!(issues.iter().any(|i| i.contains("zero_sets") && i.contains("default_sets")));
        assert!(issues.iter().any(|i| i.contains("blank_step")));
        assert!(issues.iter().any(|i| i.contains("empty id")));
    }

    #[test]
    fn test_load_normalizes_records() {
        let catalog = Catalog::load(vec![record(" press ")
            .secondary(&[MuscleGroup::Chest, MuscleGroup::Arms])
            .equipment(&["Bodyweight", " Dumbbells "])])
        .unwrap();

        let exercise = catalog.by_id("press").unwrap();
        assert_eq!(
            exercise.secondary_muscles.iter().copied().collect::<Vec<_>>(),
            vec![MuscleGroup::Arms]
        );
        assert_eq!(
            exercise.equipment.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["dumbbells"]
        );
    }

    #[test]
    fn test_lookup_filters() {
        let catalog = default_catalog();

        let chest_beginner_bodyweight = catalog.lookup(
            &LookupCriteria::any()
                .muscle(MuscleGroup::Chest)
                .at_most(DifficultyTier::Beginner)
                .with_equipment(Vec::<String>::new()),
        );
        let ids: Vec<_> = chest_beginner_bodyweight.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["push_up"]);

        let chest_any = catalog.lookup(&LookupCriteria::any().muscle(MuscleGroup::Chest));
        let chest_secondary = catalog.lookup(
            &LookupCriteria::any()
                .muscle(MuscleGroup::Chest)
                .including_secondary(),
        );
        assert!(chest_secondary.len() > chest_any.len());
        assert!(chest_secondary.iter().any(|e| e.id == "bench_dip"));

        assert_eq!(catalog.lookup(&LookupCriteria::any()).len(), catalog.len());
    }

    #[test]
    fn test_fingerprint_tracks_contents() {
        let a = Catalog::load(vec![record("a"), record("b")]).unwrap();
        let b = Catalog::load(vec![record("b"), record("a")]).unwrap();
        let c = Catalog::load(vec![record("a"), record("c")]).unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
