//! Catalog files on disk.
//!
//! A catalog file is either a JSON array of `ExerciseRecord`s or a CSV table
//! with one exercise per row. In CSV, `secondary_muscles`, `equipment` and
//! `instructions` hold `|`-separated lists.
//!
//! Every failure, including a missing file, is reported as
//! `Error::CatalogLoad` naming the file.

use crate::catalog::{Catalog, ExerciseRecord};
use crate::types::{DifficultyTier, MuscleGroup};
use crate::{Error, Result};
use fs2::FileExt;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const LIST_SEPARATOR: char = '|';

/// A row in a CSV catalog
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    name: String,
    primary_muscle: MuscleGroup,
    #[serde(default)]
    secondary_muscles: String,
    #[serde(default)]
    equipment: String,
    difficulty: DifficultyTier,
    warmup_seconds: i64,
    seconds_per_rep: i64,
    rest_seconds: i64,
    default_sets: i64,
    default_reps: i64,
    instructions: String,
    #[serde(default)]
    image_url: Option<String>,
}

fn split_list(field: &str) -> Vec<String> {
    field
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl CsvRow {
    fn into_record(self, line: u64, issues: &mut Vec<String>) -> ExerciseRecord {
        let mut secondary_muscles = Vec::new();
        for name in split_list(&self.secondary_muscles) {
            match name.parse::<MuscleGroup>() {
                Ok(group) => secondary_muscles.push(group),
                Err(e) => issues.push(format!("line {}: {}", line, e)),
            }
        }

        ExerciseRecord {
            id: self.id,
            name: self.name,
            primary_muscle: self.primary_muscle,
            secondary_muscles,
            equipment: split_list(&self.equipment),
            difficulty: self.difficulty,
            warmup_seconds: self.warmup_seconds,
            seconds_per_rep: self.seconds_per_rep,
            rest_seconds: self.rest_seconds,
            default_sets: self.default_sets,
            default_reps: self.default_reps,
            // Blank steps are kept so that integrity checks can report them
            instructions: if self.instructions.trim().is_empty() {
                Vec::new()
            } else {
                self.instructions
                    .split(LIST_SEPARATOR)
                    .map(|s| s.trim().to_string())
                    .collect()
            },
            image_url: self.image_url,
        }
    }
}

/// Parse JSON catalog records
pub fn read_records_json(contents: &str) -> Result<Vec<ExerciseRecord>> {
    Ok(serde_json::from_str(contents)?)
}

/// Parse CSV catalog records, collecting every malformed row
pub fn read_records_csv(contents: &str) -> Result<Vec<ExerciseRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut records = Vec::new();
    let mut issues = Vec::new();
    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        match row {
            Ok(row) => {
                // Header is line 1
                let line = i as u64 + 2;
                records.push(row.into_record(line, &mut issues));
            }
            Err(e) => issues.push(e.to_string()),
        }
    }

    if !issues.is_empty() {
        return Err(Error::CatalogLoad(issues));
    }
    Ok(records)
}

/// Read a whole file under a shared lock
fn read_locked(path: &Path) -> std::io::Result<String> {
    let file = File::open(path)?;
    FileExt::lock_shared(&file)?;

    let mut contents = String::new();
    std::io::BufReader::new(&file).read_to_string(&mut contents)?;
    FileExt::unlock(&file)?;

    Ok(contents)
}

/// Load and check a catalog from a `.json` or `.csv` file
pub fn load_catalog_file(path: &Path) -> Result<Catalog> {
    let in_file = |issues: Vec<String>| {
        Error::CatalogLoad(
            issues
                .into_iter()
                .map(|issue| format!("{}: {}", path.display(), issue))
                .collect(),
        )
    };

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let contents = read_locked(path).map_err(|e| in_file(vec![e.to_string()]))?;

    let records = match extension.as_deref() {
        Some("json") => read_records_json(&contents),
        Some("csv") => read_records_csv(&contents),
        _ => {
            return Err(in_file(vec![
                "unsupported catalog format (expected .json or .csv)".into(),
            ]))
        }
    };

    let catalog = records
        .and_then(Catalog::load)
        .map_err(|e| match e {
            Error::CatalogLoad(issues) => in_file(issues),
            other => in_file(vec![other.to_string()]),
        })?;

    tracing::info!("Loaded {} exercises from {:?}", catalog.len(), path);
    Ok(catalog)
}
