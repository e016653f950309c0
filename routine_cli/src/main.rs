use clap::{Args, Parser, Subcommand};
use routine_core::*;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "routinegen")]
#[command(about = "Workout routine generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Catalog file (.json or .csv); overrides the config file
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a workout routine (default)
    Generate(GenerateArgs),

    /// List catalog exercises
    Catalog {
        /// Primary muscle group (chest, back, legs, shoulders, arms, core)
        #[arg(long)]
        group: Option<String>,

        /// Highest difficulty to include (beginner, intermediate, advanced)
        #[arg(long)]
        level: Option<String>,

        /// Only exercises doable with this equipment (repeatable)
        #[arg(long)]
        equipment: Vec<String>,
    },

    /// Load a catalog file and report integrity issues
    CheckCatalog {
        path: PathBuf,
    },

    /// Write a config file with every default filled in
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// Workout length in minutes (10-120)
    #[arg(long)]
    duration: Option<i64>,

    /// Fitness level (beginner, intermediate, advanced)
    #[arg(long)]
    level: Option<String>,

    /// Available equipment (repeatable); "bodyweight" for none
    #[arg(long)]
    equipment: Vec<String>,

    /// Target muscle group (repeatable); all groups when omitted
    #[arg(long)]
    target: Vec<String>,

    /// Seed for the candidate shuffle
    #[arg(long, conflicts_with = "shuffle")]
    seed: Option<u64>,

    /// Shuffle with a fresh random seed
    #[arg(long)]
    shuffle: bool,

    /// Print the routine as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    routine_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            exit_code(&e)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::InitConfig { force }) = cli.command {
        return cmd_init_config(cli.config.as_deref(), force);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let catalog_path = cli.catalog.or_else(|| config.catalog.path.clone());
    tracing::debug!(
        "Catalog source: {}",
        catalog_path
            .as_deref()
            .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
    );

    match cli.command {
        Some(Commands::Generate(args)) => cmd_generate(args, catalog_path.as_deref(), &config),
        Some(Commands::Catalog {
            group,
            level,
            equipment,
        }) => cmd_catalog(catalog_path.as_deref(), group, level, equipment),
        Some(Commands::CheckCatalog { path }) => cmd_check_catalog(&path),
        Some(Commands::InitConfig { force }) => cmd_init_config(cli.config.as_deref(), force),
        None => {
            // Default to "generate" command
            cmd_generate(GenerateArgs::default(), catalog_path.as_deref(), &config)
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Cow<'static, Catalog>> {
    match path {
        Some(path) => Ok(Cow::Owned(load_catalog_file(path)?)),
        None => Ok(Cow::Borrowed(default_catalog())),
    }
}

fn cmd_generate(args: GenerateArgs, catalog_path: Option<&Path>, config: &Config) -> Result<()> {
    let defaults = &config.defaults;
    let raw = RawPreferences {
        duration: args
            .duration
            .unwrap_or_else(|| i64::from(defaults.duration_minutes)),
        fitness_level: args
            .level
            .unwrap_or_else(|| defaults.fitness_level.as_str().to_string()),
        equipment: if args.equipment.is_empty() {
            defaults.equipment.clone()
        } else {
            args.equipment
        },
        target_muscle_groups: if args.target.is_empty() {
            defaults.target_muscle_groups.clone()
        } else {
            args.target
        },
    };
    let prefs = WorkoutPreferences::try_from(raw)?;

    let catalog = load_catalog(catalog_path)?;
    let generator = Generator::new(config.tuning.clone())?;
    let seed = if args.shuffle {
        Some(rand::random::<u64>())
    } else {
        args.seed
    };

    let routine = generator.generate(&prefs, &catalog, seed)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&routine)?);
    } else {
        display_routine(&routine);
    }

    Ok(())
}

fn cmd_catalog(
    catalog_path: Option<&Path>,
    group: Option<String>,
    level: Option<String>,
    equipment: Vec<String>,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let mut criteria = LookupCriteria::any();
    if let Some(group) = group {
        let group = group.parse::<MuscleGroup>().map_err(|e| Error::InvalidPreferences {
            field: "group",
            constraint: e.to_string(),
        })?;
        criteria = criteria.muscle(group);
    }
    if let Some(level) = level {
        let level = level
            .parse::<DifficultyTier>()
            .map_err(|e| Error::InvalidPreferences {
                field: "level",
                constraint: e.to_string(),
            })?;
        criteria = criteria.at_most(level);
    }
    if !equipment.is_empty() {
        criteria = criteria.with_equipment(equipment);
    }

    let exercises = catalog.lookup(&criteria);
    if exercises.is_empty() {
        println!("No exercises match.");
        return Ok(());
    }

    for exercise in &exercises {
        println!(
            "  {:<28} {:<30} {:<10} {:<13} {}",
            exercise.id,
            exercise.name,
            exercise.primary_muscle.label(),
            exercise.difficulty.label(),
            exercise.equipment_label()
        );
    }
    println!("\n{} exercise(s)", exercises.len());

    Ok(())
}

fn cmd_check_catalog(path: &Path) -> Result<()> {
    let catalog = load_catalog_file(path)?;

    println!("✓ {} is valid", path.display());
    println!("  Exercises: {}", catalog.len());
    println!("  Fingerprint: {}", catalog.fingerprint());

    Ok(())
}

fn cmd_init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_config_path()?,
    };
    if target.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists; pass --force to overwrite it",
            target.display()
        )));
    }

    let config = Config::default();
    match path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }

    println!("✓ Wrote default config to {}", target.display());
    Ok(())
}

fn display_routine(routine: &Routine) {
    let prefs = &routine.preferences;

    println!("\n╭─────────────────────────────────────────╮");
    println!(
        "│  {} MIN {} ROUTINE",
        prefs.duration_minutes,
        prefs.fitness_level.as_str().to_uppercase()
    );
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Equipment: {}", equipment_label(&prefs.equipment));
    println!(
        "  Estimated: ~{} min ({} s), {} exercises",
        routine.total_minutes(),
        routine.total_seconds,
        routine.entries.len()
    );
    if let Some(seed) = routine.seed {
        println!("  Seed: {}", seed);
    }

    for (i, entry) in routine.entries.iter().enumerate() {
        println!();
        println!(
            "  {}. {}  [{}]",
            i + 1,
            entry.exercise.name,
            entry.exercise.primary_muscle.label()
        );
        println!(
            "     {} x {} reps, ~{} s",
            entry.sets, entry.reps, entry.estimated_seconds
        );
        for line in &entry.instructions {
            println!("     → {}", line);
        }
        if let Some(ref url) = entry.exercise.image_url {
            println!("     ℹ Image: {}", url);
        }
    }

    if let Coverage::Partial(groups) = routine.coverage() {
        let labels: Vec<_> = groups.iter().map(|g| g.label()).collect();
        println!();
        println!(
            "  ⚠ Partial coverage: no suitable exercises for {}",
            labels.join(", ")
        );
    }

    println!();
}

fn report_error(error: &Error) {
    for line in error_lines(error) {
        eprintln!("{}", line);
    }
}

fn error_lines(error: &Error) -> Vec<String> {
    match error {
        Error::CatalogLoad(issues) => std::iter::once("Catalog errors:".to_string())
            .chain(issues.iter().map(|issue| format!("  - {}", issue)))
            .collect(),
        // Invariant details are logged by the engine, never shown as advice
        Error::Internal(_) => vec![
            format!("Error: {}.", error),
            "This is a bug in routinegen; please report it.".to_string(),
        ],
        other => vec![format!("Error: {}", other)],
    }
}

fn exit_code(error: &Error) -> ExitCode {
    match error {
        Error::InvalidPreferences { .. } => ExitCode::from(2),
        Error::CatalogLoad(_) => ExitCode::from(3),
        _ => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routine_core::validator::{Invariant, RoutineInvariantViolation};

    #[test]
    fn test_internal_error_is_not_user_advice() {
        let err = Error::Internal(RoutineInvariantViolation {
            invariant: Invariant::Coverage,
            exercise_id: None,
            detail: "Chest left uncovered".into(),
        });

        let text = error_lines(&err).join("\n");
        assert!(text.contains("Internal error while generating routine"));
        assert!(!text.contains("preferences"));
        assert!(!text.contains("Chest"));
        assert_eq!(exit_code(&err), ExitCode::FAILURE);
    }

    #[test]
    fn test_catalog_issues_listed() {
        let err = Error::CatalogLoad(vec!["a.csv: duplicate exercise id 'a'".into()]);
        assert_eq!(
            error_lines(&err),
            vec!["Catalog errors:", "  - a.csv: duplicate exercise id 'a'"]
        );
        assert_eq!(exit_code(&err), ExitCode::from(3));
    }
}
