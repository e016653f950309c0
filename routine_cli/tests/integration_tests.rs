//! Integration tests for the routinegen binary.
//!
//! These tests verify end-to-end behavior including:
//! - Routine generation in text and JSON form
//! - Config defaults and catalog files
//! - Exit codes for invalid preferences and bad catalogs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CSV_HEADER: &str = "id,name,primary_muscle,secondary_muscles,equipment,difficulty,\
warmup_seconds,seconds_per_rep,rest_seconds,default_sets,default_reps,instructions,image_url";

/// Helper to create a scratch directory that also serves as the config home
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary, isolated from the user's real config
fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("routinegen"));
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

fn chest_only_catalog(dir: &TempDir) -> PathBuf {
    write(
        dir,
        "catalog.csv",
        &format!(
            "{}\npush_up,Push-ups,chest,arms,,beginner,30,3,45,3,10,Plank|Lower|Push,\n",
            CSV_HEADER
        ),
    )
}

fn json_routine(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

fn generate_json(home: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = cli(home)
        .arg("generate")
        .args(args)
        .arg("--json")
        .output()
        .expect("Failed to run routinegen");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    json_routine(&output.stdout)
}

#[test]
fn test_cli_help() {
    let home = setup_test_dir();
    cli(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout routine generator"));
}

#[test]
fn test_default_command_prints_routine() {
    let home = setup_test_dir();
    cli(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("30 MIN BEGINNER ROUTINE"))
        .stdout(predicate::str::contains("Equipment: Bodyweight"))
        .stdout(predicate::str::contains("Complete 3 sets of"));
}

#[test]
fn test_generate_json_respects_preferences() {
    let home = setup_test_dir();
    let routine = generate_json(
        &home,
        &[
            "--duration",
            "45",
            "--level",
            "intermediate",
            "--equipment",
            "dumbbells",
            "--target",
            "chest",
            "--target",
            "back",
            "--seed",
            "7",
        ],
    );

    assert_eq!(routine["seed"], 7);
    assert_eq!(routine["preferences"]["duration_minutes"], 45);
    let entries = routine["entries"].as_array().unwrap();
    assert!(!entries.is_empty());
    for entry in entries {
        let equipment = entry["exercise"]["equipment"].as_array().unwrap();
        assert!(equipment.iter().all(|t| t == "dumbbells"));
        assert_ne!(entry["exercise"]["difficulty"], "advanced");
    }
}

#[test]
fn test_same_seed_same_output() {
    let home = setup_test_dir();
    let args = ["--duration", "40", "--level", "advanced", "--seed", "99"];

    let first = generate_json(&home, &args);
    let second = generate_json(&home, &args);

    assert_eq!(first, second);
}

#[test]
fn test_shuffle_reports_seed() {
    let home = setup_test_dir();
    let routine = generate_json(&home, &["--shuffle"]);
    assert!(routine["seed"].is_u64());
}

#[test]
fn test_seed_and_shuffle_conflict() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "--seed", "1", "--shuffle"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_duration_exit_code() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "--duration", "5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("duration"));
}

#[test]
fn test_unknown_level_exit_code() {
    let home = setup_test_dir();
    cli(&home)
        .args(["generate", "--level", "elite"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("fitness_level"));
}

#[test]
fn test_partial_coverage_is_success() {
    let home = setup_test_dir();
    let catalog = chest_only_catalog(&home);

    cli(&home)
        .arg("--catalog")
        .arg(&catalog)
        .args(["generate", "--target", "chest", "--target", "legs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Push-ups"))
        .stdout(predicate::str::contains(
            "Partial coverage: no suitable exercises for Legs",
        ));
}

#[test]
fn test_config_supplies_defaults() {
    let home = setup_test_dir();
    let catalog = chest_only_catalog(&home);
    let config = write(
        &home,
        "config.toml",
        &format!(
            "[catalog]\npath = {:?}\n\n[defaults]\nduration_minutes = 20\ntarget_muscle_groups = [\"chest\"]\n",
            catalog.display().to_string()
        ),
    );

    let routine = generate_json(&home, &["--config", config.to_str().unwrap()]);

    assert_eq!(routine["preferences"]["duration_minutes"], 20);
    let ids: Vec<_> = routine["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["exercise"]["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["push_up"]);
}

#[test]
fn test_config_in_default_location() {
    let home = setup_test_dir();
    let config_dir = home.path().join("routinegen");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[defaults]\nfitness_level = \"advanced\"\n",
    )
    .unwrap();

    let routine = generate_json(&home, &[]);
    assert_eq!(routine["preferences"]["fitness_level"], "advanced");
}

#[test]
fn test_invalid_tuning_fails() {
    let home = setup_test_dir();
    let config = write(&home, "config.toml", "[tuning]\nfloor_percent = 0\n");

    cli(&home)
        .arg("--config")
        .arg(&config)
        .arg("generate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("floor_percent"));
}

#[test]
fn test_missing_catalog_exit_code() {
    let home = setup_test_dir();
    cli(&home)
        .arg("--catalog")
        .arg(home.path().join("missing.json"))
        .arg("generate")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_check_catalog_accepts_valid_file() {
    let home = setup_test_dir();
    let catalog = chest_only_catalog(&home);

    cli(&home)
        .arg("check-catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercises: 1"));
}

#[test]
fn test_check_catalog_lists_every_issue() {
    let home = setup_test_dir();
    let catalog = write(
        &home,
        "broken.csv",
        &format!(
            "{}\n\
a,Alpha,chest,,,beginner,30,3,45,3,10,Step,\n\
a,Alpha again,chest,,,beginner,30,3,45,3,10,Step,\n\
b,Beta,legs,,,beginner,30,3,45,0,10,Step,\n",
            CSV_HEADER
        ),
    );

    cli(&home)
        .arg("check-catalog")
        .arg(&catalog)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("duplicate exercise id 'a'"))
        .stderr(predicate::str::contains("default_sets"));
}

#[test]
fn test_catalog_listing_filters() {
    let home = setup_test_dir();
    cli(&home)
        .args(["catalog", "--group", "chest", "--level", "beginner", "--equipment", "bodyweight"])
        .assert()
        .success()
        .stdout(predicate::str::contains("push_up"))
        .stdout(predicate::str::contains("incline_push_up").not())
        .stdout(predicate::str::contains("1 exercise(s)"));
}

#[test]
fn test_init_config_writes_defaults() {
    let home = setup_test_dir();
    cli(&home).arg("init-config").assert().success();

    let path = home.path().join("routinegen").join("config.toml");
    let contents = fs::read_to_string(&path).expect("config written");
    assert!(contents.contains("floor_percent = 70"));
    assert!(contents.contains("duration_minutes = 30"));

    // The written file round-trips through generation
    let routine = generate_json(&home, &["--seed", "1"]);
    assert_eq!(routine["preferences"]["duration_minutes"], 30);

    cli(&home)
        .arg("init-config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--force"));
    cli(&home).args(["init-config", "--force"]).assert().success();
}

#[test]
fn test_init_config_at_explicit_path() {
    let home = setup_test_dir();
    let path = home.path().join("nested").join("routinegen.toml");

    cli(&home)
        .arg("--config")
        .arg(&path)
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("routinegen.toml"));
    assert!(path.exists());
}
