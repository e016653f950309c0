#![forbid(unsafe_code)]

//! Core domain model and business logic for the workout routine generator.
//!
//! This crate provides:
//! - Domain types (muscle groups, difficulty tiers, exercises, routines)
//! - The exercise catalog, its file formats and a swappable shared store
//! - Constraint evaluation, routine composition and post-hoc validation
//! - The generation service tying them together
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod preferences;
pub mod catalog;
pub mod constraints;
pub mod composer;
pub mod validator;
pub mod engine;
pub mod source;
pub mod store;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use preferences::{RawPreferences, WorkoutPreferences};
pub use catalog::{default_catalog, Catalog, ExerciseRecord, LookupCriteria};
pub use config::{Config, Tuning};
pub use engine::{generate, Generator};
pub use store::CatalogStore;
pub use source::load_catalog_file;
pub use validator::RoutineInvariantViolation;
