//! # rm-stats
//!
//! Analysis of within-subjects (repeated-measures) studies.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`rm_core`]: dataset model, cell keys, `Outcome` and errors
//! - [`rm_effect`]: generalized eta-squared and Hedges' g
//! - [`rm_descriptive`]: grouped descriptive statistics
//! - [`rm_anova`]: one-way and two-way RM-ANOVA with Greenhouse-Geisser correction
//! - [`rm_posthoc`]: paired t-tests with multiple-comparison adjustment
//! - [`rm_study`]: study configuration, runner and report
//! - [`rm_io`]: CSV loading and JSON output
//!
//! The `rm-stats` binary wires them together: load the CSV, run every
//! configured analysis, write `results_data.json`.
//!
//! ## Features
//!
//! - `inference` (default): ANOVA and post-hoc tests; without it the report
//!   carries descriptives only
//! - `parallel`: analyse measures concurrently

pub use rm_anova;
pub use rm_core;
pub use rm_descriptive;
pub use rm_effect;
pub use rm_io;
pub use rm_posthoc;
pub use rm_study;

pub use rm_core::{Dataset, Error, Outcome, Result, UnavailableReason};
pub use rm_study::{Capabilities, StudyConfig, StudyReport, StudyRunner};
