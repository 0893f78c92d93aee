//! Core data model for repeated-measures analysis
//!
//! This crate provides the pieces every other rm-stats crate builds on:
//!
//! - [`Dataset`]: a validated long-format table with within-subject
//!   [`Factor`]s and optional measure values
//! - [`SubjectCellTable`]: per-subject cell means used by the inferential tests
//! - [`CellKey`]: collision-free keys for design cells
//! - [`Outcome`]: computed-or-unavailable results for analyses that may fail
//! - [`Error`]: the shared error taxonomy
//!
//! # Example
//!
//! ```rust
//! use rm_core::{DatasetBuilder, Factor};
//!
//! let factors = vec![Factor::new("Condition", ["A", "B"]).unwrap()];
//! let mut builder = DatasetBuilder::new(factors, ["score"]).unwrap();
//! builder.push("s1", &["A"], &[Some(1.0)]).unwrap();
//! builder.push("s1", &["B"], &[Some(3.0)]).unwrap();
//! let dataset = builder.build().unwrap();
//!
//! assert_eq!(dataset.n_subjects(), 1);
//! assert!(dataset.design_check().is_fully_crossed());
//! ```

pub mod dataset;
pub mod error;
pub mod key;
pub mod layout;
pub mod math;
pub mod outcome;

pub use dataset::{Dataset, DatasetBuilder, DesignCheck, DesignViolation, Factor};
pub use error::{Error, Result};
pub use key::CellKey;
pub use layout::SubjectCellTable;
pub use outcome::{Outcome, UnavailableReason};

/// Significance level used for every decision in the workspace
pub const ALPHA: f64 = 0.05;
