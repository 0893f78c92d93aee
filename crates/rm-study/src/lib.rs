//! Study-level repeated-measures analysis
//!
//! Ties the analysis crates together for a configured study:
//!
//! - [`StudyConfig`]: factors, measures, interaction pairs and the primary
//!   factor for post-hoc tests (defaults to the HRI speed-accuracy study)
//! - [`MeasureAnalyzer`]: descriptives, one-way and two-way ANOVA and
//!   post-hoc comparisons for one measure
//! - [`StudyRunner`]: validates the dataset and analyses every measure
//! - [`summarize`]: the list of significant main effects and interactions
//!
//! Inferential analyses depend on [`Capabilities`]. Without inference the
//! report still carries every descriptive table and all ANOVA and post-hoc
//! entries are `null`.
//!
//! # Features
//!
//! - `inference` (default): enable ANOVA and post-hoc tests in
//!   [`Capabilities::detect`]
//! - `parallel`: analyse measures concurrently with rayon; output order is
//!   unchanged

mod analyzer;
mod capability;
pub mod config;
pub mod report;
mod runner;
mod summary;

pub use analyzer::MeasureAnalyzer;
pub use capability::Capabilities;
pub use indexmap::IndexMap;
pub use config::{FactorSpec, MeasureSpec, ScaleSpec, StudyConfig};
pub use report::{MeasureReport, StudyInfo, StudyReport};
pub use runner::StudyRunner;
pub use summary::{summarize, SignificantEffect, Summary};
