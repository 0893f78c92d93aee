//! # rm-io
//!
//! Reading study data from CSV and writing reports as JSON.
//!
//! The loader is driven by two configurations: the [`rm_study::StudyConfig`]
//! says which factors and measures the analysis needs, and a [`LoaderConfig`]
//! says how the raw file spells them (header renames, level codes and
//! composite measures derived after loading).
//!
//! ```rust,no_run
//! use rm_io::{load_csv, write_report_file, LoaderConfig};
//! use rm_study::{StudyConfig, StudyRunner};
//!
//! let config = StudyConfig::default();
//! let dataset = load_csv("data.csv", &config, &LoaderConfig::default())?;
//! let report = StudyRunner::with_detected_capabilities(config).run(&dataset)?;
//! write_report_file("results_data.json", &report)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod emitter;
pub mod error;
pub mod loader;

pub use emitter::{report_to_string, write_report, write_report_file};
pub use error::{Error, Result};
pub use loader::{load_csv, load_reader, CompositeMeasure, LevelCodes, LoaderConfig};
