//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Repeated-measures analysis of the HRI speed-accuracy study
///
/// Reads the study CSV, computes descriptives, RM-ANOVA and post-hoc tests
/// for every configured measure and writes the results to
/// results_data.json in the working directory.
/// Log verbosity follows RUST_LOG (default: info).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// CSV file with one row per participant and condition
    #[arg(value_name = "INPUT", default_value = "01-Winterschool-Data.csv")]
    pub input: PathBuf,
}
