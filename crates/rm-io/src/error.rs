//! Error types for rm-io

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Core error: {0}")]
    Core(#[from] rm_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid number '{value}' in column '{column}' at line {line}")]
    InvalidNumber {
        column: String,
        value: String,
        line: u64,
    },

    #[error("Unmapped code '{value}' in column '{column}' at line {line}")]
    UnmappedCode {
        column: String,
        value: String,
        line: u64,
    },

    #[error("Empty subject id at line {0}")]
    EmptySubject(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
