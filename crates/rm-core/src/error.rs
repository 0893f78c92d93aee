//! Error types for repeated-measures analysis
//!
//! Provides a unified error type for all rm-stats crates. Errors of this type
//! are either fatal (malformed input) or are converted into an
//! [`UnavailableReason`](crate::UnavailableReason) by the inferential engines.

use thiserror::Error;

/// Core error type for repeated-measures operations
#[derive(Error, Debug)]
pub enum Error {
    /// A factor, measure or subject column is not present in the dataset
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A factor level that is not part of the factor's declared level set
    #[error("Unmapped level '{value}' for factor '{factor}'")]
    UnmappedLevel { factor: String, value: String },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The dataset has no observations
    #[error("Dataset contains no observations")]
    EmptyDataset,

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} subjects, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// A factor has fewer levels than the analysis needs
    #[error("Factor '{factor}' has {levels} level(s), at least 2 are required")]
    TooFewLevels { factor: String, levels: usize },

    /// A subject has no usable value for a design cell
    #[error("Subject '{subject}' has no observation for cell '{cell}'")]
    MissingCell { subject: String, cell: String },

    /// Error variance is zero or otherwise unusable
    #[error("Degenerate variance: {0}")]
    DegenerateVariance(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// The inferential backend is disabled for this run
    #[error("Inference backend not available")]
    BackendUnavailable,
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a column lookup miss
    pub fn unknown_column(name: &str) -> Self {
        Self::UnknownColumn(name.to_string())
    }

    /// Create an error for a size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} is NaN or infinite"))
    }

    /// Whether this error describes malformed input rather than a failed fit
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownColumn(_)
                | Self::UnmappedLevel { .. }
                | Self::InvalidInput(_)
                | Self::EmptyDataset
        )
    }
}
