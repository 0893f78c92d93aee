//! Computed-or-unavailable results
//!
//! Inferential analyses never raise on a failed fit. They return
//! [`Outcome::Unavailable`] with a typed reason, and report consumers treat
//! that as "omit", never as zero or false.

use crate::Error;
use serde::{Serialize, Serializer};
use std::fmt;

/// Why an analysis produced no result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// Inference was disabled for this run
    BackendMissing,
    /// Fewer subjects than the test needs
    InsufficientSubjects { required: usize, actual: usize },
    /// A factor has fewer than two levels
    TooFewLevels { factor: String, levels: usize },
    /// A subject lacks a value for one of the analysed cells
    MissingCells { subject: String, cell: String },
    /// The error term has no variance
    DegenerateVariance(String),
    /// Any other numerical failure
    Numerical(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackendMissing => write!(f, "inference backend not available"),
            Self::InsufficientSubjects { required, actual } => {
                write!(f, "need at least {required} subjects, got {actual}")
            }
            Self::TooFewLevels { factor, levels } => {
                write!(f, "factor '{factor}' has only {levels} level(s)")
            }
            Self::MissingCells { subject, cell } => {
                write!(f, "subject '{subject}' has no value for cell '{cell}'")
            }
            Self::DegenerateVariance(msg) => write!(f, "degenerate variance: {msg}"),
            Self::Numerical(msg) => write!(f, "numerical failure: {msg}"),
        }
    }
}

impl From<Error> for UnavailableReason {
    fn from(err: Error) -> Self {
        match err {
            Error::BackendUnavailable => Self::BackendMissing,
            Error::InsufficientData { expected, actual } => Self::InsufficientSubjects {
                required: expected,
                actual,
            },
            Error::TooFewLevels { factor, levels } => Self::TooFewLevels { factor, levels },
            Error::MissingCell { subject, cell } => Self::MissingCells { subject, cell },
            Error::DegenerateVariance(msg) => Self::DegenerateVariance(msg),
            other => Self::Numerical(other.to_string()),
        }
    }
}

/// Result of an inferential analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Computed(T),
    Unavailable(UnavailableReason),
}

impl<T> Outcome<T> {
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// The value, if computed
    pub fn computed(&self) -> Option<&T> {
        match self {
            Self::Computed(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }

    /// The reason, if unavailable
    pub fn reason(&self) -> Option<&UnavailableReason> {
        match self {
            Self::Computed(_) => None,
            Self::Unavailable(reason) => Some(reason),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Computed(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Computed(value) => Outcome::Computed(f(value)),
            Self::Unavailable(reason) => Outcome::Unavailable(reason),
        }
    }
}

impl<T> From<crate::Result<T>> for Outcome<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(value) => Self::Computed(value),
            Err(err) => Self::Unavailable(err.into()),
        }
    }
}

/// Unavailable outcomes serialize as `null`
impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Computed(value) => serializer.serialize_some(value),
            Self::Unavailable(_) => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_map_to_reasons() {
        let reason: UnavailableReason = Error::InsufficientData { expected: 2, actual: 1 }.into();
        assert_eq!(
            reason,
            UnavailableReason::InsufficientSubjects { required: 2, actual: 1 }
        );

        let reason: UnavailableReason = Error::BackendUnavailable.into();
        assert_eq!(reason, UnavailableReason::BackendMissing);

        let reason: UnavailableReason = Error::Computation("boom".into()).into();
        assert!(matches!(reason, UnavailableReason::Numerical(msg) if msg.contains("boom")));
    }

    #[test]
    fn test_outcome_from_result() {
        let ok: Outcome<u8> = Ok::<u8, Error>(3).into();
        assert_eq!(ok.computed(), Some(&3));
        assert!(ok.reason().is_none());

        let err: Outcome<u8> = Err::<u8, Error>(Error::DegenerateVariance("zero".into())).into();
        assert!(!err.is_computed());
        assert_eq!(
            err.reason(),
            Some(&UnavailableReason::DegenerateVariance("zero".into()))
        );
    }

    #[test]
    fn test_unavailable_serializes_as_null() {
        let unavailable: Outcome<f64> = Outcome::Unavailable(UnavailableReason::BackendMissing);
        assert_eq!(serde_json::to_string(&unavailable).unwrap(), "null");

        let computed: Outcome<f64> = Outcome::Computed(1.5);
        assert_eq!(serde_json::to_string(&computed).unwrap(), "1.5");
    }

    #[test]
    fn test_reason_display() {
        let reason = UnavailableReason::MissingCells {
            subject: "P7".into(),
            cell: "Risky".into(),
        };
        assert_eq!(reason.to_string(), "subject 'P7' has no value for cell 'Risky'");
    }
}
