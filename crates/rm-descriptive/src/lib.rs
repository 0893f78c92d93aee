//! Grouped descriptive statistics
//!
//! For a measure and 1–3 grouping factors, computes per group the mean,
//! sample standard deviation (n − 1), standard error, the half-width of a
//! 95% confidence interval using the large-sample normal approximation
//! (1.96 × SE), and the number of observations.
//!
//! # Example
//!
//! ```rust
//! use rm_core::{CellKey, DatasetBuilder, Factor};
//! use rm_descriptive::describe;
//!
//! let factors = vec![Factor::new("Level", ["A", "B"]).unwrap()];
//! let mut builder = DatasetBuilder::new(factors, ["score"]).unwrap();
//! builder.push("s1", &["A"], &[Some(1.0)]).unwrap();
//! builder.push("s1", &["B"], &[Some(3.0)]).unwrap();
//! builder.push("s2", &["A"], &[Some(2.0)]).unwrap();
//! builder.push("s2", &["B"], &[Some(4.0)]).unwrap();
//! let dataset = builder.build().unwrap();
//!
//! let stats = describe(&dataset, "score", &["Level"]).unwrap();
//! assert_eq!(stats.get(&CellKey::new(["A"])).unwrap().mean, 1.5);
//! ```

mod aggregator;
mod types;

pub use aggregator::{describe, MAX_GROUPING_FACTORS};
pub use types::{DescriptiveSummary, Descriptives, Z_95};
