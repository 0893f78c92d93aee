//! Repeated-measures ANOVA
//!
//! One-way and two-way within-subjects ANOVA on a [`rm_core::Dataset`],
//! reporting for each effect:
//!
//! - F, uncorrected degrees of freedom and p-value
//! - a Greenhouse-Geisser corrected p-value (identical to the uncorrected one
//!   when the effect has a single numerator df)
//! - generalized eta-squared
//! - Mauchly's test of sphericity when the effect has two or more df
//!
//! Analyses never panic or raise on a failed fit. [`one_way`] and
//! [`two_way`] return an [`rm_core::Outcome`]; the `try_*` variants keep
//! the underlying [`rm_core::Error`].
//!
//! # Example
//!
//! ```rust
//! use rm_anova::one_way;
//! use rm_core::{DatasetBuilder, Factor};
//!
//! let factors = vec![Factor::new("Time", ["t1", "t2", "t3"]).unwrap()];
//! let mut builder = DatasetBuilder::new(factors, ["score"]).unwrap();
//! for (subject, values) in [("a", [1.0, 2.0, 4.0]), ("b", [2.0, 2.5, 3.0]), ("c", [1.5, 3.5, 4.0])] {
//!     for (level, value) in ["t1", "t2", "t3"].iter().zip(values) {
//!         builder.push(subject, &[*level], &[Some(value)]).unwrap();
//!     }
//! }
//! let dataset = builder.build().unwrap();
//!
//! let result = one_way(&dataset, "score", "Time");
//! let effect = result.computed().unwrap();
//! assert_eq!((effect.df1, effect.df2), (2, 4));
//! ```

mod distribution;
mod fit;
mod one_way;
pub mod sphericity;
mod two_way;
mod types;

pub use one_way::{fit_one_way, one_way, try_one_way};
pub use sphericity::SphericityEstimate;
pub use two_way::{fit_two_way, try_two_way, two_way};
pub use types::{interaction_label, AnovaEffect, MauchlyTest, TwoWayAnova};
