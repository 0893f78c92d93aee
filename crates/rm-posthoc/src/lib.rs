//! Post-hoc pairwise comparisons for within-subject factors
//!
//! For every pair of levels of a factor, runs a paired t-test on the
//! per-subject level means, adjusts the family of p-values (Bonferroni by
//! default) and reports Hedges' g as the effect size.
//!
//! # Example
//!
//! ```rust
//! use rm_core::{DatasetBuilder, Factor};
//! use rm_posthoc::{pairwise, PAdjust};
//!
//! let factors = vec![Factor::new("Level", ["A", "B"]).unwrap()];
//! let mut builder = DatasetBuilder::new(factors, ["y"]).unwrap();
//! for (subject, a, b) in [("1", 1.0, 3.0), ("2", 2.0, 4.5), ("3", 2.5, 3.5)] {
//!     builder.push(subject, &["A"], &[Some(a)]).unwrap();
//!     builder.push(subject, &["B"], &[Some(b)]).unwrap();
//! }
//! let dataset = builder.build().unwrap();
//!
//! let comparisons = pairwise(&dataset, "y", "Level", PAdjust::Bonferroni);
//! let first = &comparisons.computed().unwrap()[0];
//! assert_eq!(first.contrast, "A vs B");
//! assert_eq!(first.p, first.p_adj);
//! ```

mod adjust;
mod paired;
mod pairwise;

pub use adjust::PAdjust;
pub use paired::{paired_t_test, PairedTTest};
pub use pairwise::{pairwise, try_pairwise, PairwiseComparison};
