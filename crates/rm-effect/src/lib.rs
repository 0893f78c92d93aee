//! Effect sizes for repeated-measures designs
//!
//! Effect sizes quantify the magnitude of differences between conditions,
//! beyond statistical significance.
//!
//! # Supported Effect Sizes
//!
//! - **Hedges' g** (paired): bias-corrected standardized mean difference
//!   using the average condition variance as standardizer
//! - **Generalized eta-squared (η²_G)**: proportion of measured variance
//!   explained by an ANOVA effect, comparable across designs
//! - **Partial eta-squared**: reported alongside for reference
//!
//! # Example
//!
//! ```rust
//! use rm_effect::HedgesG;
//!
//! let before = [1.0, 2.0, 4.0];
//! let after = [3.0, 4.0, 5.0];
//! let g = HedgesG::new().compute_paired(&before, &after).unwrap();
//! println!("{g}");
//! ```

mod hedges_g;
mod types;
mod variance_explained;

pub use hedges_g::HedgesG;
pub use types::{EffectKind, EffectSize, Magnitude};
pub use variance_explained::{partial_eta_squared, GeneralizedEtaSquared};

/// Convenience constructor
pub fn hedges_g() -> HedgesG {
    HedgesG::new()
}
