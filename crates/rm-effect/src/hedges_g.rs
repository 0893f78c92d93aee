//! Hedges' g for paired samples
//!
//! Hedges' g is a bias-corrected version of Cohen's d that provides a less
//! biased estimate of effect size, especially for small samples. For paired
//! data the standardizer is the average of the two condition variances
//! (Cohen's d_av), which keeps g comparable with between-subject effects.

use crate::{EffectKind, EffectSize};
use rm_core::{math, Error, Result};

/// Hedges' g effect size estimator for two paired conditions
///
/// Hedges' g is calculated as:
/// g = d × J
///
/// where d = (x̄₁ − x̄₂) / √((s₁² + s₂²) / 2) and J is the bias correction
/// factor J = 1 − 3/(4(n₁ + n₂) − 9).
#[derive(Debug, Clone, Copy, Default)]
pub struct HedgesG;

impl HedgesG {
    /// Create a new Hedges' g estimator
    pub fn new() -> Self {
        Self
    }

    /// Calculate the bias correction factor J
    ///
    /// Undefined when the denominator is not positive (n₁ + n₂ < 3).
    pub fn bias_correction_factor(n1: usize, n2: usize) -> Option<f64> {
        let denom = 4.0 * (n1 + n2) as f64 - 9.0;
        (denom > 0.0).then(|| 1.0 - 3.0 / denom)
    }

    /// Uncorrected d_av
    pub fn cohen_d_av(&self, group1: &[f64], group2: &[f64]) -> Result<f64> {
        if group1.len() != group2.len() {
            return Err(Error::size_mismatch(group1.len(), group2.len(), "paired samples"));
        }
        if group1.len() < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: group1.len(),
            });
        }

        let (Some(mean1), Some(mean2)) = (math::mean(group1), math::mean(group2)) else {
            return Err(Error::InvalidInput("Both groups must be non-empty".to_string()));
        };
        let (Some(var1), Some(var2)) = (math::sample_variance(group1), math::sample_variance(group2))
        else {
            return Err(Error::InvalidInput("Both groups need two values".to_string()));
        };

        let scale = ((var1 + var2) / 2.0).sqrt();
        if scale <= 0.0 {
            return Err(Error::DegenerateVariance(
                "both conditions have zero variance".to_string(),
            ));
        }
        Ok((mean1 - mean2) / scale)
    }

    /// Compute g for paired samples
    pub fn compute_paired(&self, group1: &[f64], group2: &[f64]) -> Result<EffectSize> {
        let d = self.cohen_d_av(group1, group2)?;
        let j = Self::bias_correction_factor(group1.len(), group2.len()).ok_or_else(|| {
            Error::Computation("bias correction undefined for this sample size".to_string())
        })?;

        Ok(EffectSize::new(EffectKind::HedgesG, d * j, Some(group1.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bias_correction_factor() {
        // Test small sample correction
        let j_small = HedgesG::bias_correction_factor(5, 5).unwrap();
        assert!(j_small < 1.0);
        assert!(j_small > 0.9);

        // Test large sample correction
        let j_large = HedgesG::bias_correction_factor(50, 50).unwrap();
        assert!(j_large > 0.99);
        assert!(j_large < 1.0);

        assert!(HedgesG::bias_correction_factor(1, 1).is_none());
    }

    #[test]
    fn test_two_subject_pair() {
        // A = [1, 2], B = [3, 4]: d = -2 / sqrt(0.5), J = 1 - 3/7
        let g = HedgesG::new().compute_paired(&[1.0, 2.0], &[3.0, 4.0]).unwrap();
        let expected = -2.0 / 0.5f64.sqrt() * (1.0 - 3.0 / 7.0);
        assert_abs_diff_eq!(g.value, expected, epsilon = 1e-12);
        assert_eq!(g.n_pairs, Some(2));
    }

    #[test]
    fn test_hedges_g_smaller_than_d() {
        let group1 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let group2 = [3.0, 4.5, 5.0, 6.0, 7.5];

        let estimator = HedgesG::new();
        let d = estimator.cohen_d_av(&group1, &group2).unwrap();
        let g = estimator.compute_paired(&group1, &group2).unwrap();

        assert!(g.value.abs() < d.abs());
        assert_eq!(g.value.signum(), d.signum());
    }

    #[test]
    fn test_sign_flips_with_order() {
        let a = [2.0, 4.0, 5.0];
        let b = [1.0, 1.5, 3.0];
        let estimator = HedgesG::new();
        let ab = estimator.compute_paired(&a, &b).unwrap().value;
        let ba = estimator.compute_paired(&b, &a).unwrap().value;
        assert_abs_diff_eq!(ab, -ba, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        let estimator = HedgesG::new();
        assert!(estimator.compute_paired(&[1.0, 2.0], &[1.0]).is_err());
        assert!(estimator.compute_paired(&[1.0], &[2.0]).is_err());
        assert!(matches!(
            estimator.compute_paired(&[5.0, 5.0], &[5.0, 5.0]),
            Err(Error::DegenerateVariance(_))
        ));
    }
}
