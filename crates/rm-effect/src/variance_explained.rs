//! Variance explained effect sizes for repeated-measures ANOVA

use crate::{EffectKind, EffectSize};
use rm_core::{Error, Result};

/// Generalized eta-squared (η²_G) for designs whose factors are all measured
///
/// In a within-subjects design every error stratum and the subject stratum
/// are measured variance, so
///
/// η²_G = SS_effect / (SS_effect + SS_subjects + Σ SS_error)
///
/// Unlike partial eta-squared the denominator does not change with the
/// effect being tested, which keeps values comparable across designs.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralizedEtaSquared;

impl GeneralizedEtaSquared {
    pub fn new() -> Self {
        Self
    }

    /// Compute η²_G from the effect sum of squares and the measured strata
    pub fn compute(&self, ss_effect: f64, ss_measured: &[f64]) -> Result<EffectSize> {
        if ss_effect < 0.0 || ss_measured.iter().any(|&ss| ss < 0.0) {
            return Err(Error::InvalidInput(
                "Sums of squares must be non-negative".to_string(),
            ));
        }
        let denominator = ss_effect + ss_measured.iter().sum::<f64>();
        if !denominator.is_finite() {
            return Err(Error::non_finite("eta-squared denominator"));
        }
        if denominator <= 0.0 {
            return Err(Error::DegenerateVariance(
                "total sum of squares is zero".to_string(),
            ));
        }

        let eta_squared = (ss_effect / denominator).clamp(0.0, 1.0);
        Ok(EffectSize::new(
            EffectKind::GeneralizedEtaSquared,
            eta_squared,
            None,
        ))
    }
}

/// Partial eta-squared, SS_effect / (SS_effect + SS_error)
pub fn partial_eta_squared(ss_effect: f64, ss_error: f64) -> Option<f64> {
    let denominator = ss_effect + ss_error;
    (denominator > 0.0).then(|| (ss_effect / denominator).clamp(0.0, 1.0))
}
