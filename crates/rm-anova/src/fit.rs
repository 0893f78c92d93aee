//! Shared assembly of an effect from its sums of squares

use crate::distribution::f_upper_tail;
use crate::sphericity::SphericityEstimate;
use crate::AnovaEffect;
use rm_core::{Error, Result, ALPHA};
use rm_effect::GeneralizedEtaSquared;

/// Error terms below this fraction of the measured variance count as zero
const RELATIVE_TOLERANCE: f64 = 1e-12;

/// Sums of squares and degrees of freedom of one effect
pub(crate) struct Partition {
    pub source: String,
    pub ss_effect: f64,
    pub ss_error: f64,
    pub df1: usize,
    pub df2: usize,
}

/// Turn a partition into a tested effect
///
/// `ss_measured` are all measured strata of the design (subjects and every
/// error term), the η²_G denominator apart from the effect itself.
pub(crate) fn assemble(
    partition: Partition,
    ss_measured: &[f64],
    sphericity: SphericityEstimate,
) -> Result<AnovaEffect> {
    let Partition {
        source,
        ss_effect,
        ss_error,
        df1,
        df2,
    } = partition;

    let total = ss_effect + ss_measured.iter().sum::<f64>();
    if !total.is_finite() {
        return Err(Error::non_finite("sum of squares"));
    }
    if ss_error <= RELATIVE_TOLERANCE * total || total <= 0.0 {
        return Err(Error::DegenerateVariance(format!(
            "error term of '{source}' has no variance"
        )));
    }

    let f = (ss_effect / df1 as f64) / (ss_error / df2 as f64);
    let p = f_upper_tail(f, df1 as f64, df2 as f64)?;
    let p_corr = if df1 == 1 {
        p
    } else {
        let eps = sphericity.epsilon;
        f_upper_tail(f, eps * df1 as f64, eps * df2 as f64)?
    };
    let eta_sq = GeneralizedEtaSquared::new()
        .compute(ss_effect, ss_measured)?
        .value;

    Ok(AnovaEffect {
        factor: source,
        df1,
        df2,
        f,
        p,
        p_corr,
        eta_sq,
        significant: p < ALPHA,
        epsilon: sphericity.epsilon,
        sphericity: sphericity.mauchly,
        ss_effect,
        ss_error,
    })
}
