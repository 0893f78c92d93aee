//! Upper-tail probabilities of the reference distributions

use rm_core::{Error, Result};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor};

/// P(F > f) for an F distribution with (possibly fractional) df
pub(crate) fn f_upper_tail(f: f64, df1: f64, df2: f64) -> Result<f64> {
    if f.is_nan() {
        return Err(Error::non_finite("F statistic"));
    }
    if f == f64::INFINITY {
        return Ok(0.0);
    }
    if f <= 0.0 {
        return Ok(1.0);
    }
    let dist = FisherSnedecor::new(df1, df2)
        .map_err(|e| Error::Computation(format!("F({df1}, {df2}): {e}")))?;
    Ok((1.0 - dist.cdf(f)).clamp(0.0, 1.0))
}

/// P(X > x) for a chi-squared distribution
pub(crate) fn chi_squared_upper_tail(x: f64, dof: usize) -> Result<f64> {
    if x.is_nan() {
        return Err(Error::non_finite("chi-squared statistic"));
    }
    if x <= 0.0 {
        return Ok(1.0);
    }
    let dist = ChiSquared::new(dof as f64)
        .map_err(|e| Error::Computation(format!("chi-squared({dof}): {e}")))?;
    Ok((1.0 - dist.cdf(x)).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_f_two_numerator_df_closed_form() {
        // For df1 = 2, P(F > f) = (1 + 2f/df2)^(-df2/2)
        let p = f_upper_tail(5.0, 2.0, 10.0).unwrap();
        assert_abs_diff_eq!(p, 0.03125, epsilon = 1e-10);
    }

    #[test]
    fn test_chi_squared_two_dof_closed_form() {
        let p = chi_squared_upper_tail(3.0, 2).unwrap();
        assert_abs_diff_eq!(p, (-1.5f64).exp(), epsilon = 1e-10);
    }

    #[test]
    fn test_edges() {
        assert_eq!(f_upper_tail(f64::INFINITY, 1.0, 1.0).unwrap(), 0.0);
        assert_eq!(f_upper_tail(0.0, 1.0, 1.0).unwrap(), 1.0);
        assert!(f_upper_tail(f64::NAN, 1.0, 1.0).is_err());
        assert!(f_upper_tail(2.0, 0.0, 1.0).is_err());
    }
}
