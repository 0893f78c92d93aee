//! Paired-samples t-test

use rm_core::{math, Error, Result};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a paired t-test on `x − y`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairedTTest {
    /// `None` when the differences are all zero
    pub t: Option<f64>,
    pub df: usize,
    /// Two-sided p-value, `None` when `t` is undefined
    pub p: Option<f64>,
    pub mean_difference: f64,
}

/// Paired t-test of `x` against `y`
///
/// When every difference is identical the standard error vanishes: a
/// non-zero mean difference then gives t = ±∞ with p = 0, and a zero mean
/// difference leaves t and p undefined.
pub fn paired_t_test(x: &[f64], y: &[f64]) -> Result<PairedTTest> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "paired samples"));
    }
    let n = x.len();
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }

    let diffs: Vec<f64> = x.iter().zip(y).map(|(a, b)| a - b).collect();
    let mean = math::mean(&diffs).ok_or_else(|| Error::non_finite("mean difference"))?;
    let sd = math::sample_std(&diffs).ok_or(Error::InsufficientData {
        expected: 2,
        actual: n,
    })?;
    let df = n - 1;

    if !(mean.is_finite() && sd.is_finite()) {
        return Err(Error::non_finite("paired differences"));
    }
    if sd == 0.0 {
        let (t, p) = if mean == 0.0 {
            (None, None)
        } else {
            (Some(f64::INFINITY.copysign(mean)), Some(0.0))
        };
        return Ok(PairedTTest {
            t,
            df,
            p,
            mean_difference: mean,
        });
    }

    let t = mean / (sd / (n as f64).sqrt());
    let dist = StudentsT::new(0.0, 1.0, df as f64)
        .map_err(|e| Error::Computation(format!("t({df}): {e}")))?;
    let p = (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0);

    Ok(PairedTTest {
        t: Some(t),
        df,
        p: Some(p),
        mean_difference: mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_known_value() {
        // differences 1, 2, 3, 4, 5: mean 3, sd √2.5, t = 3 / (√2.5/√5) = 3√2
        let x = [2.0, 4.0, 6.0, 8.0, 10.0];
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        let r = paired_t_test(&x, &y).unwrap();
        assert_abs_diff_eq!(r.t.unwrap(), 3.0 * 2f64.sqrt(), epsilon = 1e-12);
        assert_eq!(r.df, 4);
        assert_abs_diff_eq!(r.p.unwrap(), 0.013236, epsilon = 1e-5);
        assert_abs_diff_eq!(r.mean_difference, 3.0);
    }

    #[test]
    fn test_two_degrees_of_freedom_closed_form() {
        // For df = 2 the two-sided p is 1 − t/√(2 + t²)
        let r = paired_t_test(&[1.0, 3.0, 7.0], &[0.0, 1.0, 3.0]).unwrap();
        let t = r.t.unwrap();
        assert_abs_diff_eq!(r.p.unwrap(), 1.0 - t / (2.0 + t * t).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_constant_differences() {
        let r = paired_t_test(&[1.0, 2.0], &[3.0, 4.0]).unwrap();
        assert_eq!(r.t, Some(f64::NEG_INFINITY));
        assert_eq!(r.p, Some(0.0));
        assert_eq!(r.df, 1);

        let r = paired_t_test(&[1.0, 2.0], &[1.0, 2.0]).unwrap();
        assert!(r.t.is_none() && r.p.is_none());
    }

    #[test]
    fn test_invalid_input() {
        assert!(paired_t_test(&[1.0], &[2.0]).is_err());
        assert!(paired_t_test(&[1.0, 2.0], &[2.0]).is_err());
    }
}
