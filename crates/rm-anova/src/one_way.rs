//! One-way repeated-measures ANOVA
//!
//! Values are first averaged per subject and level (over every other factor
//! of the dataset). With `n` subjects, `k` levels, level means `m_j`,
//! subject means `s_i` and grand mean `G`:
//!
//! - SS_effect = n Σ (m_j − G)²
//! - SS_subjects = k Σ (s_i − G)²
//! - SS_error = Σ (y_ij − s_i − m_j + G)²
//! - F = (SS_effect / (k − 1)) / (SS_error / ((k − 1)(n − 1)))

use crate::fit::{assemble, Partition};
use crate::sphericity::{cell_covariance, estimate, helmert_contrasts};
use crate::AnovaEffect;
use rm_core::{math, Dataset, Error, Outcome, Result};
use tracing::debug;

/// One-way RM-ANOVA of `measure` across the levels of `factor`
///
/// Failures are reported as [`Outcome::Unavailable`].
pub fn one_way(dataset: &Dataset, measure: &str, factor: &str) -> Outcome<AnovaEffect> {
    Outcome::from(try_one_way(dataset, measure, factor))
}

/// Like [`one_way`], keeping the error
pub fn try_one_way(dataset: &Dataset, measure: &str, factor: &str) -> Result<AnovaEffect> {
    let table = dataset.subject_cell_means(measure, &[factor])?;
    let levels = table.shape()[0];
    if levels < 2 {
        return Err(Error::TooFewLevels {
            factor: factor.to_string(),
            levels,
        });
    }
    if table.subjects().len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: table.subjects().len(),
        });
    }

    let rows = table.complete()?;
    let effect = fit_one_way(&rows, factor)?;
    debug!(
        measure,
        factor,
        f = effect.f,
        p = effect.p,
        epsilon = effect.epsilon,
        "fitted one-way RM-ANOVA"
    );
    Ok(effect)
}

/// Fit on a complete `[subject][level]` matrix
pub fn fit_one_way(rows: &[Vec<f64>], factor: &str) -> Result<AnovaEffect> {
    let n = rows.len();
    let k = rows.first().map_or(0, Vec::len);
    if k < 2 {
        return Err(Error::TooFewLevels {
            factor: factor.to_string(),
            levels: k,
        });
    }
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }
    if let Some(row) = rows.iter().find(|row| row.len() != k) {
        return Err(Error::size_mismatch(k, row.len(), "subject row"));
    }

    let subject_means: Vec<f64> = rows.iter().filter_map(|row| math::mean(row)).collect();
    let level_means: Vec<f64> = (0..k)
        .map(|j| rows.iter().map(|row| row[j]).sum::<f64>() / n as f64)
        .collect();
    let grand = subject_means.iter().sum::<f64>() / n as f64;

    let ss_effect = n as f64 * level_means.iter().map(|m| (m - grand).powi(2)).sum::<f64>();
    let ss_subjects = k as f64 * subject_means.iter().map(|s| (s - grand).powi(2)).sum::<f64>();
    let ss_error: f64 = rows
        .iter()
        .zip(&subject_means)
        .map(|(row, s)| {
            row.iter()
                .zip(&level_means)
                .map(|(y, m)| (y - s - m + grand).powi(2))
                .sum::<f64>()
        })
        .sum();

    let sphericity = estimate(&cell_covariance(rows), &helmert_contrasts(k), n);
    assemble(
        Partition {
            source: factor.to_string(),
            ss_effect,
            ss_error,
            df1: k - 1,
            df2: (k - 1) * (n - 1),
        },
        &[ss_subjects, ss_error],
        sphericity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn reference() -> Vec<Vec<f64>> {
        vec![
            vec![45.0, 50.0, 55.0],
            vec![42.0, 42.0, 45.0],
            vec![36.0, 41.0, 43.0],
            vec![39.0, 35.0, 40.0],
            vec![51.0, 55.0, 59.0],
            vec![44.0, 49.0, 56.0],
        ]
    }

    #[test]
    fn test_sums_of_squares() {
        let effect = fit_one_way(&reference(), "Time").unwrap();
        assert_abs_diff_eq!(effect.ss_effect, 143.444444, epsilon = 1e-5);
        assert_abs_diff_eq!(effect.ss_error, 57.222222, epsilon = 1e-5);
        assert_eq!((effect.df1, effect.df2), (2, 10));
        assert_abs_diff_eq!(effect.f, 12.533981, epsilon = 1e-5);
    }

    #[test]
    fn test_p_values_and_correction() {
        let effect = fit_one_way(&reference(), "Time").unwrap();
        // df1 = 2 has the closed form (1 + 2F/df2)^(-df2/2)
        let closed = (1.0 + 2.0 * effect.f / 10.0).powf(-5.0);
        assert_abs_diff_eq!(effect.p, closed, epsilon = 1e-9);
        assert_abs_diff_eq!(effect.epsilon, 0.638380, epsilon = 1e-5);
        assert_abs_diff_eq!(effect.p_corr, 0.008985, epsilon = 1e-5);
        assert!(effect.p_corr >= effect.p);
        assert!(effect.significant);
    }

    #[test]
    fn test_mauchly() {
        let test = fit_one_way(&reference(), "Time").unwrap().sphericity.unwrap();
        assert_abs_diff_eq!(test.w, 0.433534, epsilon = 1e-5);
        assert_abs_diff_eq!(test.chi2, 3.343142, epsilon = 1e-5);
        assert_eq!(test.dof, 2);
        assert_abs_diff_eq!(test.p, (-test.chi2 / 2.0).exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_generalized_eta() {
        let effect = fit_one_way(&reference(), "Time").unwrap();
        assert_abs_diff_eq!(effect.eta_sq, 0.167001, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(matches!(
            fit_one_way(&[vec![1.0, 2.0]], "F"),
            Err(Error::InsufficientData { actual: 1, .. })
        ));
        assert!(matches!(
            fit_one_way(&[vec![1.0], vec![2.0]], "F"),
            Err(Error::TooFewLevels { levels: 1, .. })
        ));
        // Every subject shifts by the same amount: no error variance
        let parallel = vec![vec![1.0, 2.0, 4.0], vec![3.0, 4.0, 6.0]];
        assert!(matches!(
            fit_one_way(&parallel, "F"),
            Err(Error::DegenerateVariance(_))
        ));
    }
}
