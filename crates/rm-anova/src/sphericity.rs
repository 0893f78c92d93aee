//! Sphericity estimation for within-subject effects
//!
//! Every effect is tested on a set of orthonormal contrasts `C` over the
//! design cells. With `S` the sample covariance of the subject × cell matrix,
//! the contrast covariance is `M = Cᵀ S C` and
//!
//! - Greenhouse-Geisser ε = tr(M)² / (d · tr(M²)), bounded to [1/d, 1]
//! - Mauchly's W = det(M) / (tr(M) / d)^d
//!
//! where `d` is the number of contrasts (the effect's numerator df).

use crate::distribution::chi_squared_upper_tail;
use crate::MauchlyTest;
use nalgebra::DMatrix;

/// Epsilon and, when defined, Mauchly's test for one effect
#[derive(Debug, Clone, PartialEq)]
pub struct SphericityEstimate {
    pub epsilon: f64,
    pub mauchly: Option<MauchlyTest>,
}

impl SphericityEstimate {
    /// A single contrast is always spherical
    pub fn trivial() -> Self {
        Self {
            epsilon: 1.0,
            mauchly: None,
        }
    }
}

/// Orthonormal Helmert contrasts for `k` levels, a k × (k − 1) matrix
///
/// Column j compares the mean of the first j + 1 levels with level j + 1.
pub fn helmert_contrasts(k: usize) -> DMatrix<f64> {
    DMatrix::from_fn(k, k.saturating_sub(1), |i, j| {
        let col = (j + 1) as f64;
        let norm = (col * (col + 1.0)).sqrt();
        if i <= j {
            1.0 / norm
        } else if i == j + 1 {
            -col / norm
        } else {
            0.0
        }
    })
}

/// Normalized averaging vector, a k × 1 matrix of 1/√k
pub fn averaging_contrast(k: usize) -> DMatrix<f64> {
    DMatrix::from_element(k, 1, 1.0 / (k as f64).sqrt())
}

/// Sample covariance (n − 1) of the columns of a `[subject][cell]` matrix
pub fn cell_covariance(rows: &[Vec<f64>]) -> DMatrix<f64> {
    let n = rows.len();
    let k = rows.first().map_or(0, Vec::len);
    if n < 2 {
        return DMatrix::zeros(k, k);
    }

    let means: Vec<f64> = (0..k)
        .map(|j| rows.iter().map(|row| row[j]).sum::<f64>() / n as f64)
        .collect();
    let centered = DMatrix::from_fn(n, k, |i, j| rows[i][j] - means[j]);
    (centered.transpose() * &centered) * (1.0 / (n - 1) as f64)
}

/// Estimate sphericity of the effect spanned by `contrasts`
pub fn estimate(
    covariance: &DMatrix<f64>,
    contrasts: &DMatrix<f64>,
    n_subjects: usize,
) -> SphericityEstimate {
    let d = contrasts.ncols();
    if d <= 1 {
        return SphericityEstimate::trivial();
    }

    let m = contrasts.transpose() * covariance * contrasts;
    let trace = m.trace();
    let trace_sq = (&m * &m).trace();
    let lower = 1.0 / d as f64;
    let epsilon = trace * trace / (d as f64 * trace_sq);
    let epsilon = if epsilon.is_finite() {
        epsilon.clamp(lower, 1.0)
    } else {
        1.0
    };

    SphericityEstimate {
        epsilon,
        mauchly: mauchly(&m, n_subjects),
    }
}

/// Mauchly's test on a contrast covariance matrix
///
/// Undefined when `M` is singular, which happens whenever there are fewer
/// subjects than contrasts.
fn mauchly(m: &DMatrix<f64>, n_subjects: usize) -> Option<MauchlyTest> {
    let d = m.nrows();
    let trace = m.trace();
    if n_subjects < 2 || trace <= 0.0 {
        return None;
    }

    let df = d as f64;
    let w = m.determinant() / (trace / df).powf(df);
    if !(w > 0.0 && w.is_finite()) {
        return None;
    }
    let w = w.min(1.0);

    let nm1 = (n_subjects - 1) as f64;
    let f = (2.0 * df * df + df + 2.0) / (6.0 * df * nm1);
    let chi2 = (-(1.0 - f) * nm1 * w.ln()).max(0.0);
    let dof = d * (d + 1) / 2 - 1;
    let p = chi_squared_upper_tail(chi2, dof).ok()?;

    Some(MauchlyTest { w, chi2, dof, p })
}
