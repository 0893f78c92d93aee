//! Two-way repeated-measures ANOVA
//!
//! Both factors are within-subject, so each effect has its own error term,
//! the interaction of the effect with subjects:
//!
//! | Effect | Error    | df1              | df2                     |
//! |--------|----------|------------------|-------------------------|
//! | A      | A × S    | a − 1            | (a − 1)(n − 1)          |
//! | B      | B × S    | b − 1            | (b − 1)(n − 1)          |
//! | A × B  | A × B × S| (a − 1)(b − 1)   | (a − 1)(b − 1)(n − 1)   |

use crate::fit::{assemble, Partition};
use crate::sphericity::{averaging_contrast, cell_covariance, estimate, helmert_contrasts};
use crate::types::interaction_label;
use crate::TwoWayAnova;
use rm_core::{Dataset, Error, Outcome, Result};
use tracing::debug;

/// Two-way RM-ANOVA of `measure` over `factor_a` × `factor_b`
///
/// Other factors of the dataset are averaged out per subject. Failures of
/// the whole model are reported as [`Outcome::Unavailable`]; an effect whose
/// own error term is degenerate is unavailable inside the result while the
/// other effects are still tested.
pub fn two_way(
    dataset: &Dataset,
    measure: &str,
    factor_a: &str,
    factor_b: &str,
) -> Outcome<TwoWayAnova> {
    Outcome::from(try_two_way(dataset, measure, factor_a, factor_b))
}

/// Like [`two_way`], keeping the error
pub fn try_two_way(
    dataset: &Dataset,
    measure: &str,
    factor_a: &str,
    factor_b: &str,
) -> Result<TwoWayAnova> {
    if factor_a == factor_b {
        return Err(Error::InvalidParameter(format!(
            "two-way ANOVA needs two distinct factors, got '{factor_a}' twice"
        )));
    }
    let table = dataset.subject_cell_means(measure, &[factor_a, factor_b])?;
    for (factor, &levels) in [factor_a, factor_b].iter().zip(table.shape()) {
        if levels < 2 {
            return Err(Error::TooFewLevels {
                factor: factor.to_string(),
                levels,
            });
        }
    }
    if table.subjects().len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: table.subjects().len(),
        });
    }

    let rows = table.complete()?;
    let (a, b) = (table.shape()[0], table.shape()[1]);
    let anova = fit_two_way(&rows, (factor_a, a), (factor_b, b))?;
    debug!(
        measure,
        factor_a,
        factor_b,
        f_interaction = ?anova.interaction().computed().map(|e| e.f),
        "fitted two-way RM-ANOVA"
    );
    Ok(anova)
}

/// Marginal means of a complete subject × a × b table
struct Means {
    grand: f64,
    a: Vec<f64>,
    b: Vec<f64>,
    ab: Vec<Vec<f64>>,
    s: Vec<f64>,
    as_: Vec<Vec<f64>>,
    bs: Vec<Vec<f64>>,
}

impl Means {
    fn new(rows: &[Vec<f64>], a: usize, b: usize) -> Self {
        let n = rows.len();
        let y = |s: usize, i: usize, j: usize| rows[s][i * b + j];

        let as_: Vec<Vec<f64>> = (0..n)
            .map(|s| (0..a).map(|i| (0..b).map(|j| y(s, i, j)).sum::<f64>() / b as f64).collect())
            .collect();
        let bs: Vec<Vec<f64>> = (0..n)
            .map(|s| (0..b).map(|j| (0..a).map(|i| y(s, i, j)).sum::<f64>() / a as f64).collect())
            .collect();
        let ab: Vec<Vec<f64>> = (0..a)
            .map(|i| (0..b).map(|j| (0..n).map(|s| y(s, i, j)).sum::<f64>() / n as f64).collect())
            .collect();
        let s: Vec<f64> = as_.iter().map(|row| row.iter().sum::<f64>() / a as f64).collect();
        let a_means: Vec<f64> = ab.iter().map(|row| row.iter().sum::<f64>() / b as f64).collect();
        let b_means: Vec<f64> = (0..b)
            .map(|j| ab.iter().map(|row| row[j]).sum::<f64>() / a as f64)
            .collect();
        let grand = a_means.iter().sum::<f64>() / a as f64;

        Self {
            grand,
            a: a_means,
            b: b_means,
            ab,
            s,
            as_,
            bs,
        }
    }
}

/// Fit on a complete `[subject][cell]` matrix, cells row-major in (A, B)
///
/// Fails only when none of the three effects can be tested.
pub fn fit_two_way(
    rows: &[Vec<f64>],
    (factor_a, a): (&str, usize),
    (factor_b, b): (&str, usize),
) -> Result<TwoWayAnova> {
    let n = rows.len();
    for (factor, levels) in [(factor_a, a), (factor_b, b)] {
        if levels < 2 {
            return Err(Error::TooFewLevels {
                factor: factor.to_string(),
                levels,
            });
        }
    }
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }
    if let Some(row) = rows.iter().find(|row| row.len() != a * b) {
        return Err(Error::size_mismatch(a * b, row.len(), "subject row"));
    }

    let m = Means::new(rows, a, b);
    let g = m.grand;
    let (nf, af, bf) = (n as f64, a as f64, b as f64);

    let ss_a = nf * bf * m.a.iter().map(|x| (x - g).powi(2)).sum::<f64>();
    let ss_b = nf * af * m.b.iter().map(|x| (x - g).powi(2)).sum::<f64>();
    let ss_ab = nf
        * (0..a)
            .flat_map(|i| (0..b).map(move |j| (i, j)))
            .map(|(i, j)| (m.ab[i][j] - m.a[i] - m.b[j] + g).powi(2))
            .sum::<f64>();
    let ss_s = af * bf * m.s.iter().map(|x| (x - g).powi(2)).sum::<f64>();

    let mut ss_as = 0.0;
    let mut ss_bs = 0.0;
    let mut ss_abs = 0.0;
    for (s, row) in rows.iter().enumerate() {
        for i in 0..a {
            ss_as += bf * (m.as_[s][i] - m.a[i] - m.s[s] + g).powi(2);
        }
        for j in 0..b {
            ss_bs += af * (m.bs[s][j] - m.b[j] - m.s[s] + g).powi(2);
        }
        for i in 0..a {
            for j in 0..b {
                let residual = row[i * b + j] - m.ab[i][j] - m.as_[s][i] - m.bs[s][j]
                    + m.a[i]
                    + m.b[j]
                    + m.s[s]
                    - g;
                ss_abs += residual.powi(2);
            }
        }
    }
    let measured = [ss_s, ss_as, ss_bs, ss_abs];

    let covariance = cell_covariance(rows);
    let (ca, cb) = (helmert_contrasts(a), helmert_contrasts(b));
    let (ua, ub) = (averaging_contrast(a), averaging_contrast(b));

    let main_a = assemble(
        Partition {
            source: factor_a.to_string(),
            ss_effect: ss_a,
            ss_error: ss_as,
            df1: a - 1,
            df2: (a - 1) * (n - 1),
        },
        &measured,
        estimate(&covariance, &ca.kronecker(&ub), n),
    );
    let main_b = assemble(
        Partition {
            source: factor_b.to_string(),
            ss_effect: ss_b,
            ss_error: ss_bs,
            df1: b - 1,
            df2: (b - 1) * (n - 1),
        },
        &measured,
        estimate(&covariance, &ua.kronecker(&cb), n),
    );
    let interaction = assemble(
        Partition {
            source: interaction_label(factor_a, factor_b),
            ss_effect: ss_ab,
            ss_error: ss_abs,
            df1: (a - 1) * (b - 1),
            df2: (a - 1) * (b - 1) * (n - 1),
        },
        &measured,
        estimate(&covariance, &ca.kronecker(&cb), n),
    );

    match (main_a, main_b, interaction) {
        (Err(err), Err(_), Err(_)) => Err(err),
        (main_a, main_b, interaction) => Ok(TwoWayAnova::new(
            (factor_a, main_a.into()),
            (factor_b, main_b.into()),
            interaction.into(),
        )),
    }
}
