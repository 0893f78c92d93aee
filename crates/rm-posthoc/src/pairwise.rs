//! Pairwise comparisons between the levels of one factor

use crate::{paired_t_test, PAdjust};
use rm_core::math::presentation;
use rm_core::{Dataset, Error, Outcome, Result, ALPHA};
use rm_effect::HedgesG;
use tracing::debug;

/// One level pair of a post-hoc family
///
/// A non-finite `t` serializes as `null`, like an undefined one.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PairwiseComparison {
    /// `"<A> vs <B>"`
    pub contrast: String,
    #[serde(rename = "A")]
    pub level_a: String,
    #[serde(rename = "B")]
    pub level_b: String,
    #[serde(serialize_with = "presentation::round3_opt")]
    pub t: Option<f64>,
    pub df: usize,
    #[serde(serialize_with = "presentation::round4_opt")]
    pub p: Option<f64>,
    #[serde(serialize_with = "presentation::round4_opt")]
    pub p_adj: Option<f64>,
    /// Hedges' g of A against B
    #[serde(rename = "d", serialize_with = "presentation::round3_opt")]
    pub hedges_g: Option<f64>,
    pub significant: bool,
}

impl PairwiseComparison {
    /// The p-value the significance decision was based on
    pub fn decision_p(&self) -> Option<f64> {
        self.p_adj.or(self.p)
    }
}

/// Paired comparisons of every level pair of `factor`
///
/// Pairs follow the configured level order (i < j). Failures are reported
/// as [`Outcome::Unavailable`].
pub fn pairwise(
    dataset: &Dataset,
    measure: &str,
    factor: &str,
    adjust: PAdjust,
) -> Outcome<Vec<PairwiseComparison>> {
    Outcome::from(try_pairwise(dataset, measure, factor, adjust))
}

/// Like [`pairwise`], keeping the error
pub fn try_pairwise(
    dataset: &Dataset,
    measure: &str,
    factor: &str,
    adjust: PAdjust,
) -> Result<Vec<PairwiseComparison>> {
    let table = dataset.subject_cell_means(measure, &[factor])?;
    let levels = table.factors()[0].levels().to_vec();
    if levels.len() < 2 {
        return Err(Error::TooFewLevels {
            factor: factor.to_string(),
            levels: levels.len(),
        });
    }
    if table.subjects().len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: table.subjects().len(),
        });
    }

    let rows = table.complete()?;
    let columns: Vec<Vec<f64>> = (0..levels.len())
        .map(|j| rows.iter().map(|row| row[j]).collect())
        .collect();

    let pairs: Vec<(usize, usize)> = (0..levels.len())
        .flat_map(|i| (i + 1..levels.len()).map(move |j| (i, j)))
        .collect();

    let mut tests = Vec::with_capacity(pairs.len());
    for &(i, j) in &pairs {
        tests.push(paired_t_test(&columns[i], &columns[j])?);
    }
    let p_adj = adjust.adjust(&tests.iter().map(|t| t.p).collect::<Vec<_>>());

    let estimator = HedgesG::new();
    let comparisons: Vec<PairwiseComparison> = pairs
        .iter()
        .zip(tests)
        .zip(p_adj)
        .map(|((&(i, j), test), p_adj)| {
            let hedges_g = match estimator.compute_paired(&columns[i], &columns[j]) {
                Ok(g) => Some(g.value),
                Err(err) => {
                    debug!(measure, factor, error = %err, "Hedges' g undefined");
                    None
                }
            };
            let significant = p_adj.or(test.p).is_some_and(|p| p < ALPHA);
            PairwiseComparison {
                contrast: format!("{} vs {}", levels[i], levels[j]),
                level_a: levels[i].clone(),
                level_b: levels[j].clone(),
                t: test.t,
                df: test.df,
                p: test.p,
                p_adj,
                hedges_g,
                significant,
            }
        })
        .collect();

    debug!(
        measure,
        factor,
        pairs = comparisons.len(),
        %adjust,
        "computed pairwise comparisons"
    );
    Ok(comparisons)
}
