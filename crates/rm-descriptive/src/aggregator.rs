//! Grouping of observations by factor-level combinations

use crate::{DescriptiveSummary, Descriptives};
use indexmap::IndexMap;
use rm_core::dataset::{cell_coords, cell_index};
use rm_core::{CellKey, Dataset, Error, Result};
use tracing::debug;

/// Largest number of grouping factors accepted by [`describe`]
pub const MAX_GROUPING_FACTORS: usize = 3;

/// Summarize `measure` for every observed combination of `factors`
///
/// Rows with a missing value are skipped. Combinations without any
/// observation are left out of the result instead of being zero-filled.
pub fn describe(dataset: &Dataset, measure: &str, factors: &[&str]) -> Result<Descriptives> {
    if factors.is_empty() || factors.len() > MAX_GROUPING_FACTORS {
        return Err(Error::InvalidParameter(format!(
            "descriptives need 1 to {MAX_GROUPING_FACTORS} grouping factors, got {}",
            factors.len()
        )));
    }

    let values = dataset.values(measure)?;
    let factor_indices = factors
        .iter()
        .map(|name| dataset.factor_index(name))
        .collect::<Result<Vec<_>>>()?;
    let shape: Vec<usize> = factor_indices
        .iter()
        .map(|&f| dataset.factors()[f].len())
        .collect();
    let n_cells: usize = shape.iter().product();

    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); n_cells];
    for (row, value) in values.iter().enumerate() {
        if let Some(value) = value {
            let cell = cell_index(
                &shape,
                factor_indices.iter().map(|&f| dataset.levels_of_row(f)[row]),
            );
            groups[cell].push(*value);
        }
    }

    let summaries: IndexMap<CellKey, DescriptiveSummary> = groups
        .iter()
        .enumerate()
        .filter_map(|(cell, group)| {
            let summary = DescriptiveSummary::from_values(group)?;
            let key = CellKey::new(
                cell_coords(&shape, cell)
                    .into_iter()
                    .zip(&factor_indices)
                    .map(|(level, &f)| dataset.factors()[f].levels()[level].clone()),
            );
            Some((key, summary))
        })
        .collect();

    debug!(
        measure,
        factors = ?factors,
        groups = summaries.len(),
        "computed descriptives"
    );

    Ok(Descriptives::new(
        factors.iter().map(|f| f.to_string()).collect(),
        summaries,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rm_core::{DatasetBuilder, Factor};

    #[test]
    fn test_rejects_bad_factor_counts() {
        let factors = vec![Factor::new("A", ["a"]).unwrap()];
        let mut b = DatasetBuilder::new(factors, ["x"]).unwrap();
        b.push("s", &["a"], &[Some(1.0)]).unwrap();
        let ds = b.build().unwrap();

        assert!(describe(&ds, "x", &[]).is_err());
        assert!(describe(&ds, "x", &["A", "A", "A", "A"]).is_err());
        assert!(matches!(describe(&ds, "nope", &["A"]), Err(Error::UnknownColumn(_))));
    }
}
