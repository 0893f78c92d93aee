//! Subject × cell aggregation
//!
//! Inferential tests work on one value per subject and analysed cell. When
//! the dataset has more factors than the analysis, the extra factors are
//! averaged out within each subject.

use crate::dataset::{cell_coords, cell_index};
use crate::{CellKey, Dataset, Error, Factor, Result};

/// Per-subject cell means over a subset of the dataset's factors
#[derive(Debug, Clone)]
pub struct SubjectCellTable {
    factors: Vec<Factor>,
    shape: Vec<usize>,
    subjects: Vec<String>,
    /// `[subject][cell]`, `None` when the subject has no value in the cell
    cells: Vec<Vec<Option<f64>>>,
}

impl SubjectCellTable {
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// Number of levels of each analysed factor
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn n_cells(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn value(&self, subject: usize, cell: usize) -> Option<f64> {
        self.cells[subject][cell]
    }

    /// Level labels of a row-major cell index
    pub fn cell_key(&self, cell: usize) -> CellKey {
        CellKey::new(
            cell_coords(&self.shape, cell)
                .into_iter()
                .zip(&self.factors)
                .map(|(level, factor)| factor.levels()[level].clone()),
        )
    }

    /// Dense `[subject][cell]` matrix, failing on the first empty cell
    pub fn complete(&self) -> Result<Vec<Vec<f64>>> {
        self.cells
            .iter()
            .zip(&self.subjects)
            .map(|(row, subject)| {
                row.iter()
                    .enumerate()
                    .map(|(cell, value)| {
                        value.ok_or_else(|| Error::MissingCell {
                            subject: subject.clone(),
                            cell: self.cell_key(cell).encode(),
                        })
                    })
                    .collect()
            })
            .collect()
    }
}

impl Dataset {
    /// Average `measure` per subject over the cells of `factors`
    pub fn subject_cell_means(&self, measure: &str, factors: &[&str]) -> Result<SubjectCellTable> {
        let values = self.values(measure)?;
        let factor_indices = factors
            .iter()
            .map(|name| self.factor_index(name))
            .collect::<Result<Vec<_>>>()?;
        let analysed: Vec<Factor> = factor_indices
            .iter()
            .map(|&f| self.factors()[f].clone())
            .collect();
        let shape: Vec<usize> = analysed.iter().map(Factor::len).collect();
        let n_cells: usize = shape.iter().product();

        let mut sums = vec![vec![0.0; n_cells]; self.n_subjects()];
        let mut counts = vec![vec![0usize; n_cells]; self.n_subjects()];
        for (row, value) in values.iter().enumerate() {
            let Some(value) = value else { continue };
            let cell = cell_index(
                &shape,
                factor_indices.iter().map(|&f| self.levels_of_row(f)[row]),
            );
            let subject = self.subject_of_row()[row];
            sums[subject][cell] += value;
            counts[subject][cell] += 1;
        }

        let cells = sums
            .into_iter()
            .zip(counts)
            .map(|(sum_row, count_row)| {
                sum_row
                    .into_iter()
                    .zip(count_row)
                    .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
                    .collect()
            })
            .collect();

        Ok(SubjectCellTable {
            factors: analysed,
            shape,
            subjects: self.subject_ids().to_vec(),
            cells,
        })
    }
}
