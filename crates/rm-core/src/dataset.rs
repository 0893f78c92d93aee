//! Long-format repeated-measures dataset
//!
//! One row per (subject, condition) observation. Factor levels are stored as
//! indices into the factor's declared level list, so a row can never carry a
//! level the design does not know about. Measure values are optional; a
//! missing value is kept as `None` and never imputed.

use crate::{CellKey, Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// A within-subject factor with a fixed, ordered set of levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Factor {
    name: String,
    levels: Vec<String>,
}

impl Factor {
    /// Create a factor, rejecting empty or duplicated level lists
    pub fn new<S, I, L>(name: S, levels: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let name = name.into();
        let levels: Vec<String> = levels.into_iter().map(Into::into).collect();
        if levels.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "factor '{name}' needs at least one level"
            )));
        }
        for (i, level) in levels.iter().enumerate() {
            if levels[..i].contains(level) {
                return Err(Error::InvalidParameter(format!(
                    "factor '{name}' declares level '{level}' twice"
                )));
            }
        }
        Ok(Self { name, levels })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Position of a label in the level order
    pub fn level_index(&self, label: &str) -> Option<usize> {
        self.levels.iter().position(|l| l == label)
    }
}

#[derive(Debug, Clone)]
struct Measure {
    name: String,
    values: Vec<Option<f64>>,
}

/// Validated, immutable long-format dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    subject_ids: Vec<String>,
    subject_of_row: Vec<usize>,
    factors: Vec<Factor>,
    /// `[factor][row]` level indices
    levels_of_row: Vec<Vec<usize>>,
    measures: Vec<Measure>,
}

impl Dataset {
    /// Number of rows
    pub fn n_observations(&self) -> usize {
        self.subject_of_row.len()
    }

    /// Number of distinct subjects
    pub fn n_subjects(&self) -> usize {
        self.subject_ids.len()
    }

    /// Distinct subject ids in order of first appearance
    pub fn subject_ids(&self) -> &[String] {
        &self.subject_ids
    }

    /// Subject index of every row
    pub fn subject_of_row(&self) -> &[usize] {
        &self.subject_of_row
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn factor_index(&self, name: &str) -> Result<usize> {
        self.factors
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| Error::unknown_column(name))
    }

    pub fn factor(&self, name: &str) -> Result<&Factor> {
        Ok(&self.factors[self.factor_index(name)?])
    }

    /// Level index of every row for the factor at `factor_idx`
    pub fn levels_of_row(&self, factor_idx: usize) -> &[usize] {
        &self.levels_of_row[factor_idx]
    }

    pub fn measure_names(&self) -> impl Iterator<Item = &str> {
        self.measures.iter().map(|m| m.name.as_str())
    }

    pub fn has_measure(&self, name: &str) -> bool {
        self.measures.iter().any(|m| m.name == name)
    }

    /// Values of a measure, one per row
    pub fn values(&self, measure: &str) -> Result<&[Option<f64>]> {
        self.measures
            .iter()
            .find(|m| m.name == measure)
            .map(|m| m.values.as_slice())
            .ok_or_else(|| Error::unknown_column(measure))
    }

    /// Add a measure computed as the unweighted mean of `sources`
    ///
    /// A row gets a value only when every source value is present.
    pub fn with_derived_mean(mut self, name: &str, sources: &[&str]) -> Result<Self> {
        if sources.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "derived measure '{name}' has no source columns"
            )));
        }
        if self.has_measure(name) {
            return Err(Error::InvalidParameter(format!(
                "measure '{name}' already exists"
            )));
        }
        let columns = sources
            .iter()
            .map(|s| self.values(s))
            .collect::<Result<Vec<_>>>()?;

        let values = (0..self.n_observations())
            .map(|row| {
                let mut sum = 0.0;
                for column in &columns {
                    sum += column[row]?;
                }
                Some(sum / columns.len() as f64)
            })
            .collect();

        self.measures.push(Measure {
            name: name.to_string(),
            values,
        });
        Ok(self)
    }

    /// Check that every subject has exactly one row per full-factorial cell
    pub fn design_check(&self) -> DesignCheck {
        let shape: Vec<usize> = self.factors.iter().map(Factor::len).collect();
        let n_cells: usize = shape.iter().product();
        let mut counts = vec![vec![0usize; n_cells]; self.n_subjects()];

        for row in 0..self.n_observations() {
            let cell = cell_index(&shape, (0..self.factors.len()).map(|f| self.levels_of_row[f][row]));
            counts[self.subject_of_row[row]][cell] += 1;
        }

        let mut check = DesignCheck::default();
        for (subject, per_cell) in counts.iter().enumerate() {
            for (cell, &count) in per_cell.iter().enumerate() {
                if count == 1 {
                    continue;
                }
                let violation = DesignViolation {
                    subject: self.subject_ids[subject].clone(),
                    cell: self.cell_key(&shape, cell, &(0..self.factors.len()).collect::<Vec<_>>()),
                    count,
                };
                if count == 0 {
                    check.missing.push(violation);
                } else {
                    check.duplicated.push(violation);
                }
            }
        }
        check
    }

    /// Label tuple for a row-major cell index over `factor_indices`
    pub(crate) fn cell_key(&self, shape: &[usize], cell: usize, factor_indices: &[usize]) -> CellKey {
        let coords = cell_coords(shape, cell);
        CellKey::new(
            factor_indices
                .iter()
                .zip(coords)
                .map(|(&f, level)| self.factors[f].levels[level].clone()),
        )
    }
}

/// Row-major cell index (last factor varies fastest)
pub fn cell_index<I: IntoIterator<Item = usize>>(shape: &[usize], coords: I) -> usize {
    coords
        .into_iter()
        .zip(shape)
        .fold(0, |acc, (level, &size)| acc * size + level)
}

/// Inverse of [`cell_index`]
pub fn cell_coords(shape: &[usize], mut cell: usize) -> Vec<usize> {
    let mut coords = vec![0; shape.len()];
    for (slot, &size) in coords.iter_mut().zip(shape).rev() {
        *slot = cell % size;
        cell /= size;
    }
    coords
}

/// Departure from the fully crossed design for one subject and cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignViolation {
    pub subject: String,
    pub cell: CellKey,
    /// Number of rows observed (0 = missing, >1 = duplicated)
    pub count: usize,
}

/// Findings of [`Dataset::design_check`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DesignCheck {
    pub missing: Vec<DesignViolation>,
    pub duplicated: Vec<DesignViolation>,
}

impl DesignCheck {
    pub fn is_fully_crossed(&self) -> bool {
        self.missing.is_empty() && self.duplicated.is_empty()
    }
}

/// Incremental construction of a [`Dataset`]
#[derive(Debug)]
pub struct DatasetBuilder {
    factors: Vec<Factor>,
    measure_names: Vec<String>,
    subject_lookup: HashMap<String, usize>,
    subject_ids: Vec<String>,
    subject_of_row: Vec<usize>,
    levels_of_row: Vec<Vec<usize>>,
    values: Vec<Vec<Option<f64>>>,
}

impl DatasetBuilder {
    pub fn new<M, S>(factors: Vec<Factor>, measures: M) -> Result<Self>
    where
        M: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let measure_names: Vec<String> = measures.into_iter().map(Into::into).collect();
        let mut seen: Vec<&str> = Vec::new();
        for name in factors.iter().map(Factor::name).chain(measure_names.iter().map(String::as_str)) {
            if seen.contains(&name) {
                return Err(Error::InvalidParameter(format!("column '{name}' declared twice")));
            }
            seen.push(name);
        }

        Ok(Self {
            levels_of_row: vec![Vec::new(); factors.len()],
            values: vec![Vec::new(); measure_names.len()],
            factors,
            measure_names,
            subject_lookup: HashMap::new(),
            subject_ids: Vec::new(),
            subject_of_row: Vec::new(),
        })
    }

    /// Append one observation; level labels and values follow declaration order
    pub fn push<L: AsRef<str>>(
        &mut self,
        subject: &str,
        levels: &[L],
        values: &[Option<f64>],
    ) -> Result<()> {
        if levels.len() != self.factors.len() {
            return Err(Error::size_mismatch(self.factors.len(), levels.len(), "factor levels"));
        }
        if values.len() != self.measure_names.len() {
            return Err(Error::size_mismatch(self.measure_names.len(), values.len(), "measure values"));
        }

        let mut indices = Vec::with_capacity(levels.len());
        for (factor, label) in self.factors.iter().zip(levels) {
            let label = label.as_ref();
            let idx = factor.level_index(label).ok_or_else(|| Error::UnmappedLevel {
                factor: factor.name.clone(),
                value: label.to_string(),
            })?;
            indices.push(idx);
        }
        if let Some(bad) = values.iter().flatten().find(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "non-finite value {bad} for subject '{subject}'"
            )));
        }

        let next_id = self.subject_ids.len();
        let subject_idx = *self
            .subject_lookup
            .entry(subject.to_string())
            .or_insert(next_id);
        if subject_idx == next_id {
            self.subject_ids.push(subject.to_string());
        }

        self.subject_of_row.push(subject_idx);
        for (column, idx) in self.levels_of_row.iter_mut().zip(indices) {
            column.push(idx);
        }
        for (column, value) in self.values.iter_mut().zip(values) {
            column.push(*value);
        }
        Ok(())
    }

    pub fn build(self) -> Result<Dataset> {
        if self.subject_of_row.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let measures = self
            .measure_names
            .into_iter()
            .zip(self.values)
            .map(|(name, values)| Measure { name, values })
            .collect();

        Ok(Dataset {
            subject_ids: self.subject_ids,
            subject_of_row: self.subject_of_row,
            factors: self.factors,
            levels_of_row: self.levels_of_row,
            measures,
        })
    }
}
