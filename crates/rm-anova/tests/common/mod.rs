//! Shared fixtures for ANOVA tests

use rm_core::{Dataset, DatasetBuilder, Factor};

/// Build a dataset from `[subject][cell]` rows over row-major factors
pub fn dataset_from_rows(factors: Vec<Factor>, rows: &[Vec<f64>]) -> Dataset {
    let shape: Vec<usize> = factors.iter().map(Factor::len).collect();
    let mut builder = DatasetBuilder::new(factors.clone(), ["y"]).unwrap();
    for (s, row) in rows.iter().enumerate() {
        for (cell, value) in row.iter().enumerate() {
            let coords = rm_core::dataset::cell_coords(&shape, cell);
            let levels: Vec<&str> = coords
                .iter()
                .zip(&factors)
                .map(|(&l, f)| f.levels()[l].as_str())
                .collect();
            builder
                .push(&format!("S{s}"), &levels, &[Some(*value)])
                .unwrap();
        }
    }
    builder.build().unwrap()
}

/// 4 subjects, SAT (3 levels) × Transparency (2 levels)
pub fn two_factor_rows() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0],
        vec![2.0, 3.0, 3.0, 6.0, 4.0, 8.0],
        vec![3.0, 4.0, 2.0, 7.0, 6.0, 7.0],
        vec![2.0, 2.0, 4.0, 5.0, 5.0, 9.0],
    ]
}

pub fn sat_transparency() -> Vec<Factor> {
    vec![
        Factor::new("SAT", ["Conservative", "Moderate", "Risky"]).unwrap(),
        Factor::new("Transparency", ["Yes", "No"]).unwrap(),
    ]
}
