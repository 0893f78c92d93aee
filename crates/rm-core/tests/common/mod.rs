//! Common test utilities for rm-core tests

use rm_core::{Dataset, DatasetBuilder, Factor};

/// Fully crossed 3 × 2 design with `subjects` subjects and one measure `y`
pub fn crossed_dataset(subjects: usize) -> Dataset {
    let factors = vec![
        Factor::new("SAT", ["Conservative", "Moderate", "Risky"]).unwrap(),
        Factor::new("Transparency", ["Yes", "No"]).unwrap(),
    ];
    let mut builder = DatasetBuilder::new(factors, ["y"]).unwrap();
    for s in 0..subjects {
        for (i, sat) in ["Conservative", "Moderate", "Risky"].iter().enumerate() {
            for (j, tr) in ["Yes", "No"].iter().enumerate() {
                let value = (s * 7 + i * 3 + j) as f64 % 5.0 + i as f64;
                builder
                    .push(&format!("P{s:02}"), &[*sat, *tr], &[Some(value)])
                    .unwrap();
            }
        }
    }
    builder.build().unwrap()
}
