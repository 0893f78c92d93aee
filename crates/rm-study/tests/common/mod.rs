//! Common fixtures for study-level tests

use rm_core::{Dataset, DatasetBuilder};
use rm_study::StudyConfig;

/// Fully crossed dataset matching `config`, one column per configured measure
///
/// The first measure rises strongly with the first factor's level; the
/// others carry only deterministic noise.
pub fn synthetic_dataset(config: &StudyConfig, subjects: usize) -> Dataset {
    let factors = config
        .factors
        .iter()
        .map(|f| f.to_factor().unwrap())
        .collect::<Vec<_>>();
    let shape: Vec<usize> = factors.iter().map(|f| f.len()).collect();
    let n_cells: usize = shape.iter().product();
    let measures: Vec<&str> = config.measures.iter().map(|m| m.variable.as_str()).collect();

    let mut builder = DatasetBuilder::new(factors.clone(), measures.iter().copied()).unwrap();
    for s in 0..subjects {
        for cell in 0..n_cells {
            let coords = rm_core::dataset::cell_coords(&shape, cell);
            let levels: Vec<&str> = coords
                .iter()
                .zip(&factors)
                .map(|(&l, f)| f.levels()[l].as_str())
                .collect();
            let values: Vec<Option<f64>> = (0..measures.len())
                .map(|m| {
                    let noise = ((s * 37 + cell * 11 + m * 5) % 7) as f64 * 0.3;
                    let signal = if m == 0 { 2.0 * coords[0] as f64 } else { 0.0 };
                    Some(3.0 + signal + noise)
                })
                .collect();
            builder.push(&format!("P{s:02}"), &levels, &values).unwrap();
        }
    }
    builder.build().unwrap()
}
