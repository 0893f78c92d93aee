//! CSV loading into a validated [`Dataset`]
//!
//! The loader renames raw headers to canonical column names, maps raw level
//! codes to configured level labels and derives composite measures. Anything
//! it cannot interpret is a fatal error; no rows are silently dropped.

use crate::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use rm_core::{Dataset, DatasetBuilder};
use rm_study::{FactorSpec, StudyConfig};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Cell contents read as a missing value
const MISSING_MARKERS: [&str; 3] = ["", "NA", "NaN"];

/// Raw code → level label map for one factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCodes {
    pub factor: String,
    pub codes: Vec<(String, String)>,
}

impl LevelCodes {
    pub fn new(factor: &str, codes: &[(&str, &str)]) -> Self {
        Self {
            factor: factor.to_string(),
            codes: codes
                .iter()
                .map(|(raw, label)| (raw.to_string(), label.to_string()))
                .collect(),
        }
    }

    pub fn lookup(&self, raw: &str) -> Option<&str> {
        self.codes
            .iter()
            .find(|(code, _)| code == raw)
            .map(|(_, label)| label.as_str())
    }
}

/// Measure computed as the unweighted mean of other columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeMeasure {
    pub name: String,
    pub sources: Vec<String>,
}

/// How a raw file maps onto a [`StudyConfig`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub subject_column: String,
    /// Raw header → canonical name
    pub renames: Vec<(String, String)>,
    pub level_codes: Vec<LevelCodes>,
    pub composites: Vec<CompositeMeasure>,
}

impl LoaderConfig {
    /// Column layout of the HRI speed-accuracy export
    pub fn hri_speed_accuracy() -> Self {
        let rename = |raw: &str, canonical: &str| (raw.to_string(), canonical.to_string());
        Self {
            subject_column: "PID".to_string(),
            renames: vec![
                rename("ConditionSAT", "SAT"),
                rename("ConditionTransparancy", "Transparency"),
                rename("ConditionUserDecision", "UserDecision"),
            ],
            level_codes: vec![
                LevelCodes::new("Transparency", &[("T", "Yes"), ("NT", "No")]),
                LevelCodes::new("UserDecision", &[("UD", "Yes"), ("NUD", "No")]),
            ],
            composites: vec![CompositeMeasure {
                name: "TLX_Overall".to_string(),
                sources: [
                    "TLX_Mental",
                    "TLX_Physical",
                    "TLX_Temporal",
                    "TLX_Performance",
                    "TLX_Effort",
                    "TLX_Frustration",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            }],
        }
    }

    fn canonical<'a>(&'a self, header: &'a str) -> &'a str {
        self.renames
            .iter()
            .find(|(raw, _)| raw == header)
            .map_or(header, |(_, canonical)| canonical.as_str())
    }

    fn codes_for(&self, factor: &str) -> Option<&LevelCodes> {
        self.level_codes.iter().find(|c| c.factor == factor)
    }

    fn is_composite(&self, name: &str) -> bool {
        self.composites.iter().any(|c| c.name == name)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::hri_speed_accuracy()
    }
}

/// Load a CSV file
pub fn load_csv<P: AsRef<Path>>(
    path: P,
    study: &StudyConfig,
    loader: &LoaderConfig,
) -> Result<Dataset> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading CSV");
    load_reader(File::open(path)?, study, loader)
}

/// Load CSV data from any reader
pub fn load_reader<R: Read>(reader: R, study: &StudyConfig, loader: &LoaderConfig) -> Result<Dataset> {
    let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers: Vec<String> = csv
        .headers()?
        .iter()
        .map(|h| loader.canonical(h).to_string())
        .collect();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    };

    let subject_idx = column(loader.subject_column.as_str())?;
    let factor_idx = study
        .factors
        .iter()
        .map(|f| column(f.name.as_str()))
        .collect::<Result<Vec<_>>>()?;

    // Configured measures read directly plus every composite source
    let mut raw_measures: Vec<&str> = Vec::new();
    let direct = study
        .measures
        .iter()
        .map(|m| m.variable.as_str())
        .filter(|name| !loader.is_composite(name));
    let sources = loader
        .composites
        .iter()
        .flat_map(|c| c.sources.iter().map(String::as_str));
    for name in direct.chain(sources) {
        if !raw_measures.contains(&name) {
            raw_measures.push(name);
        }
    }
    let measure_idx = raw_measures
        .iter()
        .map(|&name| column(name))
        .collect::<Result<Vec<_>>>()?;

    let factors = study
        .factors
        .iter()
        .map(FactorSpec::to_factor)
        .collect::<rm_core::Result<Vec<_>>>()?;
    let mut builder = DatasetBuilder::new(factors, raw_measures.iter().copied())?;
    let codes: Vec<Option<&LevelCodes>> = study
        .factors
        .iter()
        .map(|f| loader.codes_for(&f.name))
        .collect();

    let mut record = StringRecord::new();
    while csv.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let field = |i: usize| record.get(i).unwrap_or("");

        let subject = field(subject_idx);
        if subject.is_empty() {
            return Err(Error::EmptySubject(line));
        }

        let mut levels = Vec::with_capacity(factor_idx.len());
        for ((&i, spec), codes) in factor_idx.iter().zip(&study.factors).zip(&codes) {
            let raw = field(i);
            let label = match codes {
                Some(codes) => codes.lookup(raw).ok_or_else(|| Error::UnmappedCode {
                    column: spec.name.clone(),
                    value: raw.to_string(),
                    line,
                })?,
                None => raw,
            };
            levels.push(label);
        }

        let values = measure_idx
            .iter()
            .zip(&raw_measures)
            .map(|(&i, &name)| parse_value(field(i), name, line))
            .collect::<Result<Vec<_>>>()?;

        builder.push(subject, &levels, &values)?;
    }

    let mut dataset = builder.build()?;
    for composite in &loader.composites {
        let sources: Vec<&str> = composite.sources.iter().map(String::as_str).collect();
        dataset = dataset.with_derived_mean(&composite.name, &sources)?;
    }

    info!(
        observations = dataset.n_observations(),
        participants = dataset.n_subjects(),
        "loaded dataset"
    );
    Ok(dataset)
}

fn parse_value(raw: &str, column: &str, line: u64) -> Result<Option<f64>> {
    if MISSING_MARKERS.contains(&raw) {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(Error::InvalidNumber {
            column: column.to_string(),
            value: raw.to_string(),
            line,
        }),
    }
}
