//! Summary types for grouped descriptive statistics

use indexmap::IndexMap;
use rm_core::math::{self, presentation};
use rm_core::CellKey;
use std::fmt;

/// Critical value of the large-sample normal approximation for a 95% CI
pub const Z_95: f64 = 1.96;

/// Mean, spread and 95% confidence half-width for one group
///
/// SD, SE and the CI half-width need at least two values and are `None`
/// (serialized as `null`) for singleton groups.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DescriptiveSummary {
    #[serde(serialize_with = "presentation::round3")]
    pub mean: f64,
    #[serde(serialize_with = "presentation::round3_opt")]
    pub sd: Option<f64>,
    #[serde(serialize_with = "presentation::round3_opt")]
    pub se: Option<f64>,
    #[serde(serialize_with = "presentation::round3_opt")]
    pub ci_95: Option<f64>,
    pub n: usize,
}

impl DescriptiveSummary {
    /// Summarize a non-empty group
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mean = math::mean(values)?;
        let sd = math::sample_std(values);
        let se = sd.map(|sd| sd / (values.len() as f64).sqrt());
        Some(Self {
            mean,
            sd,
            se,
            ci_95: se.map(|se| se * Z_95),
            n: values.len(),
        })
    }

    /// Lower and upper bound of the 95% interval around the mean
    pub fn confidence_interval(&self) -> Option<(f64, f64)> {
        self.ci_95.map(|half| (self.mean - half, self.mean + half))
    }
}

impl fmt::Display for DescriptiveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ci_95 {
            Some(half) => write!(f, "M = {:.3} ± {:.3} (n = {})", self.mean, half, self.n),
            None => write!(f, "M = {:.3} (n = {})", self.mean, self.n),
        }
    }
}

/// Descriptive summaries keyed by design cell, in level order
///
/// Serializes as a JSON object from encoded cell key to summary.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct Descriptives {
    #[serde(skip)]
    factors: Vec<String>,
    groups: IndexMap<CellKey, DescriptiveSummary>,
}

impl Descriptives {
    pub(crate) fn new(factors: Vec<String>, groups: IndexMap<CellKey, DescriptiveSummary>) -> Self {
        Self { factors, groups }
    }

    /// Grouping factors, in key order
    pub fn factors(&self) -> &[String] {
        &self.factors
    }

    pub fn get(&self, key: &CellKey) -> Option<&DescriptiveSummary> {
        self.groups.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, &DescriptiveSummary)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Observations across all groups
    pub fn total_count(&self) -> usize {
        self.groups.values().map(|s| s.n).sum()
    }
}
