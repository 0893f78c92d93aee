//! Report types produced by the study runner
//!
//! Every map in the report keeps configuration order when serialized, so
//! repeated runs produce byte-identical JSON.

use crate::config::ScaleSpec;
use crate::summary::Summary;
use rm_anova::{AnovaEffect, TwoWayAnova};
use rm_core::{DesignCheck, Outcome};
use rm_descriptive::Descriptives;
use rm_posthoc::PairwiseComparison;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key of the descriptives over every factor
pub const ALL_FACTORS_KEY: &str = "all";

/// All analyses of one measure
///
/// Serializes flat, the way downstream renderers expect it:
/// `descriptives_<factors>`, `anova_<factor>`, `anova_<a>_<b>` and
/// `posthoc_<factor>`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureReport {
    pub label: String,
    pub variable: String,
    /// Keyed by factor names joined with `_`, or [`ALL_FACTORS_KEY`]
    pub descriptives: IndexMap<String, Descriptives>,
    pub one_way: IndexMap<String, Outcome<AnovaEffect>>,
    /// Keyed by factor pair; serialized as `anova_<a>_<b>`
    pub two_way: IndexMap<(String, String), Outcome<TwoWayAnova>>,
    pub posthoc: IndexMap<String, Outcome<Vec<PairwiseComparison>>>,
}

impl MeasureReport {
    pub fn one_way_for(&self, factor: &str) -> Option<&Outcome<AnovaEffect>> {
        self.one_way.get(factor)
    }

    pub fn two_way_for(&self, factor_a: &str, factor_b: &str) -> Option<&Outcome<TwoWayAnova>> {
        self.two_way
            .get(&(factor_a.to_string(), factor_b.to_string()))
    }

    pub fn posthoc_for(&self, factor: &str) -> Option<&Outcome<Vec<PairwiseComparison>>> {
        self.posthoc.get(factor)
    }
}

impl Serialize for MeasureReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries =
            2 + self.descriptives.len() + self.one_way.len() + self.two_way.len() + self.posthoc.len();
        let mut map = serializer.serialize_map(Some(entries))?;
        map.serialize_entry("label", &self.label)?;
        map.serialize_entry("variable", &self.variable)?;
        for (key, stats) in self.descriptives.iter() {
            map.serialize_entry(&format!("descriptives_{key}"), stats)?;
        }
        for (factor, outcome) in self.one_way.iter() {
            map.serialize_entry(&format!("anova_{factor}"), outcome)?;
        }
        for ((a, b), outcome) in self.two_way.iter() {
            map.serialize_entry(&format!("anova_{a}_{b}"), outcome)?;
        }
        for (factor, outcome) in self.posthoc.iter() {
            map.serialize_entry(&format!("posthoc_{factor}"), outcome)?;
        }
        map.end()
    }
}

/// Study-level metadata
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StudyInfo {
    pub design: String,
    pub n_participants: usize,
    pub n_observations: usize,
    /// Level order of every factor
    pub factors: IndexMap<String, Vec<String>>,
    pub dv_scales: IndexMap<String, ScaleSpec>,
    /// Missing or duplicated subject × cell observations
    pub design_check: DesignCheck,
    pub inference_available: bool,
}

/// Complete output of a study run
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StudyReport {
    pub study_info: StudyInfo,
    /// Measure variable → analyses, in configuration order
    pub analyses: IndexMap<String, MeasureReport>,
    pub summary: Summary,
}
