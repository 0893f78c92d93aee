//! Analyses of a single measure

use crate::config::{MeasureSpec, StudyConfig};
use crate::report::{MeasureReport, ALL_FACTORS_KEY};
use crate::Capabilities;
use indexmap::IndexMap;
use rm_core::{Dataset, Outcome, Result, UnavailableReason};
use rm_descriptive::describe;
use tracing::{debug, warn};

/// Runs every configured analysis for one measure
///
/// Inferential analyses are independent of each other: one that cannot be
/// computed is logged and recorded as unavailable, the others still run.
#[derive(Debug, Clone, Copy)]
pub struct MeasureAnalyzer<'a> {
    config: &'a StudyConfig,
    capabilities: Capabilities,
}

impl<'a> MeasureAnalyzer<'a> {
    pub fn new(config: &'a StudyConfig, capabilities: Capabilities) -> Self {
        Self {
            config,
            capabilities,
        }
    }

    /// Analyse `measure`; only malformed input (unknown columns) is an error
    pub fn analyze(&self, dataset: &Dataset, measure: &MeasureSpec) -> Result<MeasureReport> {
        let variable = measure.variable.as_str();
        let factors = self.config.factor_names();

        let mut descriptives = IndexMap::new();
        for factor in &factors {
            descriptives.insert(factor.to_string(), describe(dataset, variable, &[*factor])?);
        }
        for (i, a) in factors.iter().enumerate() {
            for b in &factors[i + 1..] {
                descriptives.insert(format!("{a}_{b}"), describe(dataset, variable, &[*a, *b])?);
            }
        }
        descriptives.insert(ALL_FACTORS_KEY.to_string(), describe(dataset, variable, &factors)?);

        let mut one_way = IndexMap::with_capacity(factors.len());
        for factor in &factors {
            let outcome = self.infer(|| rm_anova::try_one_way(dataset, variable, factor))?;
            one_way.insert(factor.to_string(), self.logged(outcome, variable, factor));
        }

        let mut two_way = IndexMap::with_capacity(self.config.interaction_pairs.len());
        for (a, b) in &self.config.interaction_pairs {
            let outcome = self.infer(|| rm_anova::try_two_way(dataset, variable, a, b))?;
            let analysis = format!("{a} × {b}");
            two_way.insert((a.clone(), b.clone()), self.logged(outcome, variable, &analysis));
        }

        let primary = self.config.primary_factor.as_str();
        let posthoc = self.infer(|| {
            rm_posthoc::try_pairwise(dataset, variable, primary, self.config.p_adjust)
        })?;
        let posthoc = IndexMap::from([(
            primary.to_string(),
            self.logged(posthoc, variable, &format!("post-hoc {primary}")),
        )]);

        debug!(measure = variable, "analysed measure");
        Ok(MeasureReport {
            label: measure.label.clone(),
            variable: measure.variable.clone(),
            descriptives,
            one_way,
            two_way,
            posthoc,
        })
    }

    /// Run an inferential analysis if the backend is available
    ///
    /// Malformed input stays an error; every other failure becomes the
    /// analysis' unavailable reason.
    fn infer<T>(&self, analysis: impl FnOnce() -> Result<T>) -> Result<Outcome<T>> {
        if !self.capabilities.inference {
            return Ok(Outcome::Unavailable(UnavailableReason::BackendMissing));
        }
        match analysis() {
            Ok(value) => Ok(Outcome::Computed(value)),
            Err(err) if err.is_malformed_input() => Err(err),
            Err(err) => Ok(Outcome::Unavailable(err.into())),
        }
    }

    /// A missing backend is reported once by the runner, not per analysis
    fn logged<T>(&self, outcome: Outcome<T>, measure: &str, analysis: &str) -> Outcome<T> {
        if let Some(reason) = outcome.reason() {
            if *reason != UnavailableReason::BackendMissing {
                warn!(measure, analysis, %reason, "analysis unavailable");
            }
        }
        outcome
    }
}
