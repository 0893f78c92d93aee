//! Study-level orchestration

use crate::analyzer::MeasureAnalyzer;
use crate::config::StudyConfig;
use crate::report::{MeasureReport, StudyInfo, StudyReport};
use crate::summary::summarize;
use crate::Capabilities;
use indexmap::IndexMap;
use rm_core::{Dataset, DesignCheck, Error, Result};
use tracing::{info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs the configured analyses for every measure of a dataset
#[derive(Debug, Clone)]
pub struct StudyRunner {
    config: StudyConfig,
    capabilities: Capabilities,
}

impl StudyRunner {
    pub fn new(config: StudyConfig, capabilities: Capabilities) -> Self {
        Self {
            config,
            capabilities,
        }
    }

    /// Runner with the capabilities of the current build
    pub fn with_detected_capabilities(config: StudyConfig) -> Self {
        Self::new(config, Capabilities::detect())
    }

    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Check the dataset against the configuration
    ///
    /// Unknown factors or measures and differing level sets are fatal.
    /// Design violations are logged and returned, since they only affect
    /// the analyses that touch the incomplete cells.
    pub fn validate(&self, dataset: &Dataset) -> Result<DesignCheck> {
        self.config.validate()?;
        if dataset.n_observations() == 0 {
            return Err(Error::EmptyDataset);
        }
        for spec in &self.config.factors {
            let factor = dataset.factor(&spec.name)?;
            if factor.levels() != spec.levels.as_slice() {
                return Err(Error::InvalidInput(format!(
                    "factor '{}' has levels {:?}, configuration expects {:?}",
                    spec.name,
                    factor.levels(),
                    spec.levels
                )));
            }
        }
        for measure in &self.config.measures {
            if !dataset.has_measure(&measure.variable) {
                return Err(Error::unknown_column(&measure.variable));
            }
        }

        let check = dataset.design_check();
        for violation in check.missing.iter().chain(&check.duplicated) {
            warn!(
                subject = %violation.subject,
                cell = %violation.cell,
                observations = violation.count,
                "subject does not have exactly one observation per cell"
            );
        }
        Ok(check)
    }

    /// Validate, analyse every measure in configuration order and summarize
    pub fn run(&self, dataset: &Dataset) -> Result<StudyReport> {
        let design_check = self.validate(dataset)?;
        info!(
            participants = dataset.n_subjects(),
            observations = dataset.n_observations(),
            measures = self.config.measures.len(),
            "running study analysis"
        );
        if !self.capabilities.inference {
            warn!("inference backend not available, ANOVA and post-hoc results will be null");
        }

        let analyzer = MeasureAnalyzer::new(&self.config, self.capabilities);

        #[cfg(feature = "parallel")]
        let reports: Vec<MeasureReport> = self
            .config
            .measures
            .par_iter()
            .map(|measure| {
                info!(measure = %measure.variable, "analysing measure");
                analyzer.analyze(dataset, measure)
            })
            .collect::<Result<_>>()?;

        #[cfg(not(feature = "parallel"))]
        let reports: Vec<MeasureReport> = self
            .config
            .measures
            .iter()
            .map(|measure| {
                info!(measure = %measure.variable, "analysing measure");
                analyzer.analyze(dataset, measure)
            })
            .collect::<Result<_>>()?;

        let analyses: IndexMap<String, MeasureReport> = reports
            .into_iter()
            .map(|report| (report.variable.clone(), report))
            .collect();
        let summary = summarize(&analyses, &self.config);
        info!(significant = summary.len(), "study analysis complete");

        Ok(StudyReport {
            study_info: self.study_info(dataset, design_check),
            analyses,
            summary,
        })
    }

    fn study_info(&self, dataset: &Dataset, design_check: DesignCheck) -> StudyInfo {
        StudyInfo {
            design: self.config.design.clone(),
            n_participants: dataset.n_subjects(),
            n_observations: dataset.n_observations(),
            factors: self
                .config
                .factors
                .iter()
                .map(|f| (f.name.clone(), f.levels.clone()))
                .collect(),
            dv_scales: self
                .config
                .measures
                .iter()
                .map(|m| (m.variable.clone(), m.scale.clone()))
                .collect(),
            design_check,
            inference_available: self.capabilities.inference,
        }
    }
}
