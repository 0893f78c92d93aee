//! Configuration types for a repeated-measures study

use rm_core::{Error, Factor, Result};
use rm_descriptive::MAX_GROUPING_FACTORS;
use rm_posthoc::PAdjust;
use serde::{Deserialize, Serialize};

/// A within-subject factor with its level order and a display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorSpec {
    /// Canonical column name
    pub name: String,
    /// Name used in summary labels
    pub display_name: String,
    pub levels: Vec<String>,
}

impl FactorSpec {
    pub fn new<L: Into<String>>(
        name: &str,
        display_name: &str,
        levels: impl IntoIterator<Item = L>,
    ) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn to_factor(&self) -> Result<Factor> {
        Factor::new(self.name.as_str(), self.levels.iter().cloned())
    }
}

/// Response scale of a measure, reported as study metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleSpec {
    pub min: f64,
    pub max: f64,
    pub label: String,
}

impl ScaleSpec {
    pub fn new(min: f64, max: f64, label: &str) -> Self {
        Self {
            min,
            max,
            label: label.to_string(),
        }
    }
}

/// A dependent variable to analyse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureSpec {
    pub variable: String,
    pub label: String,
    pub scale: ScaleSpec,
}

impl MeasureSpec {
    pub fn new(variable: &str, label: &str, scale: ScaleSpec) -> Self {
        Self {
            variable: variable.to_string(),
            label: label.to_string(),
            scale,
        }
    }
}

/// Everything the runner needs to know about a study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Free-text design description
    pub design: String,
    pub factors: Vec<FactorSpec>,
    /// Measures in report order
    pub measures: Vec<MeasureSpec>,
    /// Factor that gets post-hoc comparisons
    pub primary_factor: String,
    /// Factor pairs analysed with a two-way ANOVA
    pub interaction_pairs: Vec<(String, String)>,
    pub p_adjust: PAdjust,
}

impl StudyConfig {
    /// The speed-accuracy trade-off HRI study: 3 (SAT) × 2 (uncertainty
    /// communication) × 2 (user decision), all within subjects
    pub fn hri_speed_accuracy() -> Self {
        let likert = ScaleSpec::new(1.0, 7.0, "7-point Likert");
        let tlx = ScaleSpec::new(1.0, 21.0, "21-point scale");

        Self {
            design: "3 (SAT) × 2 (Uncertainty Communication) × 2 (User Decision) within-subjects"
                .to_string(),
            factors: vec![
                FactorSpec::new("SAT", "SAT", ["Conservative", "Moderate", "Risky"]),
                FactorSpec::new("Transparency", "Uncertainty Communication", ["Yes", "No"]),
                FactorSpec::new("UserDecision", "User Decision", ["Yes", "No"]),
            ],
            measures: vec![
                MeasureSpec::new(
                    "FrustrationRobotPerformance",
                    "Frustration: Robot Performance",
                    likert.clone(),
                ),
                MeasureSpec::new(
                    "FrustrationRobotDecision",
                    "Frustration: Robot Decisions",
                    likert,
                ),
                MeasureSpec::new("TLX_Overall", "NASA TLX Overall", tlx.clone()),
                MeasureSpec::new("TLX_Mental", "NASA TLX: Mental Demand", tlx.clone()),
                MeasureSpec::new("TLX_Physical", "NASA TLX: Physical Demand", tlx.clone()),
                MeasureSpec::new("TLX_Temporal", "NASA TLX: Temporal Demand", tlx.clone()),
                MeasureSpec::new("TLX_Performance", "NASA TLX: Performance", tlx.clone()),
                MeasureSpec::new("TLX_Effort", "NASA TLX: Effort", tlx.clone()),
                MeasureSpec::new("TLX_Frustration", "NASA TLX: Frustration", tlx),
                MeasureSpec::new(
                    "Utility_Score",
                    "Perceived Utility",
                    ScaleSpec::new(1.0, 4.0, "Composite score"),
                ),
                MeasureSpec::new(
                    "Godspeed_Intelligence",
                    "Perceived Intelligence",
                    ScaleSpec::new(1.0, 5.0, "Godspeed scale"),
                ),
            ],
            primary_factor: "SAT".to_string(),
            interaction_pairs: vec![
                ("SAT".to_string(), "Transparency".to_string()),
                ("SAT".to_string(), "UserDecision".to_string()),
            ],
            p_adjust: PAdjust::Bonferroni,
        }
    }

    pub fn factor(&self, name: &str) -> Option<&FactorSpec> {
        self.factors.iter().find(|f| f.name == name)
    }

    pub fn factor_names(&self) -> Vec<&str> {
        self.factors.iter().map(|f| f.name.as_str()).collect()
    }

    /// Display name of a factor, falling back to its column name
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.factor(name).map_or(name, |f| f.display_name.as_str())
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.factors.is_empty() || self.factors.len() > MAX_GROUPING_FACTORS {
            return Err(Error::InvalidParameter(format!(
                "a study needs 1 to {MAX_GROUPING_FACTORS} factors, got {}",
                self.factors.len()
            )));
        }
        for (i, factor) in self.factors.iter().enumerate() {
            if self.factors[..i].iter().any(|f| f.name == factor.name) {
                return Err(Error::InvalidParameter(format!(
                    "factor '{}' declared twice",
                    factor.name
                )));
            }
            factor.to_factor()?;
        }
        for (i, measure) in self.measures.iter().enumerate() {
            if self.measures[..i].iter().any(|m| m.variable == measure.variable) {
                return Err(Error::InvalidParameter(format!(
                    "measure '{}' declared twice",
                    measure.variable
                )));
            }
        }

        let known = |name: &str| -> Result<()> {
            self.factor(name)
                .map(|_| ())
                .ok_or_else(|| Error::InvalidParameter(format!("unknown factor '{name}'")))
        };
        known(&self.primary_factor)?;
        for (a, b) in &self.interaction_pairs {
            known(a)?;
            known(b)?;
            if a == b {
                return Err(Error::InvalidParameter(format!(
                    "interaction pair repeats factor '{a}'"
                )));
            }
        }
        Ok(())
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self::hri_speed_accuracy()
    }
}
