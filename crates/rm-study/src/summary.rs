//! Significant-effects summary across all measures

use crate::config::StudyConfig;
use crate::report::MeasureReport;
use indexmap::IndexMap;
use rm_anova::AnovaEffect;
use rm_core::math::presentation;
use rm_core::Outcome;

/// One significant ANOVA effect
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SignificantEffect {
    /// Measure label
    pub dv: String,
    /// Human-readable effect name
    pub effect: String,
    #[serde(rename = "F", serialize_with = "presentation::round3")]
    pub f: f64,
    #[serde(serialize_with = "presentation::round4")]
    pub p: f64,
    #[serde(serialize_with = "presentation::round3")]
    pub eta_sq: f64,
}

impl SignificantEffect {
    fn new(dv: &str, effect: String, anova: &AnovaEffect) -> Self {
        Self {
            dv: dv.to_string(),
            effect,
            f: anova.f,
            p: anova.p,
            eta_sq: anova.eta_sq,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct Summary {
    pub significant_effects: Vec<SignificantEffect>,
    /// Reserved for narrative findings; always empty
    pub key_patterns: Vec<String>,
}

impl Summary {
    pub fn len(&self) -> usize {
        self.significant_effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.significant_effects.is_empty()
    }
}

/// Collect every present and significant main effect and interaction
///
/// Per measure in report order: the one-way ANOVA of each configured factor,
/// then the interaction term of each configured factor pair. Unavailable
/// results are skipped.
pub fn summarize(analyses: &IndexMap<String, MeasureReport>, config: &StudyConfig) -> Summary {
    let mut significant_effects = Vec::new();

    for report in analyses.values() {
        for factor in &config.factors {
            if let Some(Outcome::Computed(effect)) = report.one_way_for(&factor.name) {
                if effect.significant {
                    significant_effects.push(SignificantEffect::new(
                        &report.label,
                        format!("{} (main effect)", factor.display_name),
                        effect,
                    ));
                }
            }
        }

        for (a, b) in &config.interaction_pairs {
            let Some(Outcome::Computed(anova)) = report.two_way_for(a, b) else {
                continue;
            };
            let Some(interaction) = anova.interaction().computed() else {
                continue;
            };
            if interaction.significant {
                significant_effects.push(SignificantEffect::new(
                    &report.label,
                    format!("{} × {}", config.display_name(a), config.display_name(b)),
                    interaction,
                ));
            }
        }
    }

    Summary {
        significant_effects,
        key_patterns: Vec::new(),
    }
}
