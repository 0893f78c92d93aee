//! Result types for repeated-measures ANOVA

use indexmap::IndexMap;
use rm_core::math::presentation;
use rm_core::{Outcome, ALPHA};
use rm_effect::partial_eta_squared;
use std::fmt;

/// Mauchly's test of sphericity for one effect
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MauchlyTest {
    #[serde(rename = "W", serialize_with = "presentation::round3")]
    pub w: f64,
    #[serde(serialize_with = "presentation::round3")]
    pub chi2: f64,
    pub dof: usize,
    #[serde(serialize_with = "presentation::round4")]
    pub p: f64,
}

impl MauchlyTest {
    /// Sphericity is retained unless the test rejects it at [`ALPHA`]
    pub fn is_spherical(&self) -> bool {
        self.p >= ALPHA
    }
}

/// One tested within-subject effect
///
/// `p` comes from the uncorrected degrees of freedom, `p_corr` from the
/// Greenhouse-Geisser corrected ones. With two levels the correction is
/// the identity and both are equal.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AnovaEffect {
    /// Factor name, or `"A * B"` for an interaction
    pub factor: String,
    pub df1: usize,
    pub df2: usize,
    #[serde(rename = "F", serialize_with = "presentation::round3")]
    pub f: f64,
    #[serde(serialize_with = "presentation::round4")]
    pub p: f64,
    #[serde(serialize_with = "presentation::round4")]
    pub p_corr: f64,
    /// Generalized eta-squared
    #[serde(serialize_with = "presentation::round3")]
    pub eta_sq: f64,
    /// Decided on the uncorrected p-value
    pub significant: bool,
    #[serde(serialize_with = "presentation::round3")]
    pub epsilon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sphericity: Option<MauchlyTest>,
    #[serde(skip)]
    pub ss_effect: f64,
    #[serde(skip)]
    pub ss_error: f64,
}

impl AnovaEffect {
    /// Partial eta-squared from the effect and its own error term
    pub fn partial_eta_sq(&self) -> Option<f64> {
        partial_eta_squared(self.ss_effect, self.ss_error)
    }

    /// Corrected degrees of freedom
    pub fn corrected_df(&self) -> (f64, f64) {
        (self.epsilon * self.df1 as f64, self.epsilon * self.df2 as f64)
    }
}

impl fmt::Display for AnovaEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: F({}, {}) = {:.3}, p = {:.4}, η²G = {:.3}",
            self.factor, self.df1, self.df2, self.f, self.p, self.eta_sq
        )
    }
}

/// Label used for the interaction of two factors
pub fn interaction_label(factor_a: &str, factor_b: &str) -> String {
    format!("{factor_a} * {factor_b}")
}

/// Both main effects and the interaction of a two-factor model
///
/// Effects are kept in the order A, B, A × B and serialize as a map keyed
/// by source label. Each effect is tested against its own error term, so one
/// can be unavailable (`null`) while the others are computed.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct TwoWayAnova {
    effects: IndexMap<String, Outcome<AnovaEffect>>,
}

impl TwoWayAnova {
    pub(crate) fn new(
        (factor_a, main_a): (&str, Outcome<AnovaEffect>),
        (factor_b, main_b): (&str, Outcome<AnovaEffect>),
        interaction: Outcome<AnovaEffect>,
    ) -> Self {
        let mut effects = IndexMap::with_capacity(3);
        effects.insert(factor_a.to_string(), main_a);
        effects.insert(factor_b.to_string(), main_b);
        effects.insert(interaction_label(factor_a, factor_b), interaction);
        Self { effects }
    }

    pub fn main_a(&self) -> &Outcome<AnovaEffect> {
        &self.effects[0]
    }

    pub fn main_b(&self) -> &Outcome<AnovaEffect> {
        &self.effects[1]
    }

    pub fn interaction(&self) -> &Outcome<AnovaEffect> {
        &self.effects[2]
    }

    /// Look up an effect by its source label
    pub fn get(&self, source: &str) -> Option<&Outcome<AnovaEffect>> {
        self.effects.get(source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome<AnovaEffect>)> {
        self.effects.iter().map(|(source, effect)| (source.as_str(), effect))
    }
}
