//! Effect size values and their conventional magnitude labels

use std::fmt;

/// Which statistic an [`EffectSize`] holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Bias-corrected paired standardized mean difference
    HedgesG,
    /// Share of measured variance explained by an ANOVA effect
    GeneralizedEtaSquared,
}

impl EffectKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::HedgesG => "g",
            Self::GeneralizedEtaSquared => "η²G",
        }
    }

    /// Lower bounds of small, medium and large effects
    ///
    /// Cohen's 0.2 / 0.5 / 0.8 for g; Bakeman's 0.02 / 0.13 / 0.26 for η²_G
    /// in repeated-measures designs.
    fn thresholds(&self) -> [f64; 3] {
        match self {
            Self::HedgesG => [0.2, 0.5, 0.8],
            Self::GeneralizedEtaSquared => [0.02, 0.13, 0.26],
        }
    }
}

/// Conventional size label of an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Magnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl Magnitude {
    /// Label `value` by the benchmarks of `kind`; the sign is ignored
    pub fn of(kind: EffectKind, value: f64) -> Self {
        let [small, medium, large] = kind.thresholds();
        match value.abs() {
            v if v >= large => Self::Large,
            v if v >= medium => Self::Medium,
            v if v >= small => Self::Small,
            _ => Self::Negligible,
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        })
    }
}

/// A computed effect size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectSize {
    pub value: f64,
    pub kind: EffectKind,
    pub magnitude: Magnitude,
    /// Number of paired observations, for paired statistics
    pub n_pairs: Option<usize>,
}

impl EffectSize {
    pub fn new(kind: EffectKind, value: f64, n_pairs: Option<usize>) -> Self {
        Self {
            value,
            kind,
            magnitude: Magnitude::of(kind, value),
            n_pairs,
        }
    }
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:.3} ({})", self.kind.symbol(), self.value, self.magnitude)?;
        if let Some(n) = self.n_pairs {
            write!(f, ", n = {n}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_g_labels_ignore_sign() {
        assert_eq!(Magnitude::of(EffectKind::HedgesG, 0.1), Magnitude::Negligible);
        assert_eq!(Magnitude::of(EffectKind::HedgesG, -0.3), Magnitude::Small);
        assert_eq!(Magnitude::of(EffectKind::HedgesG, 0.5), Magnitude::Medium);
        assert_eq!(Magnitude::of(EffectKind::HedgesG, -1.6), Magnitude::Large);
    }

    #[test]
    fn test_eta_labels() {
        let kind = EffectKind::GeneralizedEtaSquared;
        assert_eq!(Magnitude::of(kind, 0.01), Magnitude::Negligible);
        assert_eq!(Magnitude::of(kind, 0.05), Magnitude::Small);
        assert_eq!(Magnitude::of(kind, 0.167), Magnitude::Medium);
        assert_eq!(Magnitude::of(kind, 0.75), Magnitude::Large);
    }

    #[test]
    fn test_display() {
        let g = EffectSize::new(EffectKind::HedgesG, -0.6, Some(12));
        assert_eq!(g.to_string(), "g = -0.600 (medium), n = 12");
        let eta = EffectSize::new(EffectKind::GeneralizedEtaSquared, 0.3, None);
        assert_eq!(eta.to_string(), "η²G = 0.300 (large)");
    }
}
