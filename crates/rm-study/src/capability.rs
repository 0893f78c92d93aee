//! Runtime capabilities of the analysis pipeline

use serde::Serialize;

/// Which analyses can run in this build
///
/// Resolved once, either from compile-time features with [`detect`] or
/// injected directly by callers.
///
/// [`detect`]: Capabilities::detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// ANOVA and post-hoc tests are available
    pub inference: bool,
}

impl Capabilities {
    /// Capabilities of the current build
    pub fn detect() -> Self {
        Self {
            inference: cfg!(feature = "inference"),
        }
    }

    /// Every analysis enabled
    pub fn full() -> Self {
        Self { inference: true }
    }

    /// Descriptive statistics only
    pub fn descriptive_only() -> Self {
        Self { inference: false }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_follows_feature() {
        assert_eq!(Capabilities::detect().inference, cfg!(feature = "inference"));
        assert!(Capabilities::full().inference);
        assert!(!Capabilities::descriptive_only().inference);
    }
}
