//! Numeric helpers shared across the workspace
//!
//! Everything here works in full `f64` precision. Rounding for presentation
//! lives in [`presentation`] and is applied only when serializing.

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with the n-1 denominator, `None` below two values
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|&x| (x - m).powi(2)).sum();
    Some(ss / (values.len() - 1) as f64)
}

/// Sample standard deviation with the n-1 denominator
pub fn sample_std(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Round to a fixed number of decimal places, half away from zero
pub fn round_dp(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

/// Serde helpers that round floats while serializing
///
/// Means, SDs, F statistics and effect sizes use 3 decimals, p-values 4.
pub mod presentation {
    use super::round_dp;
    use serde::Serializer;

    pub const STAT_PLACES: u32 = 3;
    pub const P_PLACES: u32 = 4;

    pub fn round3<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(round_dp(*value, STAT_PLACES))
    }

    pub fn round4<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(round_dp(*value, P_PLACES))
    }

    pub fn round3_opt<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_some(&round_dp(*v, STAT_PLACES)),
            None => serializer.serialize_none(),
        }
    }

    pub fn round4_opt<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_some(&round_dp(*v, P_PLACES)),
            None => serializer.serialize_none(),
        }
    }
}
