//! Multiple-comparison adjustment of p-values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Family-wise error correction applied across all pairs of a factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PAdjust {
    /// Report uncorrected p-values
    None,
    /// p · m, capped at 1
    #[default]
    Bonferroni,
    /// Holm-Bonferroni step-down
    Holm,
}

impl PAdjust {
    /// Adjust a family of p-values
    ///
    /// Undefined p-values stay undefined and do not count towards the
    /// family size.
    pub fn adjust(&self, pvalues: &[Option<f64>]) -> Vec<Option<f64>> {
        let m = pvalues.iter().flatten().count() as f64;
        match self {
            Self::None => pvalues.to_vec(),
            Self::Bonferroni => pvalues
                .iter()
                .map(|p| p.map(|p| (p * m).min(1.0)))
                .collect(),
            Self::Holm => {
                let mut order: Vec<(usize, f64)> = pvalues
                    .iter()
                    .enumerate()
                    .filter_map(|(i, p)| p.map(|p| (i, p)))
                    .collect();
                order.sort_by(|a, b| a.1.total_cmp(&b.1));

                let mut adjusted = vec![None; pvalues.len()];
                let mut running_max = 0.0f64;
                for (rank, (i, p)) in order.into_iter().enumerate() {
                    let scaled = ((m - rank as f64) * p).min(1.0);
                    running_max = running_max.max(scaled);
                    adjusted[i] = Some(running_max);
                }
                adjusted
            }
        }
    }
}

impl fmt::Display for PAdjust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Bonferroni => "bonferroni",
            Self::Holm => "holm",
        };
        f.write_str(name)
    }
}
