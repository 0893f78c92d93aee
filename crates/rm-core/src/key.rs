//! Composite keys for design cells
//!
//! A [`CellKey`] is the tuple of level labels identifying a group of
//! observations, in grouping-factor order. Its textual form joins the labels
//! with `_`. Inside a label, `\` is written as `\\` and `_` as `\_`, so two
//! different tuples never share a textual form.

use crate::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;

const DELIMITER: char = '_';
const ESCAPE: char = '\\';

/// Tuple of factor-level labels identifying a design cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    levels: Vec<String>,
}

impl CellKey {
    /// Create a key from labels in grouping order
    pub fn new<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// Labels in grouping order
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Number of labels in the key
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Stable textual form
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (i, level) in self.levels.iter().enumerate() {
            if i > 0 {
                out.push(DELIMITER);
            }
            for c in level.chars() {
                if c == DELIMITER || c == ESCAPE {
                    out.push(ESCAPE);
                }
                out.push(c);
            }
        }
        out
    }

    /// Parse the textual form produced by [`CellKey::encode`]
    pub fn decode(text: &str) -> Result<Self> {
        let mut levels = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            match c {
                ESCAPE => match chars.next() {
                    Some(next) if next == DELIMITER || next == ESCAPE => current.push(next),
                    _ => {
                        return Err(Error::InvalidInput(format!(
                            "dangling escape in cell key '{text}'"
                        )))
                    }
                },
                DELIMITER => levels.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
        levels.push(current);
        Ok(Self { levels })
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for CellKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}
