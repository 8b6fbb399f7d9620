//! Presentation settings that callers can serialize/deserialize.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Text printed for `Scalar::Null` cells.
    pub null_repr: String,

    /// Stop after this many rows and print a trailer with the remainder.
    pub max_rows: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            null_repr: "null".to_string(),
            max_rows: None,
        }
    }
}
