use std::fmt;

use serde::{Deserialize, Serialize};

/// Transporter operational status. The source represents this as the
/// literal strings `"true"`/`"false"`; kept as a two-variant enum here so
/// callers can't smuggle in an arbitrary string, with `Display` producing
/// the same literals for the eventual serialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStatus {
    Active,
    Inactive,
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStatus::Active => f.write_str("true"),
            LineStatus::Inactive => f.write_str("false"),
        }
    }
}

impl Default for LineStatus {
    fn default() -> Self {
        LineStatus::Active
    }
}
