//! Cell values and lenient coercions
//!
//! The backing store is spreadsheet-shaped: cells arrive as loosely typed
//! values, and every read coerces leniently (trimmed text, a small truthy
//! set, canonical `%Y-%m-%d` date rendering) rather than rejecting rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell of a row store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// Text cell
    Text(String),
    /// Numeric cell
    Number(f64),
    /// Boolean cell
    Bool(bool),
    /// Date cell
    Date(NaiveDate),
}

impl CellValue {
    /// Trimmed textual rendering; empty string for [`CellValue::Empty`]
    #[must_use]
    pub fn to_trimmed_string(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => {
                // Integral numbers render without a trailing ".0" so codes
                // like 310 survive a numeric-typed column
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Self::Bool(b) => b.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// True when the cell holds nothing renderable
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Lenient truthiness: `true`, `"TRUE"`, and `"Yes"` count as true
    /// (text comparisons are case-insensitive); everything else is false
    #[must_use]
    pub fn as_bool_lenient(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => {
                let lowered = s.trim().to_lowercase();
                lowered == "true" || lowered == "yes"
            }
            _ => false,
        }
    }

    /// Explicit false: only a boolean `false` or the text `"false"`/`"no"`
    ///
    /// Distinct from [`CellValue::as_bool_lenient`] because the
    /// departed-row exclusion rule fires only when the active flag is
    /// explicitly false, not merely absent.
    #[must_use]
    pub fn is_explicit_false(&self) -> bool {
        match self {
            Self::Bool(b) => !*b,
            Self::Text(s) => {
                let lowered = s.trim().to_lowercase();
                lowered == "false" || lowered == "no"
            }
            _ => false,
        }
    }

    /// Canonical `%Y-%m-%d` date string, when the cell parses as a date
    ///
    /// Accepts date-typed cells, ISO text, and US `m/d/Y` text.
    #[must_use]
    pub fn as_date_string(&self) -> Option<String> {
        match self {
            Self::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
                    .ok()
                    .map(|d| d.format("%Y-%m-%d").to_string())
            }
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s)
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}
