//! Cell values and the coercions used for matching and ordering.

use core::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::types::Price;

/// The display value of one cell.
///
/// Rows are open-ended, so a cell is whatever scalar the row holds at a key.
/// A missing key reads as [`CellValue::Null`] and renders as an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Whether the cell holds no value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The string form used for rendering, search, and filters.
    ///
    /// `Null` renders as the empty string.
    #[must_use]
    pub fn display_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// The numeric reading of the cell, if it has one.
    ///
    /// Numbers count when finite; text counts when its trimmed form parses as
    /// a finite number (`" 10 "`, `"2.5"`, `"-3"`).
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// Case-insensitive substring test against the display string.
    ///
    /// `needle` must already be lower-cased.
    #[must_use]
    pub fn contains_folded(&self, needle: &str) -> bool {
        self.display_string().to_lowercase().contains(needle)
    }

    /// Key used to deduplicate values: `1` and `"1"` stay distinct.
    pub(crate) fn identity(&self) -> (u8, String) {
        let tag = match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
        };
        (tag, self.display_string())
    }
}

/// Collation key for locale-aware, case-insensitive ordering.
///
/// Trims, decomposes, drops combining marks (accents, Arabic harakat), and
/// lower-cases, so `"Émile"` sorts beside `"emile"` and `"مُحَمَّد"` beside `"محمد"`.
#[must_use]
pub fn collation_key(s: &str) -> String {
    s.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for CellValue {
    #[allow(clippy::cast_precision_loss)] // Catalog counts stay far below 2^53
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        value.to_f64().map_or(Self::Null, Self::Number)
    }
}

impl From<Price> for CellValue {
    fn from(value: Price) -> Self {
        Self::Number(value.as_f64())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Value> for CellValue {
    /// Arrays and objects are coerced to their JSON text.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::Text(s),
            other @ (Value::Array(_) | Value::Object(_)) => Self::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_string() {
        assert_eq!(CellValue::Null.display_string(), "");
        assert_eq!(CellValue::from(10).display_string(), "10");
        assert_eq!(CellValue::from(2.5).display_string(), "2.5");
        assert_eq!(CellValue::from(true).display_string(), "true");
        assert_eq!(CellValue::from("Bob").display_string(), "Bob");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::from(" 10 ").as_number(), Some(10.0));
        assert_eq!(CellValue::from("-2.5").as_number(), Some(-2.5));
        assert_eq!(CellValue::from("ten").as_number(), None);
        assert_eq!(CellValue::from("").as_number(), None);
        assert_eq!(CellValue::from("NaN").as_number(), None);
        assert_eq!(CellValue::from(f64::INFINITY).as_number(), None);
        assert_eq!(CellValue::from(true).as_number(), None);
        assert_eq!(CellValue::Null.as_number(), None);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(CellValue::from(json!(null)), CellValue::Null);
        assert_eq!(CellValue::from(json!(3)), CellValue::Number(3.0));
        assert_eq!(CellValue::from(json!("x")), CellValue::from("x"));
        assert_eq!(
            CellValue::from(json!(["a", 1])),
            CellValue::Text("[\"a\",1]".to_string())
        );
    }

    #[test]
    fn test_collation_key_folds_case_and_marks() {
        assert_eq!(collation_key("  Émile "), "emile");
        assert_eq!(collation_key("مُحَمَّد"), collation_key("محمد"));
        assert_eq!(collation_key("BOB"), collation_key("bob"));
    }

    #[test]
    fn test_identity_keeps_types_apart() {
        assert_ne!(CellValue::from(1).identity(), CellValue::from("1").identity());
        assert_eq!(CellValue::from("a").identity(), CellValue::from("a").identity());
    }
}
