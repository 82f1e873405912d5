//! Row and field abstractions.
//!
//! A table is generic over its row type. Typed rows declare a field enum with
//! [`row_fields!`](crate::row_fields), so every column key is checked against
//! the row shape at compile time. Schema-less data (JSON or YAML loaded at
//! runtime) uses [`Record`], whose fields are plain strings.

use std::collections::BTreeMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value::CellValue;

/// A column key of some row type.
pub trait RowField: Clone + Eq + Hash + std::fmt::Debug {
    /// The stable string key (used in URLs, filter maps, and JSON).
    fn key(&self) -> &str;

    /// Resolve a string key back to a field.
    fn from_key(key: &str) -> Option<Self>;
}

impl RowField for String {
    fn key(&self) -> &str {
        self
    }

    fn from_key(key: &str) -> Option<Self> {
        Some(key.to_string())
    }
}

/// A record that can be shown as one table line.
pub trait TableRow {
    /// The field type naming this row's cells.
    type Field: RowField;

    /// Value at `field`; `Null` when the row has nothing there.
    fn cell(&self, field: &Self::Field) -> CellValue;

    /// Every field this row carries, in display order.
    fn fields(&self) -> Vec<Self::Field>;

    /// Every value this row carries; global search looks at all of them.
    fn cells(&self) -> Vec<CellValue> {
        self.fields().iter().map(|field| self.cell(field)).collect()
    }
}

/// Declare a field enum for a typed row.
///
/// Generates the enum, an `ALL` constant listing every variant, `Display`,
/// and a [`RowField`] implementation mapping variants to their string keys.
///
/// # Example
///
/// ```rust
/// use souq_core::row_fields;
/// use souq_core::table::RowField;
///
/// row_fields! {
///     pub enum CouponField {
///         Code => "code",
///         Discount => "discount",
///     }
/// }
///
/// assert_eq!(CouponField::Code.key(), "code");
/// assert_eq!(CouponField::from_key("discount"), Some(CouponField::Discount));
/// assert_eq!(CouponField::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! row_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            /// Every field, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
        }

        impl $crate::table::RowField for $name {
            fn key(&self) -> &str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            fn from_key(key: &str) -> ::core::option::Option<Self> {
                match key {
                    $($key => ::core::option::Option::Some(Self::$variant),)+
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::table::RowField::key(self))
            }
        }
    };
}

/// Error converting loose data into a [`Record`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Rows must be JSON/YAML objects.
    #[error("expected an object, found {0}")]
    NotAnObject(&'static str),
}

/// A schema-less row: an open mapping from key to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, CellValue>);

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the value at `key`.
    pub fn insert(&mut self, key: &str, value: impl Into<CellValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Value at `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.0.get(key)
    }

    /// Keys present in this record.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl TableRow for Record {
    type Field = String;

    fn cell(&self, field: &String) -> CellValue {
        self.0.get(field).cloned().unwrap_or_default()
    }

    fn fields(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    fn cells(&self) -> Vec<CellValue> {
        self.0.values().cloned().collect()
    }
}

impl TryFrom<Value> for Record {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let kind = match &value {
            Value::Object(_) => "object",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        };
        match value {
            Value::Object(map) => Ok(Self(
                map.into_iter()
                    .map(|(key, value)| (key, CellValue::from(value)))
                    .collect(),
            )),
            _ => Err(RecordError::NotAnObject(kind)),
        }
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    crate::row_fields! {
        enum SampleField {
            Name => "name",
            Stock => "stock",
        }
    }

    struct Sample {
        name: &'static str,
        stock: Option<i32>,
    }

    impl TableRow for Sample {
        type Field = SampleField;

        fn cell(&self, field: &SampleField) -> CellValue {
            match field {
                SampleField::Name => self.name.into(),
                SampleField::Stock => self.stock.into(),
            }
        }

        fn fields(&self) -> Vec<SampleField> {
            SampleField::ALL.to_vec()
        }
    }

    #[test]
    fn test_macro_keys_roundtrip() {
        for field in SampleField::ALL {
            assert_eq!(SampleField::from_key(field.key()), Some(*field));
        }
        assert_eq!(SampleField::from_key("price"), None);
        assert_eq!(SampleField::Stock.to_string(), "stock");
    }

    #[test]
    fn test_typed_row_cells() {
        let row = Sample {
            name: "Dates",
            stock: None,
        };
        assert_eq!(row.cells(), vec![CellValue::from("Dates"), CellValue::Null]);
    }

    #[test]
    fn test_record_missing_key_is_null() {
        let record = Record::new().with("name", "Bob");
        assert_eq!(record.cell(&"name".to_string()), CellValue::from("Bob"));
        assert_eq!(record.cell(&"email".to_string()), CellValue::Null);
    }

    #[test]
    fn test_record_from_json() {
        let record = Record::try_from(json!({"name": "Alice", "age": 30})).unwrap();
        assert_eq!(record.get("age"), Some(&CellValue::Number(30.0)));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["age", "name"]);

        assert_eq!(
            Record::try_from(json!([1, 2])),
            Err(RecordError::NotAnObject("array"))
        );
    }
}
