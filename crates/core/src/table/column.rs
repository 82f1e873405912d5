//! Column definitions for data tables.

use serde::{Deserialize, Serialize};

use super::row::RowField;
use crate::types::LocalizedText;

/// Semantic type of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
}

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// CSS `text-align` value.
    #[must_use]
    pub const fn as_css(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Column definition for a data table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<F> {
    /// The row field this column shows. Unique within a table.
    pub field: F,
    /// Header text in both admin languages.
    pub label: LocalizedText,
    /// Declared value type, if any.
    pub kind: Option<ColumnType>,
    /// Declared alignment, if any.
    pub align: Option<Align>,
}

impl<F: RowField> Column<F> {
    /// Create an untyped column.
    #[must_use]
    pub const fn new(field: F, label: LocalizedText) -> Self {
        Self {
            field,
            label,
            kind: None,
            align: None,
        }
    }

    /// Create a text column.
    #[must_use]
    pub const fn text(field: F, label: LocalizedText) -> Self {
        Self::new(field, label).kind(ColumnType::Text)
    }

    /// Create a number column; numbers sort numerically even when stored as text.
    #[must_use]
    pub const fn number(field: F, label: LocalizedText) -> Self {
        Self::new(field, label).kind(ColumnType::Number)
    }

    /// Create a date column.
    #[must_use]
    pub const fn date(field: F, label: LocalizedText) -> Self {
        Self::new(field, label).kind(ColumnType::Date)
    }

    /// Set the declared value type.
    #[must_use]
    pub const fn kind(mut self, kind: ColumnType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the alignment.
    #[must_use]
    pub const fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// The column's string key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.field.key()
    }

    /// Alignment to render with: the declared one, else right for numbers.
    #[must_use]
    pub fn effective_align(&self) -> Align {
        match (self.align, self.kind) {
            (Some(align), _) => align,
            (None, Some(ColumnType::Number)) => Align::Right,
            (None, _) => Align::Left,
        }
    }
}
