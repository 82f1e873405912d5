//! Global search and per-column filters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::row::{RowField, TableRow};
use super::value::CellValue;

/// How a column filter compares against cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Case-insensitive substring (typed into the popup).
    #[default]
    Contains,
    /// Case-insensitive whole-value match (picked from the value list).
    Equals,
}

/// One column's filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnFilter {
    pub value: String,
    pub mode: FilterMode,
    #[serde(skip)]
    folded: String,
}

impl ColumnFilter {
    fn new(value: String, mode: FilterMode) -> Self {
        let folded = value.to_lowercase();
        Self {
            value,
            mode,
            folded,
        }
    }

    /// Whether `cell` passes this filter.
    #[must_use]
    pub fn matches(&self, cell: &CellValue) -> bool {
        match self.mode {
            FilterMode::Contains => cell.contains_folded(&self.folded),
            FilterMode::Equals => cell.display_string().to_lowercase() == self.folded,
        }
    }
}

/// Active column filters, keyed by field. All entries must match (AND).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<F: RowField> {
    filters: HashMap<F, ColumnFilter>,
}

impl<F: RowField> Default for FilterState<F> {
    fn default() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }
}

impl<F: RowField> FilterState<F> {
    /// Set a substring filter. An empty value removes the filter.
    pub fn apply(&mut self, field: F, value: impl Into<String>) {
        self.set(field, value.into(), FilterMode::Contains);
    }

    /// Set a whole-value filter. An empty value removes the filter.
    pub fn pick(&mut self, field: F, value: impl Into<String>) {
        self.set(field, value.into(), FilterMode::Equals);
    }

    fn set(&mut self, field: F, value: String, mode: FilterMode) {
        if value.is_empty() {
            self.filters.remove(&field);
        } else {
            self.filters.insert(field, ColumnFilter::new(value, mode));
        }
    }

    /// Drop the filter on one column.
    pub fn clear(&mut self, field: &F) {
        self.filters.remove(field);
    }

    /// Drop every filter.
    pub fn clear_all(&mut self) {
        self.filters.clear();
    }

    /// The filter on `field`, if one is set.
    #[must_use]
    pub fn get(&self, field: &F) -> Option<&ColumnFilter> {
        self.filters.get(field)
    }

    /// Whether `field` has a filter.
    #[must_use]
    pub fn is_active(&self, field: &F) -> bool {
        self.filters.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Iterate over `(field, filter)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&F, &ColumnFilter)> {
        self.filters.iter()
    }

    /// Whether `row` passes every filter.
    pub fn matches<R: TableRow<Field = F>>(&self, row: &R) -> bool {
        self.filters
            .iter()
            .all(|(field, filter)| filter.matches(&row.cell(field)))
    }
}

/// Whether any of `row`'s values contains `query`, ignoring case.
///
/// An empty query matches every row.
pub fn matches_search<R: TableRow>(row: &R, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    row.cells().iter().any(|cell| cell.contains_folded(&needle))
}

/// Distinct non-null values at `field`, in first-seen order.
///
/// Feeds the value picker in a column's filter popup.
pub fn unique_values<R: TableRow>(rows: &[R], field: &R::Field) -> Vec<CellValue> {
    let mut seen = std::collections::HashSet::new();
    rows.iter()
        .map(|row| row.cell(field))
        .filter(|value| !value.is_null())
        .filter(|value| seen.insert(value.identity()))
        .collect()
}
