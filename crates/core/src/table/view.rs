//! Derived views: the row order a table shows, and its rendered form.

use serde::Serialize;

use super::column::{Align, ColumnType};
use super::filter::ColumnFilter;
use super::sort::SortDirection;
use crate::types::Locale;

/// The rows a table currently shows, as indices into the source rows.
///
/// The source collection is never reordered or copied; dropping the view
/// (or calling `clear_sort` and re-deriving) gives back input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    indices: Vec<usize>,
    source_len: usize,
}

impl TableView {
    pub(crate) const fn new(indices: Vec<usize>, source_len: usize) -> Self {
        Self {
            indices,
            source_len,
        }
    }

    /// Source indices in display order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of rows shown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of rows in the source collection.
    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.source_len
    }

    /// Source index of the row displayed at `position`.
    #[must_use]
    pub fn source_index(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    /// The source row displayed at `position`.
    #[must_use]
    pub fn row<'a, R>(&self, rows: &'a [R], position: usize) -> Option<&'a R> {
        self.source_index(position).and_then(|index| rows.get(index))
    }

    /// Source rows in display order.
    pub fn rows<'a, R>(&'a self, rows: &'a [R]) -> impl Iterator<Item = &'a R> + 'a {
        self.indices.iter().filter_map(|&index| rows.get(index))
    }

    /// One page of the view. Pages are 1-based; out-of-range page numbers
    /// clamp to the nearest page and a zero page size counts as one.
    #[must_use]
    pub fn page(&self, number: usize, per_page: usize) -> Page {
        let per_page = per_page.max(1);
        let total_pages = self.indices.len().div_ceil(per_page);
        let number = number.clamp(1, total_pages.max(1));
        let indices = self
            .indices
            .iter()
            .skip((number - 1) * per_page)
            .take(per_page)
            .copied()
            .collect();

        Page {
            number,
            per_page,
            total_pages,
            total_items: self.indices.len(),
            indices,
        }
    }
}

/// A slice of a [`TableView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Source indices on this page, in display order.
    pub indices: Vec<usize>,
}

/// Which page to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: usize,
    pub per_page: usize,
}

/// Options for [`TableEngine::render`](super::TableEngine::render).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub locale: Locale,
    /// Render one page instead of every matching row.
    pub page: Option<PageRequest>,
    /// Add an actions column (edit/delete handlers are available).
    pub show_actions: bool,
}

/// A rendered header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub kind: ColumnType,
    pub align: Align,
    /// Set on the column the table is sorted by.
    pub sort: Option<SortDirection>,
    /// Set when the column has an active filter.
    pub filter: Option<ColumnFilter>,
}

/// A rendered body cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyCell {
    pub text: String,
    pub align: Align,
}

/// A rendered body row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyRow {
    /// Index of the row in the source collection; row actions refer to it.
    pub index: usize,
    pub cells: Vec<BodyCell>,
}

/// Page position of a rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub number: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

/// Everything a front end needs to draw a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub locale: Locale,
    /// `ltr` or `rtl`.
    pub direction: &'static str,
    pub columns: Vec<HeaderCell>,
    pub rows: Vec<BodyRow>,
    pub has_actions: bool,
    pub search: String,
    /// Rows in the source collection.
    pub total_rows: usize,
    /// Rows passing search and filters (before paging).
    pub matched_rows: usize,
    pub page: Option<PageInfo>,
}
