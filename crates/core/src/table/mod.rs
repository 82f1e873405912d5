//! Generic data-table engine.
//!
//! Every admin listing (products, orders, affiliates, ...) is the same table:
//! a free-text search over all cells, substring filters per column, a
//! single-column sort that toggles direction, a filter popup anchored under
//! the header, and edit/delete actions per row.
//!
//! The engine holds interaction state only. Rows are passed in when a
//! [`TableView`] is derived and are never reordered or mutated.

pub mod actions;
pub mod column;
pub mod engine;
pub mod filter;
pub mod popup;
pub mod row;
pub mod sort;
pub mod value;
pub mod view;

pub use actions::{RowAction, RowActions};
pub use column::{Align, Column, ColumnType};
pub use engine::TableEngine;
pub use filter::{ColumnFilter, FilterMode, FilterState, matches_search, unique_values};
pub use popup::{OpenPopup, Point, PopupAnchor, PopupState, Rect, ScrollOffset};
pub use row::{Record, RecordError, RowField, TableRow};
pub use sort::{SortDirection, SortSpec, SortState, compare_cells};
pub use value::{CellValue, collation_key};
pub use view::{
    BodyCell, BodyRow, HeaderCell, Page, PageInfo, PageRequest, RenderOptions, RenderedTable,
    TableView,
};
