//! The table engine: interaction state plus view derivation.

use super::column::Column;
use super::filter::{FilterState, matches_search};
use super::popup::{OpenPopup, Point, PopupAnchor, PopupState, Rect, ScrollOffset};
use super::row::{RowField, TableRow};
use super::sort::{SortDirection, SortSpec, SortState, compare_cells};
use super::value::CellValue;
use super::view::{BodyCell, BodyRow, HeaderCell, PageInfo, RenderOptions, RenderedTable, TableView};

/// Interactive state of one data table.
///
/// The engine never owns or mutates the rows it shows. Every interaction
/// updates state; [`view`](Self::view) and [`render`](Self::render) derive a
/// fresh result from the rows passed in.
///
/// ```rust
/// use souq_core::LocalizedText;
/// use souq_core::table::{Column, Record, TableEngine};
///
/// let rows = vec![
///     Record::new().with("name", "Bob"),
///     Record::new().with("name", "alice"),
/// ];
/// let mut engine = TableEngine::new(vec![Column::text(
///     "name".to_string(),
///     LocalizedText::new("Name", "الاسم"),
/// )]);
///
/// engine.toggle_sort("name".to_string());
/// assert_eq!(engine.view(&rows).indices(), &[1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct TableEngine<F: RowField> {
    columns: Vec<Column<F>>,
    search: String,
    filters: FilterState<F>,
    sort: SortState<F>,
    popup: PopupState<F>,
}

impl<F: RowField> TableEngine<F> {
    /// A table with no search, no filters, no sort, and every popup closed.
    #[must_use]
    pub fn new(columns: Vec<Column<F>>) -> Self {
        Self {
            columns,
            search: String::new(),
            filters: FilterState::default(),
            sort: SortState::default(),
            popup: PopupState::default(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column<F>] {
        &self.columns
    }

    /// The column showing `field`, if the table has one.
    #[must_use]
    pub fn column(&self, field: &F) -> Option<&Column<F>> {
        self.columns.iter().find(|column| &column.field == field)
    }

    // =========================================================================
    // Search & filters
    // =========================================================================

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState<F> {
        &self.filters
    }

    /// Substring filter on one column; an empty value removes it.
    pub fn apply_filter(&mut self, field: F, value: impl Into<String>) {
        self.filters.apply(field, value);
    }

    /// Whole-value filter from the value picker.
    pub fn pick_value(&mut self, field: F, value: &CellValue) {
        self.filters.pick(field, value.display_string());
    }

    pub fn clear_filter(&mut self, field: &F) {
        self.filters.clear(field);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear_all();
    }

    // =========================================================================
    // Sort
    // =========================================================================

    #[must_use]
    pub const fn sort(&self) -> Option<&SortSpec<F>> {
        self.sort.spec()
    }

    /// Header sort click: ascending first, then flip on each click.
    pub fn toggle_sort(&mut self, field: F) {
        self.sort.toggle(field);
    }

    pub fn set_sort(&mut self, field: F, direction: SortDirection) {
        self.sort.set(field, direction);
    }

    /// Back to input order.
    pub fn clear_sort(&mut self) {
        self.sort.clear();
    }

    // =========================================================================
    // Filter popup
    // =========================================================================

    #[must_use]
    pub const fn popup(&self) -> Option<&OpenPopup<F>> {
        self.popup.open()
    }

    /// Filter-icon click on `field`'s header, measured at `header` in the
    /// viewport while the page is scrolled by `scroll`.
    ///
    /// The popup opens pre-filled with the column's current filter text.
    pub fn toggle_filter_popup(&mut self, field: F, header: Rect, scroll: ScrollOffset) {
        let draft = self
            .filters
            .get(&field)
            .map(|filter| filter.value.clone())
            .unwrap_or_default();
        self.popup
            .toggle(field, PopupAnchor::below(header, scroll), draft);
    }

    /// Text typed into the open popup.
    pub fn set_popup_draft(&mut self, text: impl Into<String>) {
        self.popup.set_draft(text);
    }

    /// Apply the popup's text as the column filter and close it.
    ///
    /// Returns `false` (and changes nothing) when no popup is open.
    pub fn apply_popup(&mut self) -> bool {
        match self.popup.close() {
            Some(popup) => {
                self.filters.apply(popup.field, popup.draft);
                true
            }
            None => false,
        }
    }

    /// Filter the popup's column to exactly `value` and close it.
    pub fn pick_popup_value(&mut self, value: &CellValue) -> bool {
        match self.popup.close() {
            Some(popup) => {
                self.pick_value(popup.field, value);
                true
            }
            None => false,
        }
    }

    /// Clear the popup's column filter and close it.
    pub fn clear_popup_filter(&mut self) -> bool {
        match self.popup.close() {
            Some(popup) => {
                self.filters.clear(&popup.field);
                true
            }
            None => false,
        }
    }

    /// Close the popup without touching filters.
    pub fn close_popup(&mut self) {
        self.popup.close();
    }

    /// Page click at `point`; closes the popup when the click lands outside
    /// `popup_bounds`. Returns whether it closed.
    pub fn click_at(&mut self, point: Point, popup_bounds: Rect) -> bool {
        if self.popup.is_open() && !popup_bounds.contains(point) {
            self.popup.close();
            return true;
        }
        false
    }

    // =========================================================================
    // Derivation
    // =========================================================================

    /// Rows passing search and every filter, in sort order (or input order
    /// when unsorted).
    pub fn view<R: TableRow<Field = F>>(&self, rows: &[R]) -> TableView {
        let matched = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| matches_search(*row, &self.search) && self.filters.matches(*row));

        let indices = match self.sort.spec() {
            None => matched.map(|(index, _)| index).collect(),
            Some(spec) => {
                let mut keyed: Vec<(usize, CellValue)> = matched
                    .map(|(index, row)| (index, row.cell(&spec.field)))
                    .collect();
                // stable: ties keep input order in both directions
                keyed.sort_by(|(_, a), (_, b)| spec.direction.apply(compare_cells(a, b)));
                keyed.into_iter().map(|(index, _)| index).collect()
            }
        };

        TableView::new(indices, rows.len())
    }

    /// Derive the view and turn it into header and body cells.
    pub fn render<R: TableRow<Field = F>>(
        &self,
        rows: &[R],
        options: &RenderOptions,
    ) -> RenderedTable {
        let view = self.view(rows);

        let (indices, page) = match options.page {
            Some(request) => {
                let page = view.page(request.number, request.per_page);
                let info = PageInfo {
                    number: page.number,
                    per_page: page.per_page,
                    total_pages: page.total_pages,
                };
                (page.indices, Some(info))
            }
            None => (view.indices().to_vec(), None),
        };

        let columns = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key().to_string(),
                label: column.label.get(options.locale).to_string(),
                kind: column.kind.unwrap_or_default(),
                align: column.effective_align(),
                sort: self.sort.direction_of(&column.field),
                filter: self.filters.get(&column.field).cloned(),
            })
            .collect();

        let body = indices
            .into_iter()
            .filter_map(|index| rows.get(index).map(|row| (index, row)))
            .map(|(index, row)| BodyRow {
                index,
                cells: self
                    .columns
                    .iter()
                    .map(|column| BodyCell {
                        text: row.cell(&column.field).display_string(),
                        align: column.effective_align(),
                    })
                    .collect(),
            })
            .collect();

        RenderedTable {
            locale: options.locale,
            direction: options.locale.direction(),
            columns,
            rows: body,
            has_actions: options.show_actions,
            search: self.search.clone(),
            total_rows: view.source_len(),
            matched_rows: view.len(),
            page,
        }
    }
}
