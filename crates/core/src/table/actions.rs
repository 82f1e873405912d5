//! Per-row edit/delete handlers.

use serde::{Deserialize, Serialize};

use super::view::TableView;

/// An action offered in a table's actions column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    Edit,
    Delete,
}

type Handler<'a, R> = Box<dyn FnMut(&R) + 'a>;

/// Handlers supplied by the page that owns the table.
///
/// Dispatch hands the full source row to the handler. Nothing here asks for
/// confirmation; a delete handler that wants one must ask itself.
pub struct RowActions<'a, R> {
    on_edit: Option<Handler<'a, R>>,
    on_delete: Option<Handler<'a, R>>,
}

impl<R> Default for RowActions<'_, R> {
    fn default() -> Self {
        Self {
            on_edit: None,
            on_delete: None,
        }
    }
}

impl<R> std::fmt::Debug for RowActions<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowActions")
            .field("on_edit", &self.on_edit.is_some())
            .field("on_delete", &self.on_delete.is_some())
            .finish()
    }
}

impl<'a, R> RowActions<'a, R> {
    /// No handlers; the table shows no actions column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_edit(mut self, handler: impl FnMut(&R) + 'a) -> Self {
        self.on_edit = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_delete(mut self, handler: impl FnMut(&R) + 'a) -> Self {
        self.on_delete = Some(Box::new(handler));
        self
    }

    /// Whether any handler is present (the actions column is shown).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.on_edit.is_none() && self.on_delete.is_none()
    }

    #[must_use]
    pub const fn supports(&self, action: RowAction) -> bool {
        match action {
            RowAction::Edit => self.on_edit.is_some(),
            RowAction::Delete => self.on_delete.is_some(),
        }
    }

    /// Call the handler for `action` with `row`. Returns whether one ran.
    pub fn dispatch(&mut self, action: RowAction, row: &R) -> bool {
        let handler = match action {
            RowAction::Edit => self.on_edit.as_mut(),
            RowAction::Delete => self.on_delete.as_mut(),
        };
        handler.map(|handler| handler(row)).is_some()
    }

    /// Dispatch on the row displayed at `position` of `view`.
    pub fn dispatch_at(
        &mut self,
        action: RowAction,
        view: &TableView,
        rows: &[R],
        position: usize,
    ) -> bool {
        view.row(rows, position)
            .is_some_and(|row| self.dispatch(action, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Row = (i32, &'static str);

    #[test]
    fn test_dispatch_passes_full_row() {
        let mut edited = Vec::new();
        let mut deleted = Vec::new();
        {
            let mut actions = RowActions::new()
                .on_edit(|row: &Row| edited.push(*row))
                .on_delete(|row: &Row| deleted.push(row.0));
            assert!(actions.dispatch(RowAction::Edit, &(1, "tea")));
            assert!(actions.dispatch(RowAction::Delete, &(2, "dates")));
        }
        assert_eq!(edited, vec![(1, "tea")]);
        assert_eq!(deleted, vec![2]);
    }

    #[test]
    fn test_missing_handler_is_reported() {
        let mut count = 0;
        {
            let mut actions = RowActions::new().on_edit(|_: &u8| count += 1);
            assert!(!actions.is_empty());
            assert!(!actions.supports(RowAction::Delete));
            assert!(!actions.dispatch(RowAction::Delete, &0));
        }
        assert_eq!(count, 0);
        assert!(RowActions::<u8>::new().is_empty());
    }
}
