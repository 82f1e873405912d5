//! Row action handlers: edit (fetch a row for its form) and delete.
//!
//! Both go through the table's [`RowActions`], so a resource only offers the
//! actions its table configuration lists.

use std::cell::Cell;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use souq_core::table::{RowAction, RowActions};
use tracing::instrument;

use crate::catalog::{AdminResource, Catalog, Resource, for_resource};
use crate::error::AppError;
use crate::middleware::{RequireAdminAuth, RequireDeleteRole};
use crate::state::AppState;

/// Run `action` on the row with `id` and return the row its handler received.
fn dispatch<R: AdminResource>(catalog: &Catalog, action: RowAction, id: i32) -> Result<R, AppError> {
    let offered = R::table_config().actions;
    let row = catalog.find::<R>(id)?;

    let received = Cell::new(None);
    let handled = {
        let mut actions = RowActions::new();
        if offered.contains(&RowAction::Edit) {
            actions = actions.on_edit(|row: &R| received.set(Some(row.clone())));
        }
        if offered.contains(&RowAction::Delete) {
            actions = actions.on_delete(|row: &R| received.set(Some(row.clone())));
        }
        actions.dispatch(action, row)
    };

    match received.into_inner() {
        Some(row) if handled => Ok(row),
        _ => Err(AppError::BadRequest(format!(
            "{} does not support {action:?}",
            R::RESOURCE
        ))),
    }
}

fn edit_row<R: AdminResource>(catalog: &Catalog, id: i32) -> Result<serde_json::Value, AppError> {
    let row = dispatch::<R>(catalog, RowAction::Edit, id)?;
    serde_json::to_value(&row).map_err(|e| AppError::Internal(e.to_string()))
}

fn delete_row<R: AdminResource>(catalog: &mut Catalog, id: i32) -> Result<(), AppError> {
    let row = dispatch::<R>(catalog, RowAction::Delete, id)?;
    catalog.remove::<R>(row.id())?;
    Ok(())
}

/// A row, as the edit form loads it.
///
/// GET /api/{resource}/{id}
#[instrument(skip_all, fields(resource = %resource))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, i32)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let resource: Resource = resource.parse()?;
    let catalog = state.catalog().read().await;
    let row = for_resource!(resource, edit_row(&catalog, id))?;
    Ok(Json(row))
}

/// Remove a row. Viewers are refused.
///
/// DELETE /api/{resource}/{id}
#[instrument(skip_all, fields(resource = %resource))]
pub async fn delete(
    RequireDeleteRole(admin): RequireDeleteRole,
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, i32)>,
) -> Result<StatusCode, AppError> {
    let resource: Resource = resource.parse()?;

    let mut catalog = state.catalog().write().await;
    for_resource!(resource, delete_row(&mut catalog, id))?;

    tracing::info!(%resource, id, admin = %admin.username, "Row deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{Order, Product};

    #[test]
    fn test_edit_returns_full_row() {
        let catalog = Catalog::sample().unwrap();
        let row = edit_row::<Product>(&catalog, 4).unwrap();
        assert_eq!(row["sku"], "SP-CAR-100");
        assert_eq!(row["name"]["ar"], "حبّ الهال");
    }

    #[test]
    fn test_delete_removes_only_that_row() {
        let mut catalog = Catalog::sample().unwrap();
        delete_row::<Order>(&mut catalog, 2).unwrap();
        let ids: Vec<i32> = catalog.rows::<Order>().iter().map(|o| o.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_missing_row_is_not_found() {
        let mut catalog = Catalog::sample().unwrap();
        let err = delete_row::<Product>(&mut catalog, 99).unwrap_err();
        assert!(matches!(err, AppError::Catalog(ref e) if e.is_not_found()));
    }
}
