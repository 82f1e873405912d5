//! Catalog table handlers: JSON views, value pickers, and the HTML page.

use askama::Template;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use serde::Serialize;
use souq_core::Locale;
use souq_core::table::{
    CellValue, PageRequest, RenderOptions, RenderedTable, RowField, SortDirection, TableEngine,
    unique_values,
};
use tracing::instrument;

use crate::catalog::{AdminResource, Catalog, Resource, for_resource};
use crate::components::TableChrome;
use crate::config::{AdminConfig, MAX_PAGE_SIZE};
use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::state::AppState;

const FILTER_PREFIX: &str = "filter.";
const PICK_PREFIX: &str = "pick.";

// =============================================================================
// Query
// =============================================================================

/// Table state carried in a request's query string.
///
/// ```text
/// ?search=dates&sort=price&dir=desc&filter.category=dat&pick.status=active&page=2&per_page=10&locale=ar
/// ```
///
/// `filter.<key>` is a substring filter, `pick.<key>` an exact value picked
/// from the column's value list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub search: String,
    pub sort: Option<(String, SortDirection)>,
    pub filters: Vec<(String, String)>,
    pub picks: Vec<(String, String)>,
    pub page: usize,
    pub per_page: usize,
    pub locale: Locale,
}

impl TableQuery {
    /// Parse query pairs, filling gaps from `config`. Unknown parameters are
    /// ignored; malformed known ones are rejected.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an invalid `dir`, `page`,
    /// `per_page`, or `locale`.
    pub fn from_params(params: &[(String, String)], config: &AdminConfig) -> Result<Self, AppError> {
        let mut query = Self {
            search: String::new(),
            sort: None,
            filters: Vec::new(),
            picks: Vec::new(),
            page: 1,
            per_page: config.page_size,
            locale: config.default_locale,
        };
        let mut sort_key = None;
        let mut direction = SortDirection::Ascending;

        for (name, value) in params {
            match name.as_str() {
                "search" => query.search.clone_from(value),
                "sort" if !value.is_empty() => sort_key = Some(value.clone()),
                "dir" => direction = value.parse().map_err(AppError::BadRequest)?,
                "page" => query.page = parse_number("page", value)?,
                "per_page" => {
                    query.per_page = parse_number("per_page", value)?.clamp(1, MAX_PAGE_SIZE);
                }
                "locale" => {
                    query.locale = value
                        .parse()
                        .map_err(|e: souq_core::LocaleError| AppError::BadRequest(e.to_string()))?;
                }
                _ => {
                    if let Some(key) = name.strip_prefix(FILTER_PREFIX) {
                        query.filters.push((key.to_string(), value.clone()));
                    } else if let Some(key) = name.strip_prefix(PICK_PREFIX) {
                        query.picks.push((key.to_string(), value.clone()));
                    }
                }
            }
        }

        query.sort = sort_key.map(|key| (key, direction));
        Ok(query)
    }

    /// Query pairs reproducing this state.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.search.is_empty() {
            params.push(("search".to_string(), self.search.clone()));
        }
        if let Some((key, direction)) = &self.sort {
            params.push(("sort".to_string(), key.clone()));
            params.push(("dir".to_string(), direction.as_str().to_string()));
        }
        for (key, value) in &self.filters {
            params.push((format!("{FILTER_PREFIX}{key}"), value.clone()));
        }
        for (key, value) in &self.picks {
            params.push((format!("{PICK_PREFIX}{key}"), value.clone()));
        }
        if self.page > 1 {
            params.push(("page".to_string(), self.page.to_string()));
        }
        params.push(("per_page".to_string(), self.per_page.to_string()));
        params.push(("locale".to_string(), self.locale.tag().to_string()));
        params
    }

    /// URL query string (without the leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_params()
            .iter()
            .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Header sort click on `key`: ascending first, then flip.
    #[must_use]
    pub fn toggled_sort(&self, key: &str) -> Self {
        let direction = match &self.sort {
            Some((current, direction)) if current == key => direction.reversed(),
            _ => SortDirection::Ascending,
        };
        Self {
            sort: Some((key.to_string(), direction)),
            page: 1,
            ..self.clone()
        }
    }

    /// Same state without any filter on `key`.
    #[must_use]
    pub fn without_filter(&self, key: &str) -> Self {
        Self {
            filters: self.filters.iter().filter(|(k, _)| k != key).cloned().collect(),
            picks: self.picks.iter().filter(|(k, _)| k != key).cloned().collect(),
            page: 1,
            ..self.clone()
        }
    }

    /// Same state with `key` narrowed to exactly `value`.
    #[must_use]
    pub fn with_pick(&self, key: &str, value: &str) -> Self {
        let mut query = self.without_filter(key);
        query.picks.push((key.to_string(), value.to_string()));
        query
    }

    /// Same state without any column filter.
    #[must_use]
    pub fn without_filters(&self) -> Self {
        Self {
            filters: Vec::new(),
            picks: Vec::new(),
            page: 1,
            ..self.clone()
        }
    }

    /// Same state in input order.
    #[must_use]
    pub fn without_sort(&self) -> Self {
        Self {
            sort: None,
            ..self.clone()
        }
    }

    /// Same state on another page.
    #[must_use]
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Same state in another locale.
    #[must_use]
    pub fn with_locale(&self, locale: Locale) -> Self {
        Self {
            locale,
            ..self.clone()
        }
    }
}

fn parse_number(name: &str, value: &str) -> Result<usize, AppError> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{name} must be a positive number")))
}

// =============================================================================
// Table derivation
// =============================================================================

/// A rendered table plus what a client needs to draw around it.
#[derive(Debug, Clone, Serialize)]
pub struct TablePayload {
    pub resource: Resource,
    pub title: String,
    #[serde(flatten)]
    pub chrome: TableChrome,
    pub table: RenderedTable,
    /// Catalog id of each rendered row, aligned with `table.rows`.
    pub row_ids: Vec<i32>,
}

fn field_for<F: RowField>(key: &str) -> Result<F, AppError> {
    F::from_key(key).ok_or_else(|| AppError::BadRequest(format!("unknown column: {key}")))
}

/// Apply the query's search, filters, and sort to a fresh engine over `R`'s columns.
fn build_engine<R: AdminResource>(query: &TableQuery) -> Result<TableEngine<R::Field>, AppError> {
    let mut engine = TableEngine::new(R::table_config().columns);
    engine.set_search(query.search.as_str());
    for (key, value) in &query.filters {
        engine.apply_filter(field_for(key)?, value.as_str());
    }
    for (key, value) in &query.picks {
        engine.pick_value(field_for(key)?, &CellValue::from(value.as_str()));
    }
    if let Some((key, direction)) = &query.sort {
        engine.set_sort(field_for(key)?, *direction);
    }
    Ok(engine)
}

fn render_table<R: AdminResource>(
    catalog: &Catalog,
    query: &TableQuery,
) -> Result<TablePayload, AppError> {
    let config = R::table_config();
    let engine = build_engine::<R>(query)?;
    let rows = catalog.rows::<R>();

    let table = engine.render(
        rows,
        &RenderOptions {
            locale: query.locale,
            page: Some(PageRequest {
                number: query.page,
                per_page: query.per_page,
            }),
            show_actions: !config.actions.is_empty(),
        },
    );
    let row_ids = table
        .rows
        .iter()
        .filter_map(|row| rows.get(row.index))
        .map(R::id)
        .collect();

    Ok(TablePayload {
        resource: R::RESOURCE,
        title: R::RESOURCE.title().get(query.locale).to_string(),
        chrome: config.chrome(query.locale),
        table,
        row_ids,
    })
}

fn column_values<R: AdminResource>(catalog: &Catalog, key: &str) -> Result<Vec<CellValue>, AppError> {
    let field = field_for::<R::Field>(key)?;
    Ok(unique_values(catalog.rows::<R>(), &field))
}

/// Value-picker entries of every column, keyed by column.
fn popup_values<R: AdminResource>(catalog: &Catalog) -> Vec<(String, Vec<CellValue>)> {
    let rows = catalog.rows::<R>();
    R::table_config()
        .columns
        .iter()
        .map(|column| (column.field.key().to_string(), unique_values(rows, &column.field)))
        .collect()
}

// =============================================================================
// JSON handlers
// =============================================================================

/// Distinct values of one column, for the filter popup's value picker.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnValues {
    pub resource: Resource,
    pub key: String,
    pub values: Vec<CellValue>,
}

/// Rendered table view.
///
/// GET /api/tables/{resource}
#[instrument(skip_all, fields(resource = %resource))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<TablePayload>, AppError> {
    let resource: Resource = resource.parse()?;
    let query = TableQuery::from_params(&params, state.config())?;

    let catalog = state.catalog().read().await;
    let payload = for_resource!(resource, render_table(&catalog, &query))?;

    tracing::debug!(
        %resource,
        admin = %admin.username,
        matched = payload.table.matched_rows,
        "rendered table"
    );
    Ok(Json(payload))
}

/// Distinct values of a column.
///
/// GET /api/tables/{resource}/values/{key}
#[instrument(skip_all, fields(resource = %resource))]
pub async fn values(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path((resource, key)): Path<(String, String)>,
) -> Result<Json<ColumnValues>, AppError> {
    let resource: Resource = resource.parse()?;

    let catalog = state.catalog().read().await;
    let values = for_resource!(resource, column_values(&catalog, &key))?;

    Ok(Json(ColumnValues {
        resource,
        key,
        values,
    }))
}

// =============================================================================
// HTML page
// =============================================================================

/// Navigation entry.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub active: bool,
}

/// Header cell of the HTML table.
#[derive(Debug, Clone)]
pub struct PageColumn {
    pub key: String,
    pub label: String,
    pub align: &'static str,
    pub sort_arrow: &'static str,
    pub sort_href: String,
    pub filter_value: String,
    pub filtered: bool,
    pub clear_href: String,
    /// State the filter popup's form carries besides its own input.
    pub popup_params: Vec<HiddenParam>,
    /// The column's distinct values, each narrowing the table to itself.
    pub pick_links: Vec<PickLink>,
}

/// Entry of a filter popup's value picker.
#[derive(Debug, Clone)]
pub struct PickLink {
    pub label: String,
    pub href: String,
    pub picked: bool,
}

/// Body cell of the HTML table.
#[derive(Debug, Clone)]
pub struct PageCell {
    pub text: String,
    pub align: &'static str,
}

/// Body row of the HTML table.
#[derive(Debug, Clone)]
pub struct PageRow {
    pub id: i32,
    pub cells: Vec<PageCell>,
}

/// Query parameter re-sent by the search form.
#[derive(Debug, Clone)]
pub struct HiddenParam {
    pub name: String,
    pub value: String,
}

/// Table page template.
#[derive(Template)]
#[template(path = "tables/index.html")]
pub struct TablePageTemplate {
    pub admin: CurrentAdmin,
    pub can_delete: bool,
    pub locale: &'static str,
    pub direction: &'static str,
    pub resource: &'static str,
    pub title: String,
    pub nav: Vec<NavLink>,
    pub chrome: TableChrome,
    pub search: String,
    pub hidden_params: Vec<HiddenParam>,
    pub columns: Vec<PageColumn>,
    pub rows: Vec<PageRow>,
    pub has_actions: bool,
    pub colspan: usize,
    pub summary: String,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub switch_locale_href: String,
    pub labels: PageLabels,
    /// Set while the table is sorted.
    pub clear_sort_href: Option<String>,
    /// Set while any column is filtered.
    pub clear_filters_href: Option<String>,
}

fn href(resource: Resource, query: &TableQuery) -> String {
    format!("/tables/{resource}?{}", query.to_query_string())
}

fn hidden(query: &TableQuery, skip: &[&str]) -> Vec<HiddenParam> {
    query
        .to_params()
        .into_iter()
        .filter(|(name, _)| !skip.contains(&name.as_str()))
        .map(|(name, value)| HiddenParam { name, value })
        .collect()
}

/// Fixed page text in one locale.
#[derive(Debug, Clone, Copy)]
pub struct PageLabels {
    summary: &'static str,
    pub switch_locale: &'static str,
    pub clear_sort: &'static str,
    pub clear_filters: &'static str,
}

impl PageLabels {
    const fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                summary: "{matched} of {total} rows",
                switch_locale: "العربية",
                clear_sort: "Clear sort",
                clear_filters: "Clear filters",
            },
            Locale::Ar => Self {
                summary: "{matched} من {total} صف",
                switch_locale: "English",
                clear_sort: "إلغاء الترتيب",
                clear_filters: "مسح عوامل التصفية",
            },
        }
    }
}

impl TablePageTemplate {
    fn build(
        admin: CurrentAdmin,
        query: &TableQuery,
        payload: TablePayload,
        values: &[(String, Vec<CellValue>)],
    ) -> Self {
        let resource = payload.resource;
        let locale = query.locale;
        let table = payload.table;

        let nav = Resource::ALL
            .iter()
            .map(|r| NavLink {
                href: href(*r, &TableQuery {
                    search: String::new(),
                    sort: None,
                    filters: Vec::new(),
                    picks: Vec::new(),
                    page: 1,
                    ..query.clone()
                }),
                label: r.title().get(locale).to_string(),
                active: *r == resource,
            })
            .collect();

        let columns = table
            .columns
            .iter()
            .map(|column| PageColumn {
                key: column.key.clone(),
                label: column.label.clone(),
                align: column.align.as_css(),
                sort_arrow: column.sort.map_or("", |direction| direction.arrow()),
                sort_href: href(resource, &query.toggled_sort(&column.key)),
                filter_value: column
                    .filter
                    .as_ref()
                    .map(|filter| filter.value.clone())
                    .unwrap_or_default(),
                filtered: column.filter.is_some(),
                clear_href: href(resource, &query.without_filter(&column.key)),
                popup_params: hidden(&query.without_filter(&column.key), &["page"]),
                pick_links: values
                    .iter()
                    .find(|(key, _)| *key == column.key)
                    .map(|(_, values)| {
                        values
                            .iter()
                            .map(|value| {
                                let label = value.display_string();
                                PickLink {
                                    href: href(resource, &query.with_pick(&column.key, &label)),
                                    picked: query
                                        .picks
                                        .iter()
                                        .any(|(k, v)| *k == column.key && v.eq_ignore_ascii_case(&label)),
                                    label,
                                }
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();

        let rows: Vec<PageRow> = table
            .rows
            .into_iter()
            .zip(payload.row_ids)
            .map(|(row, id)| PageRow {
                id,
                cells: row
                    .cells
                    .into_iter()
                    .map(|cell| PageCell {
                        text: cell.text,
                        align: cell.align.as_css(),
                    })
                    .collect(),
            })
            .collect();

        let hidden_params = hidden(query, &["search", "page"]);

        let labels = PageLabels::for_locale(locale);
        let summary = labels
            .summary
            .replace("{matched}", &table.matched_rows.to_string())
            .replace("{total}", &table.total_rows.to_string());

        let (prev_href, next_href) = match table.page {
            Some(page) => (
                (page.number > 1).then(|| href(resource, &query.with_page(page.number - 1))),
                (page.number < page.total_pages)
                    .then(|| href(resource, &query.with_page(page.number + 1))),
            ),
            None => (None, None),
        };

        let other_locale = match locale {
            Locale::En => Locale::Ar,
            Locale::Ar => Locale::En,
        };

        Self {
            can_delete: admin.role.can_delete(),
            admin,
            locale: locale.tag(),
            direction: table.direction,
            resource: resource.as_str(),
            title: payload.title,
            nav,
            chrome: payload.chrome,
            search: query.search.clone(),
            hidden_params,
            colspan: table.columns.len() + usize::from(table.has_actions),
            columns,
            rows,
            has_actions: table.has_actions,
            summary,
            prev_href,
            next_href,
            switch_locale_href: href(resource, &query.with_locale(other_locale)),
            labels,
            clear_sort_href: query
                .sort
                .is_some()
                .then(|| href(resource, &query.without_sort())),
            clear_filters_href: (!query.filters.is_empty() || !query.picks.is_empty())
                .then(|| href(resource, &query.without_filters())),
        }
    }
}

/// Server-rendered table page.
///
/// GET /tables/{resource}
#[instrument(skip_all, fields(resource = %resource))]
pub async fn page(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let resource: Resource = resource.parse()?;
    let query = TableQuery::from_params(&params, state.config())?;

    let (payload, values) = {
        let catalog = state.catalog().read().await;
        (
            for_resource!(resource, render_table(&catalog, &query))?,
            for_resource!(resource, popup_values(&catalog)),
        )
    };

    let template = TablePageTemplate::build(admin, &query, payload, &values);
    Ok(Html(template.render()?))
}
