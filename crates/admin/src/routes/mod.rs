//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                              - Health check
//! GET    /                                    - Redirect to the products table
//!
//! # Auth (accounts from configuration)
//! GET    /login                               - Login page
//! POST   /login                               - Login form
//! POST   /logout                              - Logout
//! POST   /api/auth/login                      - JSON login
//! POST   /api/auth/logout                     - JSON logout
//!
//! # Tables
//! GET    /tables/{resource}                   - Table page
//! GET    /api/tables/{resource}               - Rendered table (search, filters, sort, paging)
//! GET    /api/tables/{resource}/values/{key}  - Distinct values of a column
//!
//! # Row actions
//! GET    /api/{resource}/{id}                 - Edit: load a row
//! DELETE /api/{resource}/{id}                 - Delete a row (not for viewers)
//! ```

pub mod auth;
pub mod resources;
pub mod tables;

use axum::{
    Router,
    http::{HeaderValue, header},
    response::Redirect,
    routing::{get, post},
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::api_login))
        .route("/auth/logout", post(auth::api_logout))
        .route("/tables/{resource}", get(tables::show))
        .route("/tables/{resource}/values/{key}", get(tables::values))
        .route(
            "/{resource}/{id}",
            get(resources::show).delete(resources::delete),
        )
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/", get(|| async { Redirect::to("/tables/products") }))
        .merge(auth_routes())
        .route("/tables/{resource}", get(tables::page))
        .nest("/api", api_routes())
}

/// The complete application: routes, sessions, security headers, and
/// request tracing.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    routes()
        .layer(session_layer)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Wrap `app` in the Sentry layers: a hub per request and an HTTP
/// transaction. They sit outermost so every request is covered.
pub fn with_error_tracking(app: Router) -> Router {
    app.layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
