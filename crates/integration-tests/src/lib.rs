//! Integration tests for Souq.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p souq-integration-tests
//! ```
//!
//! The admin router runs in-process against the sample catalog, wrapped in
//! the same Sentry layers as the binary. Requests go through [`TestApp`] with
//! `tower::ServiceExt::oneshot`, so no port is bound.
//!
//! # Test Categories
//!
//! - `admin_tables` - Auth, table views, value pickers, and row actions

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use souq_admin::catalog::Catalog;
use souq_admin::config::{AdminAccount, AdminConfig};
use souq_admin::middleware::SESSION_COOKIE_NAME;
use souq_admin::routes;
use souq_admin::state::AppState;
use souq_core::AdminRole;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "aB3$xY9!mK2@nL5#";
pub const VIEWER_USERNAME: &str = "viewer";
pub const VIEWER_PASSWORD: &str = "Vw7%qR4^tZ1&pS8*";

/// The admin app wired to the sample catalog, with one admin and one viewer.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Body parsed as JSON.
    ///
    /// # Panics
    ///
    /// If the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    /// Body as UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The `name=value` pair of the session cookie, if one was set.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
            .map(str::to_string)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// # Panics
    ///
    /// If the bundled sample catalog fails to load.
    #[must_use]
    pub fn new() -> Self {
        let config = AdminConfig::new(AdminAccount::new(
            ADMIN_USERNAME,
            ADMIN_PASSWORD,
            AdminRole::SuperAdmin,
        ))
        .with_account(AdminAccount::new(
            VIEWER_USERNAME,
            VIEWER_PASSWORD,
            AdminRole::Viewer,
        ));
        let catalog = Catalog::sample().expect("sample catalog loads");

        let app = routes::app(AppState::new(config, catalog));
        Self {
            router: routes::with_error_tracking(app),
        }
    }

    /// Send one request.
    ///
    /// # Panics
    ///
    /// If the request cannot be built or the body cannot be read.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<(&'static str, String)>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some((content_type, body)) => builder
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX).await.expect("readable body");

        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    /// GET with an optional session cookie.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, cookie, None).await
    }

    /// DELETE with an optional session cookie.
    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, cookie, None).await
    }

    /// POST a JSON body.
    pub async fn post_json(&self, uri: &str, cookie: Option<&str>, body: &Value) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            cookie,
            Some(("application/json", body.to_string())),
        )
        .await
    }

    /// Sign in through the JSON API and return the session cookie.
    ///
    /// # Panics
    ///
    /// If the login fails.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/api/auth/login",
                None,
                &serde_json::json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login as {username} failed");
        response.session_cookie().expect("login sets a session cookie")
    }

    /// Cookie of a signed-in super admin.
    pub async fn login_admin(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Cookie of a signed-in viewer.
    pub async fn login_viewer(&self) -> String {
        self.login(VIEWER_USERNAME, VIEWER_PASSWORD).await
    }
}
