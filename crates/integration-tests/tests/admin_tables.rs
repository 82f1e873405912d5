//! Integration tests for the admin table API.
//!
//! These drive the full router (sessions, auth extractor, handlers, table
//! engine) against the sample catalog.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode, header};
use serde_json::{Value, json};
use souq_integration_tests::TestApp;

fn row_ids(body: &Value) -> Vec<i64> {
    body["row_ids"]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default()
}

// =============================================================================
// Health & Auth
// =============================================================================

#[tokio::test]
async fn test_health_needs_no_session() {
    let app = TestApp::new();
    let response = app.get("/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "ok");
    assert_eq!(
        response.headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );
}

#[tokio::test]
async fn test_api_requires_session() {
    let app = TestApp::new();
    let response = app.get("/api/tables/products", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_pages_redirect_to_login() {
    let app = TestApp::new();

    let response = app.get("/tables/products", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.headers.get(header::LOCATION).unwrap(), "/login");

    let login = app.get("/login", None).await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.text().contains(r#"name="password""#));
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let app = TestApp::new();
    let response = app
        .post_json(
            "/api/auth/login",
            None,
            &json!({ "username": "admin", "password": "not-the-password" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn test_login_form_redirects_to_tables() {
    let app = TestApp::new();
    // ADMIN_PASSWORD, form-encoded
    let body = "username=admin&password=aB3%24xY9%21mK2%40nL5%23".to_string();
    let response = app
        .send(
            Method::POST,
            "/login",
            None,
            Some(("application/x-www-form-urlencoded", body)),
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers.get(header::LOCATION).unwrap(),
        "/tables/products"
    );
    assert!(response.session_cookie().is_some());

    let failed = app
        .send(
            Method::POST,
            "/login",
            None,
            Some(("application/x-www-form-urlencoded", "username=admin&password=x".to_string())),
        )
        .await;
    assert_eq!(
        failed.headers.get(header::LOCATION).unwrap(),
        "/login?error=credentials"
    );
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;
    assert_eq!(
        app.get("/api/tables/products", Some(&cookie)).await.status,
        StatusCode::OK
    );

    let response = app
        .send(Method::POST, "/api/auth/logout", Some(&cookie), None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(
        app.get("/api/tables/products", Some(&cookie)).await.status,
        StatusCode::UNAUTHORIZED
    );
}

// =============================================================================
// Tables
// =============================================================================

#[tokio::test]
async fn test_table_default_view() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let body = app.get("/api/tables/products", Some(&cookie)).await.json();
    assert_eq!(body["resource"], "products");
    assert_eq!(body["title"], "Products");
    assert_eq!(body["table"]["direction"], "ltr");
    assert_eq!(body["table"]["total_rows"], 6);
    assert_eq!(row_ids(&body), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(body["actions"], json!(["edit", "delete"]));
}

#[tokio::test]
async fn test_global_search_covers_every_column() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let body = app
        .get("/api/tables/products?search=DATES", Some(&cookie))
        .await
        .json();
    assert_eq!(row_ids(&body), vec![1, 2]);
    assert_eq!(body["table"]["search"], "DATES");

    let arabic = app
        .get("/api/tables/products?search=%D9%82%D9%87%D9%88%D8%A9", Some(&cookie))
        .await
        .json();
    assert_eq!(row_ids(&arabic), vec![3, 6]);
}

#[tokio::test]
async fn test_column_filters_combine() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let body = app
        .get(
            "/api/tables/products?filter.status=active&filter.name=coffee",
            Some(&cookie),
        )
        .await
        .json();
    // "inactive" contains "active"
    assert_eq!(row_ids(&body), vec![3, 6]);

    let status = body["table"]["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|column| column["key"] == "status")
        .unwrap();
    assert_eq!(status["filter"]["value"], "active");
    assert_eq!(status["filter"]["mode"], "contains");
}

#[tokio::test]
async fn test_picked_value_matches_exactly() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let body = app
        .get("/api/tables/products?pick.status=active", Some(&cookie))
        .await
        .json();
    assert_eq!(row_ids(&body), vec![1, 2, 4, 6]);
}

#[tokio::test]
async fn test_sort_numeric_both_directions() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let asc = app
        .get("/api/tables/orders?sort=total", Some(&cookie))
        .await
        .json();
    assert_eq!(row_ids(&asc), vec![4, 3, 1, 5, 2]);

    let desc = app
        .get("/api/tables/orders?sort=total&dir=desc", Some(&cookie))
        .await
        .json();
    assert_eq!(row_ids(&desc), vec![2, 5, 1, 3, 4]);

    let total = desc["table"]["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|column| column["key"] == "total")
        .unwrap();
    assert_eq!(total["sort"], "desc");
}

#[tokio::test]
async fn test_paging_and_arabic_locale() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let body = app
        .get(
            "/api/tables/products?sort=price&per_page=4&page=2&locale=ar",
            Some(&cookie),
        )
        .await
        .json();
    assert_eq!(row_ids(&body), vec![6, 5]);
    assert_eq!(body["table"]["matched_rows"], 6);
    assert_eq!(body["table"]["page"]["total_pages"], 2);
    assert_eq!(body["table"]["direction"], "rtl");
    assert_eq!(body["title"], "المنتجات");
    assert_eq!(body["table"]["columns"][0]["label"], "المنتج");
}

#[tokio::test]
async fn test_column_values() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let body = app
        .get("/api/tables/wholesalers/values/city", Some(&cookie))
        .await
        .json();
    assert_eq!(body["key"], "city");
    assert_eq!(body["values"], json!(["Riyadh", "Jeddah", "Dubai"]));
}

#[tokio::test]
async fn test_bad_requests() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    for uri in [
        "/api/tables/products?sort=colour",
        "/api/tables/products?filter.colour=red",
        "/api/tables/products?dir=sideways&sort=price",
        "/api/tables/products?locale=fr",
        "/api/tables/products/values/colour",
    ] {
        let response = app.get(uri, Some(&cookie)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
    }

    let response = app.get("/api/tables/coupons", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_table_page_renders() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let response = app
        .get("/tables/categories?locale=ar&search=%D8%B9%D8%B3%D9%84", Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains(r#"dir="rtl""#));
    assert!(html.contains("عسل"));
    assert!(html.contains("1 من 5 صف"));
    assert!(html.contains(r#"data-href="/api/categories/4""#));
    assert!(html.contains("pick.status=inactive"));
    assert!(!html.contains(r#"class="clear-sort""#));
    assert!(!html.contains(r#"class="clear-filters""#));
}

#[tokio::test]
async fn test_table_page_offers_reset_links() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let response = app
        .get(
            "/tables/categories?sort=name&dir=desc&pick.status=active",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("4 of 5 rows"));
    assert!(html.contains(r#"class="clear-sort""#));
    assert!(html.contains("Clear sort"));
    assert!(html.contains(r#"class="clear-filters""#));
    assert!(html.contains("Clear filters"));
    assert!(html.contains(r#"aria-current="true">active</a>"#));
}

// =============================================================================
// Row actions
// =============================================================================

#[tokio::test]
async fn test_edit_loads_full_row() {
    let app = TestApp::new();
    let cookie = app.login_viewer().await;

    let response = app.get("/api/orders/3", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    let order = response.json();
    assert_eq!(order["number"], "SQ-1003");
    assert_eq!(order["email"], "layla@example.ae");

    let missing = app.get("/api/orders/99", Some(&cookie)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_row_for_admins_only() {
    let app = TestApp::new();
    let viewer = app.login_viewer().await;
    let admin = app.login_admin().await;

    let refused = app.delete("/api/products/5", Some(&viewer)).await;
    assert_eq!(refused.status, StatusCode::FORBIDDEN);

    let deleted = app.delete("/api/products/5", Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let body = app.get("/api/tables/products", Some(&admin)).await.json();
    assert_eq!(row_ids(&body), vec![1, 2, 3, 4, 6]);
    assert_eq!(body["table"]["total_rows"], 5);

    let again = app.delete("/api/products/5", Some(&admin)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
