//! Authentication route handlers for admin.
//!
//! Accounts come from configuration. The login page posts a form and
//! redirects; the JSON endpoints serve scripted clients.

use askama::Template;
use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use souq_core::{AdminRole, AdminUserId};
use tower_sessions::Session;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

const LANDING_PAGE: &str = "/tables/products";

// =============================================================================
// Request Types
// =============================================================================

/// Login credentials, as a form or JSON body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Query parameters of the login page.
#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub error: Option<String>,
}

/// Signed-in admin, returned by the JSON login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub role: AdminRole,
}

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate {
    pub error: Option<&'static str>,
}

// =============================================================================
// Shared
// =============================================================================

/// Check credentials and store the admin in the session.
async fn sign_in(
    state: &AppState,
    session: &Session,
    request: &LoginRequest,
) -> Result<CurrentAdmin, AppError> {
    let Some((index, account)) = state
        .config()
        .authenticate(&request.username, &request.password)
    else {
        tracing::warn!(username = %request.username, "Admin login failed");
        return Err(AppError::Unauthorized(
            "invalid username or password".to_string(),
        ));
    };

    let id = i32::try_from(index + 1)
        .map_err(|_| AppError::Internal("too many admin accounts".to_string()))?;
    let admin = CurrentAdmin {
        id: AdminUserId::new(id),
        username: account.username.clone(),
        role: account.role,
    };

    set_current_admin(session, &admin).await?;
    set_sentry_user(id, &admin.username);
    tracing::info!(username = %admin.username, role = %admin.role, "Admin signed in");

    Ok(admin)
}

async fn sign_out(session: &Session) -> Result<(), AppError> {
    clear_current_admin(session).await?;
    clear_sentry_user();
    Ok(())
}

// =============================================================================
// HTML
// =============================================================================

/// Render the login page.
///
/// GET /login
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Result<Html<String>, AppError> {
    let error = query.error.map(|code| match code.as_str() {
        "credentials" => "Invalid username or password.",
        _ => "Sign-in failed. Please try again.",
    });
    Ok(Html(LoginPageTemplate { error }.render()?))
}

/// Handle the login form.
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginRequest>,
) -> Response {
    match sign_in(&state, &session, &form).await {
        Ok(_) => Redirect::to(LANDING_PAGE).into_response(),
        Err(AppError::Unauthorized(_)) => {
            Redirect::to("/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to set session: {}", e);
            Redirect::to("/login?error=session").into_response()
        }
    }
}

/// Logout and clear session.
///
/// POST /logout
pub async fn logout(session: Session) -> Response {
    if let Err(e) = sign_out(&session).await {
        tracing::warn!("Failed to clear session: {}", e);
    }
    Redirect::to("/login").into_response()
}

// =============================================================================
// JSON
// =============================================================================

/// Sign in and receive a session cookie.
///
/// POST /api/auth/login
pub async fn api_login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let admin = sign_in(&state, &session, &request).await?;
    Ok(Json(LoginResponse {
        username: admin.username,
        role: admin.role,
    }))
}

/// End the session.
///
/// POST /api/auth/logout
pub async fn api_logout(session: Session) -> Result<StatusCode, AppError> {
    sign_out(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_shows_error() {
        let html = LoginPageTemplate {
            error: Some("Invalid username or password."),
        }
        .render()
        .unwrap();
        assert!(html.contains("Invalid username or password."));
        assert!(html.contains(r#"action="/login""#));
    }

    #[test]
    fn test_login_page_without_error() {
        let html = LoginPageTemplate { error: None }.render().unwrap();
        assert!(!html.contains(r#"class="error""#));
    }
}
