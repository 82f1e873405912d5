//! Session extractors for the Souq admin.
//!
//! A signed-in session holds the [`CurrentAdmin`] built from one of the
//! configured accounts. Handlers ask for it through an extractor:
//!
//! - [`RequireAdminAuth`] accepts any account, viewers included. Tables,
//!   value pickers, and the edit view use it.
//! - [`RequireDeleteRole`] also requires a role that may delete rows.
//!
//! Without a session, JSON callers under `/api/` get a bare 401 while pages
//! are sent to `/login`.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use souq_core::AdminRole;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::{CurrentAdmin, session_keys};

const LOGIN_PAGE: &str = "/login";

/// Any signed-in account.
///
/// ```rust,ignore
/// async fn orders(RequireAdminAuth(admin): RequireAdminAuth) -> String {
///     format!("{} ({}) is browsing orders", admin.username, admin.role)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// A signed-in account whose role may delete catalog rows.
///
/// Viewers are refused with 403 on every path, since only the JSON API
/// deletes.
pub struct RequireDeleteRole(pub CurrentAdmin);

/// Why a request was turned away.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// No session on a page request.
    RedirectToLogin,
    /// No session on an `/api/` request.
    Unauthorized,
    /// Signed in, but the role lacks the permission.
    Forbidden(AdminRole),
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PAGE).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden(role) => {
                AppError::Forbidden(format!("{role} may not delete rows")).into_response()
            }
        }
    }
}

fn is_api_request(parts: &Parts) -> bool {
    parts.uri.path().starts_with("/api/")
}

/// The session's admin, or the rejection fitting the request.
async fn signed_in(parts: &Parts) -> Result<CurrentAdmin, AdminAuthRejection> {
    let missing = || {
        if is_api_request(parts) {
            AdminAuthRejection::Unauthorized
        } else {
            AdminAuthRejection::RedirectToLogin
        }
    };

    // set by SessionManagerLayer
    let session = parts.extensions.get::<Session>().ok_or_else(missing)?;

    session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
        .ok_or_else(missing)
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        signed_in(parts).await.map(Self)
    }
}

impl<S> FromRequestParts<S> for RequireDeleteRole
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = signed_in(parts).await?;
        if !admin.role.can_delete() {
            tracing::warn!(username = %admin.username, role = %admin.role, "Delete refused");
            return Err(AdminAuthRejection::Forbidden(admin.role));
        }
        Ok(Self(admin))
    }
}

/// Store `admin` in the session after a successful sign-in.
///
/// Cycles the session id first so a pre-login session id cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Drop the signed-in admin from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::{Request, header};

    fn parts(uri: &str) -> Parts {
        Request::builder().uri(uri).body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_missing_session_depends_on_path() {
        let mut api = parts("/api/tables/products");
        let rejection = RequireAdminAuth::from_request_parts(&mut api, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(rejection, AdminAuthRejection::Unauthorized));

        let mut page = parts("/tables/products");
        let rejection = RequireDeleteRole::from_request_parts(&mut page, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(rejection, AdminAuthRejection::RedirectToLogin));
    }

    #[test]
    fn test_rejection_responses() {
        let redirect = AdminAuthRejection::RedirectToLogin.into_response();
        assert_eq!(redirect.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect.headers().get(header::LOCATION).unwrap(), LOGIN_PAGE);

        assert_eq!(
            AdminAuthRejection::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AdminAuthRejection::Forbidden(AdminRole::Viewer)
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
    }
}
