//! Admin guard for the order form.
//!
//! The admin client sends a bcrypt hash of the shared admin password in the
//! `Authorization` header; the request passes when the configured password
//! verifies against it.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::server::AppState;

pub const CODE_MISSING: u16 = 1001;
pub const CODE_MISMATCH: u16 = 1002;
pub const CODE_UNVERIFIABLE: u16 = 1003;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    Missing,
    Mismatch,
    Unverifiable,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = match self {
            AuthError::Missing => json!({"success": false, "code": CODE_MISSING}),
            AuthError::Mismatch => json!({"success": false, "code": CODE_MISMATCH}),
            AuthError::Unverifiable => json!({"success": false, "error": CODE_UNVERIFIABLE}),
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Checks `password` against the bcrypt `hash` off the async executor.
pub async fn check_password(password: String, hash: String) -> Result<(), AuthError> {
    let verdict = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            log::error!("bcrypt task failed: {}", e);
            AuthError::Unverifiable
        })?;

    match verdict {
        Ok(true) => Ok(()),
        Ok(false) => Err(AuthError::Mismatch),
        Err(e) => {
            log::warn!("Authorization header is not a usable bcrypt hash: {}", e);
            Err(AuthError::Unverifiable)
        }
    }
}

/// Middleware rejecting requests without a valid admin hash.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(hash) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
    else {
        return AuthError::Missing.into_response();
    };

    match check_password(state.admin_password.to_string(), hash).await {
        Ok(()) => next.run(request).await,
        Err(e) => {
            log::warn!("Rejected admin request to {}: {:?}", request.uri().path(), e);
            e.into_response()
        }
    }
}
