use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::orders::{search_grouped, write_submission, FormSubmission};
use crate::telegram::WebhookUpdate;

use super::server::AppState;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(json!({"success": false, "message": message}))).into_response()
    }
}

/// GET /health
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// GET /api/search/:account
pub async fn search_handler(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let groups = search_grouped(state.store.as_ref(), &state.sheet_title, &account)
        .await
        .map_err(|e| {
            log::error!("Search for '{}' failed: {}", account, e);
            ApiError::Internal("Failed to read orders".to_string())
        })?;

    Ok(Json(json!({"success": true, "data": groups})))
}

/// POST /api/form-admin
pub async fn form_admin_handler(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, ApiError> {
    let submission = parse_form(&body)?;

    write_submission(
        state.store.as_ref(),
        &state.sheet_title,
        &submission,
        chrono::Utc::now(),
    )
    .await
    .map_err(|e| {
        log::error!("Appending form for '{}' failed: {}", submission.account, e);
        ApiError::Internal("Failed to save order".to_string())
    })?;

    Ok(Json(json!({"success": true})))
}

/// POST /webhook. Always acknowledges.
pub async fn webhook_handler(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    match serde_json::from_slice::<WebhookUpdate>(&body) {
        Ok(update) => {
            let report = state.slip_checker.handle(&update).await;
            log::debug!("Webhook update {} finished: {:?}", update.update_id, report);
        }
        Err(e) => log::warn!("Ignoring unreadable webhook payload: {}", e),
    }

    Json(json!({"status": "ok"}))
}

fn parse_form(body: &[u8]) -> Result<FormSubmission, ApiError> {
    let invalid = || ApiError::BadRequest("Invalid form data".to_string());

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(invalid());
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| {
        log::warn!("Form body is not JSON: {}", e);
        invalid()
    })?;
    if !value.is_object() {
        return Err(invalid());
    }

    serde_json::from_value(value).map_err(|e| {
        log::warn!("Form body has unexpected shape: {}", e);
        invalid()
    })
}
