//! Axum route handlers for session persistence.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::store::SavedSession;
use crate::state::AppState;

/// GET /api/v1/session/:id
///
/// Returns the saved blob, or `null` when there is nothing to restore
/// (missing, expired, or unreadable).
pub async fn handle_load_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Option<SavedSession>>, AppError> {
    let session = state.store.load(session_id).await?;
    Ok(Json(session))
}

/// PUT /api/v1/session/:id
///
/// Saves the client's working state. The save timestamp is always assigned
/// server-side.
pub async fn handle_save_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(mut session): Json<SavedSession>,
) -> Result<Json<SavedSession>, AppError> {
    session.last_saved = Utc::now();
    state.store.save(session_id, &session).await?;
    Ok(Json(session))
}

/// DELETE /api/v1/session/:id
pub async fn handle_clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.clear(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
