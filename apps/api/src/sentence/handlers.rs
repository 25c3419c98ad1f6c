//! Axum route handlers for the sentence editor.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::sentence::editor::{render_highlight, EditPhase, EditSession, Highlight};
use crate::sentence::rewrite::{rewrite_sentence, PhraseChange, RewriteMode};
use crate::sentence::{replace_sentence, span_is_valid, SentenceSpan};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LocateRequest {
    pub text: String,
    pub caret: usize,
}

/// POST /api/v1/sentence/locate
///
/// Finds the sentence enclosing the caret. A caret inside a run of
/// delimiters and whitespace yields a blank span.
pub async fn handle_locate(
    Json(request): Json<LocateRequest>,
) -> Result<Json<SentenceSpan>, AppError> {
    let mut session = EditSession::new(request.text);
    match session.select(request.caret) {
        Some(span) => Ok(Json(span.clone())),
        None => Err(AppError::NotFound(
            "No sentence at the given caret position".to_string(),
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub text: String,
    pub caret: usize,
    #[serde(default)]
    pub mode: RewriteMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveResponse {
    pub status: EditPhase,
    pub sentence: String,
    pub start: usize,
    pub end: usize,
    /// Text split around the selected sentence, for rendering the highlight.
    pub before: String,
    pub focus: String,
    pub after: String,
    pub suggestions: Vec<String>,
    pub changes: Vec<Vec<PhraseChange>>,
}

/// POST /api/v1/sentence/improve
///
/// Selects the sentence at the caret and requests three rewrites of it.
/// An LLM failure is reported as `suggestionsUnavailable` with an empty
/// suggestion list rather than an error, so the caller's selection survives.
pub async fn handle_improve(
    State(state): State<AppState>,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let mut session = EditSession::new(request.text);
    let span = session
        .select(request.caret)
        .cloned()
        .ok_or_else(|| AppError::NotFound("No sentence at the given caret position".to_string()))?;

    session.begin_rewrite().map_err(|e| AppError::Internal(e.into()))?;

    let (suggestions, changes) = match rewrite_sentence(&span.sentence, request.mode, &state.llm)
        .await
    {
        Ok(set) => {
            session
                .suggestions_ready()
                .map_err(|e| AppError::Internal(e.into()))?;
            (set.suggestions, set.changes)
        }
        Err(e) => {
            warn!("Sentence rewrite unavailable: {e}");
            session
                .suggestions_unavailable()
                .map_err(|e| AppError::Internal(e.into()))?;
            (Vec::new(), Vec::new())
        }
    };

    let view = render_highlight(
        session.text(),
        Highlight {
            start: span.start,
            end: span.end,
        },
    );
    Ok(Json(ImproveResponse {
        status: session.phase(),
        sentence: span.sentence.clone(),
        start: span.start,
        end: span.end,
        before: view.before.to_string(),
        focus: view.focus.to_string(),
        after: view.after.to_string(),
        suggestions,
        changes,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ReplaceRequest {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

#[derive(Debug, Serialize)]
pub struct ReplaceResponse {
    pub text: String,
}

/// POST /api/v1/sentence/replace
///
/// Splices the replacement over `[start, end)`. The span must come from a
/// prior locate against the same text; a stale or malformed span is rejected.
pub async fn handle_replace(
    Json(request): Json<ReplaceRequest>,
) -> Result<Json<ReplaceResponse>, AppError> {
    if !span_is_valid(&request.text, request.start, request.end) {
        return Err(AppError::Validation(format!(
            "Span [{}, {}) is not valid for the given text",
            request.start, request.end
        )));
    }

    let text = replace_sentence(&request.text, request.start, request.end, &request.replacement);
    Ok(Json(ReplaceResponse { text }))
}
