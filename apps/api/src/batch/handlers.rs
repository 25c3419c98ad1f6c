//! Axum route handlers for batch mode.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::batch::dispatch::{score_all, spawn_extraction, BatchState};
use crate::batch::document::BatchDocument;
use crate::coverage::aggregate::{SortKey, SortOrder};
use crate::coverage::criteria::{CriterionKey, ParsedJobDescription};
use crate::coverage::grid::{build_grid, GridLayout, ResultsGrid};
use crate::coverage::jd_parser::parse_job_description;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBatchRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// POST /api/v1/batch
pub async fn handle_create_batch(
    State(state): State<AppState>,
    Json(request): Json<CreateBatchRequest>,
) -> (StatusCode, Json<BatchSummary>) {
    let batch = BatchState::new(request.name.unwrap_or_else(|| "Untitled batch".to_string()));
    let summary = BatchSummary {
        id: batch.id,
        name: batch.name.clone(),
        created_at: batch.created_at,
    };
    state.batches.write().await.insert(batch.id, batch);
    (StatusCode::CREATED, Json(summary))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatusResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub documents: Vec<BatchDocument>,
    pub eligible_count: usize,
    pub has_job_description: bool,
    pub scoring_in_progress: bool,
}

/// GET /api/v1/batch/:id
pub async fn handle_batch_status(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> Result<Json<BatchStatusResponse>, AppError> {
    let batches = state.batches.read().await;
    let batch = batches
        .get(&batch_id)
        .ok_or_else(|| AppError::NotFound(format!("Batch {batch_id} not found")))?;

    let mut documents: Vec<BatchDocument> = batch.documents.values().cloned().collect();
    documents.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(BatchStatusResponse {
        id: batch.id,
        name: batch.name.clone(),
        created_at: batch.created_at,
        eligible_count: batch.eligible_documents().len(),
        has_job_description: batch.parsed.is_some(),
        scoring_in_progress: batch.scoring_in_progress,
        documents,
    }))
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub documents: Vec<BatchDocument>,
}

/// POST /api/v1/batch/:id/documents
///
/// Accepts one or more files as multipart fields. Documents register as
/// pending immediately; extraction runs in the background.
pub async fn handle_upload_documents(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut uploads: Vec<(String, Vec<u8>)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(|n| n.to_string()) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        uploads.push((file_name, data.to_vec()));
    }

    if uploads.is_empty() {
        return Err(AppError::Validation("No files in upload".to_string()));
    }

    let mut created = Vec::new();
    {
        let mut batches = state.batches.write().await;
        let batch = batches
            .get_mut(&batch_id)
            .ok_or_else(|| AppError::NotFound(format!("Batch {batch_id} not found")))?;
        for (file_name, _) in &uploads {
            let doc = BatchDocument::new(file_name.clone());
            created.push(doc.clone());
            batch.documents.insert(doc.id, doc);
        }
    }

    for (doc, (file_name, data)) in created.iter().zip(uploads) {
        spawn_extraction(state.batches.clone(), batch_id, doc.id, file_name, data);
    }

    Ok((StatusCode::ACCEPTED, Json(UploadResponse { documents: created })))
}

/// DELETE /api/v1/batch/:id/documents/:doc_id
///
/// Removes a document and its scores. Deleting an unknown document is a
/// no-op so retries stay safe.
pub async fn handle_delete_document(
    State(state): State<AppState>,
    Path((batch_id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let mut batches = state.batches.write().await;
    let batch = batches
        .get_mut(&batch_id)
        .ok_or_else(|| AppError::NotFound(format!("Batch {batch_id} not found")))?;
    batch.remove_document(document_id);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetJdRequest {
    pub job_description: String,
}

/// POST /api/v1/batch/:id/jd
///
/// Parses the job description and installs it, dropping any scores from the
/// previous criteria.
pub async fn handle_set_job_description(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
    Json(request): Json<SetJdRequest>,
) -> Result<Json<ParsedJobDescription>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }
    {
        let batches = state.batches.read().await;
        if !batches.contains_key(&batch_id) {
            return Err(AppError::NotFound(format!("Batch {batch_id} not found")));
        }
    }

    let parsed = parse_job_description(&request.job_description, &state.llm).await?;

    let mut batches = state.batches.write().await;
    let batch = batches
        .get_mut(&batch_id)
        .ok_or_else(|| AppError::NotFound(format!("Batch {batch_id} not found")))?;
    batch.set_job_description(parsed.clone());
    Ok(Json(parsed))
}

#[derive(Debug, Deserialize)]
pub struct AdjustWeightRequest {
    pub key: CriterionKey,
    pub delta: i32,
}

#[derive(Debug, Serialize)]
pub struct AdjustWeightResponse {
    pub key: CriterionKey,
    pub weight: u8,
}

/// PATCH /api/v1/batch/:id/weights
pub async fn handle_adjust_weight(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
    Json(request): Json<AdjustWeightRequest>,
) -> Result<Json<AdjustWeightResponse>, AppError> {
    let mut batches = state.batches.write().await;
    let batch = batches
        .get_mut(&batch_id)
        .ok_or_else(|| AppError::NotFound(format!("Batch {batch_id} not found")))?;

    let known = batch
        .parsed
        .as_ref()
        .map(|parsed| request.key.index < parsed.section(request.key.category).len())
        .unwrap_or(false);
    if !known {
        return Err(AppError::Validation(format!(
            "Unknown criterion {}",
            request.key
        )));
    }

    let weight = batch.weights.adjust(request.key, request.delta);
    Ok(Json(AdjustWeightResponse {
        key: request.key,
        weight,
    }))
}

/// POST /api/v1/batch/:id/weights/reset
pub async fn handle_reset_weights(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut batches = state.batches.write().await;
    let batch = batches
        .get_mut(&batch_id)
        .ok_or_else(|| AppError::NotFound(format!("Batch {batch_id} not found")))?;
    let parsed = batch
        .parsed
        .clone()
        .ok_or_else(|| AppError::Validation("Batch has no parsed job description".to_string()))?;
    batch.weights.reset(&parsed);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct ScoreDispatchResponse {
    pub dispatched: usize,
}

/// POST /api/v1/batch/:id/score
///
/// Kicks off scoring for every eligible document and returns immediately.
pub async fn handle_score_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ScoreDispatchResponse>), AppError> {
    let dispatched = score_all(state.batches.clone(), state.llm.clone(), batch_id).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ScoreDispatchResponse { dispatched }),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsQuery {
    #[serde(default)]
    pub layout: GridLayout,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub order: SortOrder,
}

/// GET /api/v1/batch/:id/results
///
/// Builds the results grid from whatever scores have arrived so far;
/// partial grids during scoring are expected.
pub async fn handle_batch_results(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<ResultsGrid>, AppError> {
    let batches = state.batches.read().await;
    let batch = batches
        .get(&batch_id)
        .ok_or_else(|| AppError::NotFound(format!("Batch {batch_id} not found")))?;
    let parsed = batch
        .parsed
        .as_ref()
        .ok_or_else(|| AppError::Validation("Batch has no parsed job description".to_string()))?;

    let grid = build_grid(
        &batch.candidates(),
        parsed,
        &batch.matrix,
        &batch.weights,
        query.sort_by,
        query.order,
        query.layout,
    );
    Ok(Json(grid))
}
