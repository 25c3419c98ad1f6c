//! Axum route handlers for the coverage API (single cover-letter flow).

use std::collections::HashMap;

use axum::{extract::State, Json};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::coverage::criteria::{Category, CriterionKey, ParsedJobDescription};
use crate::coverage::jd_parser::parse_job_description;
use crate::coverage::scorer::{score_section, ScoreResult};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseJdRequest {
    pub job_description: String,
}

/// POST /api/v1/jd/parse
///
/// Parses a raw job description into the three criterion categories.
pub async fn handle_parse_jd(
    State(state): State<AppState>,
    Json(request): Json<ParseJdRequest>,
) -> Result<Json<ParsedJobDescription>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }

    let parsed = parse_job_description(&request.job_description, &state.llm).await?;
    Ok(Json(parsed))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageCheckRequest {
    pub parsed_data: ParsedJobDescription,
    pub cover_letter: String,
}

#[derive(Debug, Serialize)]
pub struct CoverageCheckResponse {
    pub results: HashMap<CriterionKey, ScoreResult>,
}

/// POST /api/v1/coverage/check
///
/// Scores one cover letter against every criterion. The three category
/// requests fan out concurrently; a failed section logs a warning and leaves
/// its keys absent instead of failing the whole check.
pub async fn handle_check_coverage(
    State(state): State<AppState>,
    Json(request): Json<CoverageCheckRequest>,
) -> Result<Json<CoverageCheckResponse>, AppError> {
    if request.cover_letter.trim().is_empty() {
        return Err(AppError::Validation(
            "coverLetter cannot be empty".to_string(),
        ));
    }
    if request.parsed_data.is_empty() {
        return Err(AppError::Validation(
            "parsedData contains no criteria".to_string(),
        ));
    }

    let results = check_all_sections(&state.llm, &request.parsed_data, &request.cover_letter).await;
    Ok(Json(CoverageCheckResponse { results }))
}

/// Fans out one scoring call per non-empty category and collects whatever
/// resolved into a per-key map.
pub async fn check_all_sections(
    llm: &LlmClient,
    parsed: &ParsedJobDescription,
    cover_letter: &str,
) -> HashMap<CriterionKey, ScoreResult> {
    let calls = Category::ALL
        .into_iter()
        .filter(|category| !parsed.section(*category).is_empty())
        .map(|category| async move {
            let outcome = score_section(llm, category, parsed.section(category), cover_letter).await;
            (category, outcome)
        });

    let mut results = HashMap::new();
    for (category, outcome) in join_all(calls).await {
        match outcome {
            Ok(section_results) => {
                for (index, result) in section_results.into_iter().enumerate() {
                    results.insert(CriterionKey::new(category, index), result);
                }
            }
            Err(e) => {
                warn!("Coverage check failed for {}: {e}", category.key_prefix());
            }
        }
    }
    results
}
