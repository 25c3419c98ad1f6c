//! Section scorer — rates how well a cover letter addresses each criterion
//! of one category, via the LLM. The response must contain one result per
//! criterion, in input order; anything else is a shape error for this call
//! only.

use serde::{Deserialize, Serialize};

use crate::coverage::criteria::{Category, Criterion};
use crate::coverage::prompts::{COVERAGE_SCORE_PROMPT_TEMPLATE, COVERAGE_SCORE_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

const SCORING_MAX_TOKENS: u32 = 1000;

/// One per-criterion scoring result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 0-100, clamped at the collaborator boundary.
    pub score: u32,
    pub feedback: String,
}

/// Raw wire shape before range validation. Scores can come back out of
/// range or negative from the model.
#[derive(Debug, Deserialize)]
struct RawScoreResult {
    score: i64,
    feedback: String,
}

#[derive(Debug, Deserialize)]
struct RawSectionScores {
    results: Vec<RawScoreResult>,
}

/// Scores a cover letter against every criterion of one category.
/// Results come back in criterion order, scores clamped to `[0, 100]`.
pub async fn score_section(
    llm: &LlmClient,
    category: Category,
    criteria: &[Criterion],
    cover_letter: &str,
) -> Result<Vec<ScoreResult>, AppError> {
    if criteria.is_empty() {
        return Ok(Vec::new());
    }

    let numbered: Vec<String> = criteria
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c.description))
        .collect();

    let prompt = COVERAGE_SCORE_PROMPT_TEMPLATE
        .replace("{section_context}", category.prompt_context())
        .replace("{section}", category.key_prefix())
        .replace("{bullet_points}", &numbered.join("\n"))
        .replace("{cover_letter}", cover_letter);

    let raw: RawSectionScores = llm
        .call_json_with_limit(&prompt, COVERAGE_SCORE_SYSTEM, SCORING_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("Coverage scoring failed: {e}")))?;

    validate_results(raw, criteria.len())
}

/// Enforces the 1:1 order contract and clamps scores into range.
fn validate_results(
    raw: RawSectionScores,
    expected: usize,
) -> Result<Vec<ScoreResult>, AppError> {
    if raw.results.len() != expected {
        return Err(AppError::Llm(format!(
            "Coverage scoring returned {} results, expected {expected}",
            raw.results.len()
        )));
    }

    Ok(raw
        .results
        .into_iter()
        .map(|r| ScoreResult {
            score: r.score.clamp(0, 100) as u32,
            feedback: r.feedback,
        })
        .collect())
}
