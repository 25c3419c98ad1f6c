//! Batch registry and background scoring dispatch.
//!
//! One write lock guards the registry; background tasks re-acquire it per
//! result, so score arrivals interleave with document edits. A score for a
//! document that was removed while its call was in flight is discarded at
//! the upsert, never resurrected.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, Stream, StreamExt};
use tokio::sync::RwLock;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::batch::document::BatchDocument;
use crate::batch::extract::extract_text;
use crate::coverage::criteria::{Category, Criterion, CriterionKey, ParsedJobDescription};
use crate::coverage::grid::Candidate;
use crate::coverage::matrix::ScoreMatrix;
use crate::coverage::scorer::{score_section, ScoreResult};
use crate::coverage::weights::WeightSet;
use crate::errors::AppError;
use crate::llm_client::LlmClient;

pub type BatchRegistry = Arc<RwLock<HashMap<Uuid, BatchState>>>;

pub fn new_registry() -> BatchRegistry {
    Arc::new(RwLock::new(HashMap::new()))
}

/// All state of one batch: its documents, the parsed job description,
/// criterion weights, and the score matrix.
#[derive(Debug)]
pub struct BatchState {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub documents: HashMap<Uuid, BatchDocument>,
    pub parsed: Option<ParsedJobDescription>,
    pub weights: WeightSet,
    pub matrix: ScoreMatrix,
    pub scoring_in_progress: bool,
}

impl BatchState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            documents: HashMap::new(),
            parsed: None,
            weights: WeightSet::new(),
            matrix: ScoreMatrix::new(),
            scoring_in_progress: false,
        }
    }

    /// Installs a new job description. All scores belong to the old
    /// criteria, so the matrix is cleared; weights get defaults for every
    /// new criterion while explicit adjustments to surviving keys persist.
    pub fn set_job_description(&mut self, parsed: ParsedJobDescription) {
        self.weights.ensure_defaults(&parsed);
        self.parsed = Some(parsed);
        self.matrix.clear();
    }

    /// Removes a document and its scores. Idempotent.
    pub fn remove_document(&mut self, document_id: Uuid) {
        self.documents.remove(&document_id);
        self.matrix.remove_document(document_id);
    }

    /// Records one category's scores for a document. Results for a document
    /// no longer in the batch are discarded.
    pub fn record_section(
        &mut self,
        document_id: Uuid,
        category: Category,
        results: Vec<ScoreResult>,
    ) {
        if !self.documents.contains_key(&document_id) {
            debug!(
                "Discarding {} scores for removed document {document_id}",
                category.key_prefix()
            );
            return;
        }
        for (index, result) in results.into_iter().enumerate() {
            self.matrix
                .upsert(document_id, CriterionKey::new(category, index), result);
        }
    }

    pub fn eligible_documents(&self) -> Vec<&BatchDocument> {
        self.documents.values().filter(|d| d.is_eligible()).collect()
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        self.documents
            .values()
            .map(|d| Candidate {
                id: d.id,
                name: d.name.clone(),
            })
            .collect()
    }
}

/// Runs file extraction for one document off the async runtime, then records
/// the outcome. The task exits quietly if the batch or document is gone.
pub fn spawn_extraction(
    registry: BatchRegistry,
    batch_id: Uuid,
    document_id: Uuid,
    file_name: String,
    data: Vec<u8>,
) {
    tokio::spawn(async move {
        {
            let mut batches = registry.write().await;
            let Some(doc) = batches
                .get_mut(&batch_id)
                .and_then(|b| b.documents.get_mut(&document_id))
            else {
                return;
            };
            doc.mark_processing();
        }

        let outcome = tokio::task::spawn_blocking(move || extract_text(&file_name, &data)).await;

        let mut batches = registry.write().await;
        let Some(doc) = batches
            .get_mut(&batch_id)
            .and_then(|b| b.documents.get_mut(&document_id))
        else {
            return;
        };
        match outcome {
            Ok(Ok(text)) => doc.mark_completed(text),
            Ok(Err(e)) => {
                warn!("Extraction failed for document {document_id}: {e}");
                doc.mark_error(e.to_string());
            }
            Err(e) => {
                error!("Extraction task panicked for document {document_id}: {e}");
                doc.mark_error("extraction task failed");
            }
        }
    });
}

/// Starts scoring every eligible document against every non-empty category.
///
/// Clears the matrix up front so stale grids never mix with fresh scores,
/// then fans out one LLM call per (document, category) pair in the
/// background. Returns the number of calls dispatched.
pub async fn score_all(
    registry: BatchRegistry,
    llm: LlmClient,
    batch_id: Uuid,
) -> Result<usize, AppError> {
    let jobs = {
        let mut batches = registry.write().await;
        let batch = batches
            .get_mut(&batch_id)
            .ok_or_else(|| AppError::NotFound(format!("Batch {batch_id} not found")))?;

        if batch.scoring_in_progress {
            return Err(AppError::Conflict(
                "Scoring is already in progress for this batch".to_string(),
            ));
        }
        let parsed = batch.parsed.clone().ok_or_else(|| {
            AppError::Validation("Batch has no parsed job description".to_string())
        })?;
        let eligible: Vec<(Uuid, String)> = batch
            .eligible_documents()
            .into_iter()
            .map(|d| (d.id, d.content.clone()))
            .collect();
        if eligible.is_empty() {
            return Err(AppError::Validation(
                "Batch has no documents with extracted text".to_string(),
            ));
        }

        batch.matrix.clear();
        batch.scoring_in_progress = true;

        let mut jobs: Vec<(Uuid, String, Category, Vec<Criterion>)> = Vec::new();
        for (document_id, content) in eligible {
            for category in Category::ALL {
                let criteria = parsed.section(category);
                if criteria.is_empty() {
                    continue;
                }
                jobs.push((document_id, content.clone(), category, criteria.to_vec()));
            }
        }
        jobs
    };

    let dispatched = jobs.len();
    tokio::spawn(run_scoring(registry, llm, batch_id, jobs));
    Ok(dispatched)
}

type ScoreOutcome = (Uuid, Category, Result<Vec<ScoreResult>, AppError>);

async fn run_scoring(
    registry: BatchRegistry,
    llm: LlmClient,
    batch_id: Uuid,
    jobs: Vec<(Uuid, String, Category, Vec<Criterion>)>,
) {
    let calls: FuturesUnordered<_> = jobs
        .into_iter()
        .map(|(document_id, content, category, criteria)| {
            let llm = llm.clone();
            async move {
                let outcome = score_section(&llm, category, &criteria, &content).await;
                (document_id, category, outcome)
            }
        })
        .collect();

    apply_scores(registry, batch_id, calls).await;
}

/// Drains outcomes in completion order, upserting each one immediately so
/// the grid fills in while slower requests are still in flight. The
/// in-progress flag drops only once the stream is exhausted.
async fn apply_scores<S>(registry: BatchRegistry, batch_id: Uuid, mut outcomes: S)
where
    S: Stream<Item = ScoreOutcome> + Unpin,
{
    while let Some((document_id, category, outcome)) = outcomes.next().await {
        match outcome {
            Ok(results) => {
                let mut batches = registry.write().await;
                if let Some(batch) = batches.get_mut(&batch_id) {
                    batch.record_section(document_id, category, results);
                }
            }
            Err(e) => {
                warn!(
                    "Scoring failed for document {document_id} ({}): {e}",
                    category.key_prefix()
                );
            }
        }
    }

    let mut batches = registry.write().await;
    if let Some(batch) = batches.get_mut(&batch_id) {
        batch.scoring_in_progress = false;
    }
}
