//! Score matrix — all per-document, per-criterion results accumulated so
//! far. Populated incrementally as scoring requests resolve; partial
//! population is always a valid, displayable state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coverage::aggregate::compute_summary;
use crate::coverage::criteria::CriterionKey;
use crate::coverage::scorer::ScoreResult;
use crate::coverage::weights::WeightSet;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreMatrix {
    by_document: HashMap<Uuid, HashMap<CriterionKey, ScoreResult>>,
}

impl ScoreMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-key upsert. Out-of-order completion is safe: a later-arriving
    /// result sets only its own key.
    pub fn upsert(&mut self, document_id: Uuid, key: CriterionKey, result: ScoreResult) {
        self.by_document
            .entry(document_id)
            .or_default()
            .insert(key, result);
    }

    pub fn get(&self, document_id: Uuid, key: CriterionKey) -> Option<&ScoreResult> {
        self.by_document.get(&document_id).and_then(|m| m.get(&key))
    }

    /// Weighted summary for one document; `None` when it has no scores yet.
    pub fn summary(&self, document_id: Uuid, weights: &WeightSet) -> Option<u32> {
        self.by_document
            .get(&document_id)
            .and_then(|scores| compute_summary(scores, weights))
    }

    /// Drops every entry for a document. Idempotent; leaves no orphaned keys.
    pub fn remove_document(&mut self, document_id: Uuid) {
        self.by_document.remove(&document_id);
    }

    pub fn contains_document(&self, document_id: Uuid) -> bool {
        self.by_document.contains_key(&document_id)
    }

    pub fn clear(&mut self) {
        self.by_document.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.by_document.is_empty()
    }
}
