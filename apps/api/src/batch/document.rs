//! One uploaded candidate document and its extraction lifecycle.

use serde::Serialize;
use uuid::Uuid;

/// Extraction lifecycle of a document. `Completed` and `Error` are terminal;
/// a document never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDocument {
    pub id: Uuid,
    pub name: String,
    /// Extracted text, empty until extraction completes.
    #[serde(skip)]
    pub content: String,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content: String::new(),
            status: DocumentStatus::Pending,
            error: None,
        }
    }

    pub fn mark_processing(&mut self) {
        if self.status == DocumentStatus::Pending {
            self.status = DocumentStatus::Processing;
        }
    }

    pub fn mark_completed(&mut self, content: String) {
        if self.status == DocumentStatus::Processing {
            self.content = content;
            self.status = DocumentStatus::Completed;
        }
    }

    pub fn mark_error(&mut self, message: impl Into<String>) {
        if matches!(
            self.status,
            DocumentStatus::Pending | DocumentStatus::Processing
        ) {
            self.status = DocumentStatus::Error;
            self.error = Some(message.into());
        }
    }

    /// A document can be scored once extraction succeeded and produced
    /// non-empty text.
    pub fn is_eligible(&self) -> bool {
        self.status == DocumentStatus::Completed && !self.content.trim().is_empty()
    }
}
