//! Session storage backends.
//!
//! The Redis backend is the production path; the in-memory backend keeps the
//! API usable without Redis and backs the storage tests. Both treat stored
//! blobs as untrusted: a corrupt or expired blob is discarded on load, never
//! surfaced.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::coverage::criteria::{CriterionKey, ParsedJobDescription};
use crate::coverage::scorer::ScoreResult;
use crate::errors::AppError;

/// Sessions older than this are treated as gone.
pub const SESSION_TTL_DAYS: i64 = 30;

/// One saved working state: the raw inputs plus whatever derived results
/// existed at save time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub parsed_data: Option<ParsedJobDescription>,
    #[serde(default)]
    pub coverage_results: Option<HashMap<CriterionKey, ScoreResult>>,
    #[serde(default = "Utc::now")]
    pub last_saved: DateTime<Utc>,
}

impl SavedSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.last_saved > Duration::days(SESSION_TTL_DAYS)
    }
}

/// Decodes a stored blob, dropping anything corrupt or expired.
fn revive(id: Uuid, raw: &str, now: DateTime<Utc>) -> Option<SavedSession> {
    let session: SavedSession = match serde_json::from_str(raw) {
        Ok(session) => session,
        Err(e) => {
            warn!("Discarding corrupt session {id}: {e}");
            return None;
        }
    };
    if session.is_expired(now) {
        return None;
    }
    Some(session)
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<SavedSession>, AppError>;
    async fn save(&self, id: Uuid, session: &SavedSession) -> Result<(), AppError>;
    async fn clear(&self, id: Uuid) -> Result<(), AppError>;
}

fn session_key(id: Uuid) -> String {
    format!("cvrd:session:{id}")
}

pub struct RedisSessionStore {
    client: redis::Client,
}

impl RedisSessionStore {
    pub fn new(redis_url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::Storage(format!("Invalid Redis URL: {e}")))?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Storage(format!("Redis connection failed: {e}")))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SavedSession>, AppError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn
            .get(session_key(id))
            .await
            .map_err(|e| AppError::Storage(format!("Redis GET failed: {e}")))?;

        let Some(raw) = raw else { return Ok(None) };
        match revive(id, &raw, Utc::now()) {
            Some(session) => Ok(Some(session)),
            None => {
                // Drop the unusable blob so the next load is a clean miss.
                self.clear(id).await?;
                Ok(None)
            }
        }
    }

    async fn save(&self, id: Uuid, session: &SavedSession) -> Result<(), AppError> {
        let json = serde_json::to_string(session)
            .map_err(|e| AppError::Storage(format!("Session serialization failed: {e}")))?;
        let mut conn = self.connection().await?;
        let ttl_seconds = (SESSION_TTL_DAYS * 24 * 60 * 60) as u64;
        let _: () = conn
            .set_ex(session_key(id), json, ttl_seconds)
            .await
            .map_err(|e| AppError::Storage(format!("Redis SET failed: {e}")))?;
        Ok(())
    }

    async fn clear(&self, id: Uuid) -> Result<(), AppError> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .del(session_key(id))
            .await
            .map_err(|e| AppError::Storage(format!("Redis DEL failed: {e}")))?;
        Ok(())
    }
}

/// Process-local fallback used when no Redis URL is configured.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SavedSession>, AppError> {
        let raw = { self.sessions.read().await.get(&id).cloned() };
        let Some(raw) = raw else { return Ok(None) };
        match revive(id, &raw, Utc::now()) {
            Some(session) => Ok(Some(session)),
            None => {
                self.clear(id).await?;
                Ok(None)
            }
        }
    }

    async fn save(&self, id: Uuid, session: &SavedSession) -> Result<(), AppError> {
        let json = serde_json::to_string(session)
            .map_err(|e| AppError::Storage(format!("Session serialization failed: {e}")))?;
        self.sessions.write().await.insert(id, json);
        Ok(())
    }

    async fn clear(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions.write().await.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session(last_saved: DateTime<Utc>) -> SavedSession {
        SavedSession {
            job_description: "We need a Rust engineer.".to_string(),
            cover_letter: "I write Rust.".to_string(),
            parsed_data: None,
            coverage_results: None,
            last_saved,
        }
    }

    #[tokio::test]
    async fn test_in_memory_roundtrip() {
        let store = InMemorySessionStore::new();
        let id = Uuid::new_v4();
        store.save(id, &sample_session(Utc::now())).await.unwrap();

        let loaded = store.load(id).await.unwrap().unwrap();
        assert_eq!(loaded.cover_letter, "I write Rust.");
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let store = InMemorySessionStore::new();
        assert!(store.load(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_discarded() {
        let store = InMemorySessionStore::new();
        let id = Uuid::new_v4();
        let stale = Utc::now() - Duration::days(SESSION_TTL_DAYS + 1);
        store.save(id, &sample_session(stale)).await.unwrap();

        assert!(store.load(id).await.unwrap().is_none());
        assert!(store.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_discarded() {
        let store = InMemorySessionStore::new();
        let id = Uuid::new_v4();
        store
            .sessions
            .write()
            .await
            .insert(id, "{not json".to_string());

        assert!(store.load(id).await.unwrap().is_none());
        assert!(store.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = InMemorySessionStore::new();
        let id = Uuid::new_v4();
        store.save(id, &sample_session(Utc::now())).await.unwrap();
        store.clear(id).await.unwrap();
        store.clear(id).await.unwrap();
        assert!(store.load(id).await.unwrap().is_none());
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let at_limit = sample_session(now - Duration::days(SESSION_TTL_DAYS));
        assert!(!at_limit.is_expired(now));

        let past_limit = sample_session(now - Duration::days(SESSION_TTL_DAYS) - Duration::seconds(1));
        assert!(past_limit.is_expired(now));
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let json = serde_json::to_value(sample_session(Utc::now())).unwrap();
        assert!(json.get("jobDescription").is_some());
        assert!(json.get("coverLetter").is_some());
        assert!(json.get("lastSaved").is_some());
    }
}
