//! Durable persistence of session snapshots, keyed by session id.

use crate::types::{AppError, Result, Session};
use async_trait::async_trait;
use std::path::PathBuf;

/// Full-snapshot session persistence.
///
/// `save` overwrites; there is no incremental write. Persistence is
/// out-of-band relative to request latency, so callers must not
/// assume a save has completed before responding.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Write a full snapshot of the session.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Load the snapshot for a session id, if one exists.
    async fn load(&self, session_id: &str) -> Result<Option<Session>>;
}

/// File-backed store writing one JSON file per session.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at `dir`. The directory is created on
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, session_id: &str) -> Option<PathBuf> {
        // Session ids are server-generated UUIDs; anything path-shaped
        // is not one of ours.
        if session_id.is_empty()
            || !session_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return None;
        }
        Some(self.dir.join(format!("{}.json", session_id)))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, session: &Session) -> Result<()> {
        let path = self.path_for(&session.session_id).ok_or_else(|| {
            AppError::Storage(format!("invalid session id: {}", session.session_id))
        })?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Storage(format!("failed to create session dir: {}", e)))?;

        let json = serde_json::to_vec_pretty(session)
            .map_err(|e| AppError::Storage(format!("failed to serialize session: {}", e)))?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|e| AppError::Storage(format!("failed to write {}: {}", path.display(), e)))?;

        tracing::debug!(session_id = %session.session_id, path = %path.display(), "session persisted");
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<Option<Session>> {
        let Some(path) = self.path_for(session_id) else {
            return Ok(None);
        };

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let session = serde_json::from_slice(&raw)
            .map_err(|e| AppError::Storage(format!("corrupt session snapshot: {}", e)))?;
        Ok(Some(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResearchResult;
    use chrono::Utc;

    fn turn(query: &str) -> ResearchResult {
        ResearchResult {
            document_ref: "doc-A".to_string(),
            query_text: query.to_string(),
            answer: None,
            papers: None,
            web: None,
            combined: format!("combined report for {}", query),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        let mut session = Session::new("doc-A");
        session.turns.push(turn("what are the key findings?"));
        session.turns.push(turn("what about the caveats, then?"));
        store.save(&session).await.unwrap();

        // A fresh store instance over the same directory.
        let store = FileSessionStore::new(dir.path());
        let loaded = store.load(&session.session_id).await.unwrap().unwrap();
        assert_eq!(loaded.session_id, session.session_id);
        assert_eq!(loaded.document_ref, session.document_ref);
        assert_eq!(loaded.turns.len(), 2);
        assert_eq!(loaded.turns[0].query_text, session.turns[0].query_text);
        assert_eq!(loaded.turns[0].combined, session.turns[0].combined);
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let loaded = store.load(&Session::new("doc-A").session_id).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        let mut session = Session::new("doc-A");
        store.save(&session).await.unwrap();

        session.turns.push(turn("what are the key findings?"));
        store.save(&session).await.unwrap();

        let loaded = store.load(&session.session_id).await.unwrap().unwrap();
        assert_eq!(loaded.turns.len(), 1);
    }

    #[tokio::test]
    async fn test_path_shaped_ids_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let loaded = store.load("../../etc/passwd").await.unwrap();
        assert!(loaded.is_none());
    }
}
