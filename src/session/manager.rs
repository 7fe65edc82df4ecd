//! In-memory session registry.
//!
//! The registry is a read-write-locked map of per-session mutexes,
//! so appends for different documents never contend on one lock while
//! appends for the same document are fully serialized. This is what
//! keeps `len(turns) <= MAX_SESSION_TURNS` true under concurrent
//! append attempts.

use crate::session::store::SessionStore;
use crate::types::{AppError, ResearchResult, Result, Session};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Maps documents to their single live session and enforces the
/// maximum-turns invariant.
pub struct SessionManager {
    by_document: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    by_id: RwLock<HashMap<String, String>>,
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    /// Create a manager persisting through the given store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        tracing::info!("initializing session manager");
        Self {
            by_document: RwLock::new(HashMap::new()),
            by_id: RwLock::new(HashMap::new()),
            store,
        }
    }

    /// Return the live session for a document, creating an empty one
    /// if none exists yet. Returns a snapshot.
    pub fn get_or_create(&self, document_ref: &str) -> Session {
        self.entry(document_ref).lock().clone()
    }

    /// Append a completed turn to the document's session.
    ///
    /// Fails with [`AppError::SessionFull`] once the session holds
    /// the maximum number of turns; a failed append mutates nothing.
    /// Returns the session id on success.
    pub fn append(&self, document_ref: &str, result: ResearchResult) -> Result<String> {
        let entry = self.entry(document_ref);
        let mut session = entry.lock();

        if session.is_full() {
            return Err(AppError::SessionFull);
        }

        session.turns.push(result);
        session.updated_at = Utc::now();
        tracing::info!(
            document_ref,
            session_id = %session.session_id,
            turns = session.turns.len(),
            "turn appended"
        );
        Ok(session.session_id.clone())
    }

    /// Look a session up by id, falling back to the store.
    ///
    /// A store hit is promoted into memory unless its document already
    /// has a live session, which stays authoritative.
    pub async fn load(&self, session_id: &str) -> Result<Option<Session>> {
        // Copy the document ref out before touching the other map;
        // lock acquisition order is by_document, then by_id.
        let resident = self.by_id.read().get(session_id).cloned();
        if let Some(document_ref) = resident {
            if let Some(entry) = self.by_document.read().get(&document_ref) {
                return Ok(Some(entry.lock().clone()));
            }
        }

        let Some(session) = self.store.load(session_id).await? else {
            return Ok(None);
        };

        let mut by_document = self.by_document.write();
        if !by_document.contains_key(&session.document_ref) {
            self.by_id
                .write()
                .insert(session.session_id.clone(), session.document_ref.clone());
            by_document.insert(
                session.document_ref.clone(),
                Arc::new(Mutex::new(session.clone())),
            );
            tracing::info!(session_id, "session promoted from store");
        }
        Ok(Some(session))
    }

    /// Write the current in-memory state of a session to the store.
    ///
    /// The snapshot is taken under the session lock; the write itself
    /// holds no lock.
    pub async fn persist(&self, session_id: &str) -> Result<()> {
        let document_ref = self
            .by_id
            .read()
            .get(session_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("session {}", session_id)))?;

        let snapshot = {
            let entry = self
                .by_document
                .read()
                .get(&document_ref)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("session {}", session_id)))?;
            let snapshot = entry.lock().clone();
            snapshot
        };

        self.store.save(&snapshot).await
    }

    fn entry(&self, document_ref: &str) -> Arc<Mutex<Session>> {
        if let Some(entry) = self.by_document.read().get(document_ref) {
            return Arc::clone(entry);
        }

        let mut by_document = self.by_document.write();
        if let Some(entry) = by_document.get(document_ref) {
            return Arc::clone(entry);
        }

        let session = Session::new(document_ref);
        tracing::info!(document_ref, session_id = %session.session_id, "creating new session");
        self.by_id
            .write()
            .insert(session.session_id.clone(), document_ref.to_string());
        let entry = Arc::new(Mutex::new(session));
        by_document.insert(document_ref.to_string(), Arc::clone(&entry));
        entry
    }
}
