//! Shared test fixtures.
#![allow(dead_code)] // not every test binary uses every fixture

pub mod mocks;

use lectern::{
    AppState, FileSessionStore, LecternConfig, LocalDocumentStore, RateLimiter,
    ResearchOrchestrator, SessionManager, SourceProvider,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// A fully wired application state over temporary storage.
///
/// The temp dirs must stay alive for as long as the state is used.
pub struct TestContext {
    pub state: AppState,
    pub _documents_dir: TempDir,
    pub _sessions_dir: TempDir,
}

/// Build a test state with the given library contents, rate budget,
/// and providers.
pub fn build_state(
    documents: &[&str],
    max_requests: usize,
    answer: Arc<dyn SourceProvider>,
    papers: Arc<dyn SourceProvider>,
    web: Arc<dyn SourceProvider>,
) -> TestContext {
    let documents_dir = TempDir::new().unwrap();
    for name in documents {
        std::fs::write(documents_dir.path().join(name), b"content").unwrap();
    }
    let sessions_dir = TempDir::new().unwrap();

    let orchestrator = Arc::new(ResearchOrchestrator::new(
        vec![Arc::clone(&answer), Arc::clone(&papers), Arc::clone(&web)],
        Duration::from_millis(500),
    ));

    let state = AppState {
        config: Arc::new(LecternConfig::default()),
        limiter: Arc::new(RateLimiter::new(max_requests, Duration::from_secs(3600))),
        sessions: Arc::new(SessionManager::new(Arc::new(FileSessionStore::new(
            sessions_dir.path(),
        )))),
        documents: Arc::new(LocalDocumentStore::new(documents_dir.path())),
        orchestrator,
        paper_provider: papers,
        web_provider: web,
    };

    TestContext {
        state,
        _documents_dir: documents_dir,
        _sessions_dir: sessions_dir,
    }
}
