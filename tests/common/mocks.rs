//! Mock implementations for testing.
//!
//! This module provides mock source providers that can be used across
//! different test files without duplication.

use async_trait::async_trait;
use lectern::providers::SourceProvider;
use lectern::types::{
    AnswerResult, AppError, PaperResult, ResearchQuery, Result, SourceKind, SourceResult,
    WebResult,
};
use std::time::Duration;

/// How a [`MockProvider`] behaves when fetched.
#[derive(Clone, Copy)]
pub enum MockBehavior {
    /// Return a canned payload for the provider's kind.
    Succeed,
    /// Return an upstream error.
    Fail,
    /// Never complete (exercises the orchestrator deadline).
    Hang,
}

/// Source provider with scripted behavior.
pub struct MockProvider {
    kind: SourceKind,
    behavior: MockBehavior,
    delay: Duration,
}

impl MockProvider {
    /// A provider returning its canned payload immediately.
    pub fn succeeding(kind: SourceKind) -> Self {
        Self {
            kind,
            behavior: MockBehavior::Succeed,
            delay: Duration::ZERO,
        }
    }

    /// A provider that fails every fetch.
    pub fn failing(kind: SourceKind) -> Self {
        Self {
            kind,
            behavior: MockBehavior::Fail,
            delay: Duration::ZERO,
        }
    }

    /// A provider that never completes.
    pub fn hanging(kind: SourceKind) -> Self {
        Self {
            kind,
            behavior: MockBehavior::Hang,
            delay: Duration::ZERO,
        }
    }

    /// Delay the canned payload by `delay`.
    pub fn with_delay(kind: SourceKind, delay: Duration) -> Self {
        Self {
            kind,
            behavior: MockBehavior::Succeed,
            delay,
        }
    }

    fn payload(&self) -> SourceResult {
        match self.kind {
            SourceKind::Answer => SourceResult::Answer(AnswerResult {
                text: "mock answer".to_string(),
                supporting_excerpts: Vec::new(),
            }),
            SourceKind::Papers => SourceResult::Papers(vec![PaperResult {
                title: "Mock Paper".to_string(),
                summary: "A mock abstract.".to_string(),
                published: "2023-01-15".to_string(),
                authors: vec!["Mock Author".to_string()],
                link: "https://arxiv.org/abs/2301.00001".to_string(),
            }]),
            SourceKind::Web => SourceResult::Web(vec![WebResult {
                title: "Mock Page".to_string(),
                snippet: "A mock snippet.".to_string(),
                link: "https://example.com/mock".to_string(),
            }]),
        }
    }
}

#[async_trait]
impl SourceProvider for MockProvider {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, _query: &ResearchQuery) -> Result<SourceResult> {
        match self.behavior {
            MockBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            MockBehavior::Fail => Err(AppError::Search("mock upstream failure".to_string())),
            MockBehavior::Succeed => {
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                Ok(self.payload())
            }
        }
    }
}
