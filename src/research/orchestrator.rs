use crate::providers::SourceProvider;
use crate::research::merge;
use crate::types::{
    AnswerResult, AppError, CombinedReport, PaperResult, ResearchQuery, Result, SourceFailure,
    SourceKind, SourceResult, WebResult,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Everything one research run produced.
///
/// Slots are `None` when the source was disabled or failed; failures
/// carry the captured reasons. The report always has all three
/// sections.
#[derive(Debug, Clone)]
pub struct ResearchOutcome {
    /// Answer engine output.
    pub answer: Option<AnswerResult>,
    /// Paper hits, provider-ranked.
    pub papers: Option<Vec<PaperResult>>,
    /// Web hits, provider-ranked.
    pub web: Option<Vec<WebResult>>,
    /// Failures captured from individual sources.
    pub failures: Vec<SourceFailure>,
    /// Deterministic merge of the slots above.
    pub report: CombinedReport,
}

/// Fans a research query out to the enabled providers and joins all
/// of them into one combined report.
pub struct ResearchOrchestrator {
    providers: Vec<Arc<dyn SourceProvider>>,
    provider_timeout: Duration,
}

impl ResearchOrchestrator {
    /// Create an orchestrator over the given providers.
    pub fn new(providers: Vec<Arc<dyn SourceProvider>>, provider_timeout: Duration) -> Self {
        Self {
            providers,
            provider_timeout,
        }
    }

    /// Run one research pass.
    ///
    /// One task is started per enabled provider, all started together
    /// and all joined: an error or timeout in one source is captured
    /// as a [`SourceFailure`] and never cancels a sibling. Fails only
    /// when the query itself is unusable, which upstream validation
    /// should already have rejected.
    pub async fn run(&self, query: &ResearchQuery) -> Result<ResearchOutcome> {
        if query.text.trim().is_empty() {
            return Err(AppError::Validation("empty research query".to_string()));
        }

        let mut set: JoinSet<SourceResult> = JoinSet::new();
        let mut kinds_by_task = HashMap::new();

        for provider in &self.providers {
            let kind = provider.kind();
            if !query.enabled.contains(kind) {
                tracing::debug!(source = %kind, "source disabled for this request");
                continue;
            }

            let provider = Arc::clone(provider);
            let query = query.clone();
            let timeout = self.provider_timeout;
            let handle = set.spawn(async move {
                match tokio::time::timeout(timeout, provider.fetch(&query)).await {
                    Ok(Ok(result)) => result,
                    Ok(Err(e)) => SourceResult::Failure(SourceFailure {
                        kind,
                        message: e.to_string(),
                    }),
                    Err(_) => SourceResult::Failure(SourceFailure {
                        kind,
                        message: format!("timed out after {}s", timeout.as_secs()),
                    }),
                }
            });
            kinds_by_task.insert(handle.id(), kind);
        }

        let mut answer: Option<AnswerResult> = None;
        let mut papers: Option<Vec<PaperResult>> = None;
        let mut web: Option<Vec<WebResult>> = None;
        let mut failures: Vec<SourceFailure> = Vec::new();

        // Join every started task; completion order is irrelevant
        // because results land in per-kind slots.
        while let Some(joined) = set.join_next_with_id().await {
            let result = match joined {
                Ok((_, result)) => result,
                Err(e) => {
                    let kind = kinds_by_task
                        .get(&e.id())
                        .copied()
                        .unwrap_or(SourceKind::Answer);
                    tracing::error!(source = %kind, error = %e, "provider task aborted");
                    SourceResult::Failure(SourceFailure {
                        kind,
                        message: format!("provider task aborted: {}", e),
                    })
                }
            };

            match result {
                SourceResult::Answer(a) => answer = Some(a),
                SourceResult::Papers(p) => papers = Some(p),
                SourceResult::Web(w) => web = Some(w),
                SourceResult::Failure(f) => {
                    tracing::warn!(source = %f.kind, reason = %f.message, "source failed");
                    failures.push(f);
                }
            }
        }

        let report = merge::combine(answer.as_ref(), papers.as_deref(), web.as_deref());

        Ok(ResearchOutcome {
            answer,
            papers,
            web,
            failures,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::merge::{NO_PAPERS_PLACEHOLDER, NO_WEB_PLACEHOLDER};
    use crate::types::EnabledSources;
    use async_trait::async_trait;

    /// Provider returning a fixed result after an optional delay.
    struct StubProvider {
        kind: SourceKind,
        delay: Duration,
        fail: bool,
        hang: bool,
    }

    impl StubProvider {
        fn ok(kind: SourceKind) -> Self {
            Self {
                kind,
                delay: Duration::ZERO,
                fail: false,
                hang: false,
            }
        }

        fn slow(kind: SourceKind, delay: Duration) -> Self {
            Self {
                kind,
                delay,
                fail: false,
                hang: false,
            }
        }

        fn failing(kind: SourceKind) -> Self {
            Self {
                kind,
                delay: Duration::ZERO,
                fail: true,
                hang: false,
            }
        }

        fn hanging(kind: SourceKind) -> Self {
            Self {
                kind,
                delay: Duration::ZERO,
                fail: false,
                hang: true,
            }
        }

        fn payload(&self) -> SourceResult {
            match self.kind {
                SourceKind::Answer => SourceResult::Answer(AnswerResult {
                    text: "stub answer".to_string(),
                    supporting_excerpts: Vec::new(),
                }),
                SourceKind::Papers => SourceResult::Papers(vec![PaperResult {
                    title: "Stub Paper".to_string(),
                    summary: "stub summary".to_string(),
                    published: "2023-01-15".to_string(),
                    authors: vec!["Author".to_string()],
                    link: "https://arxiv.org/abs/2301.00001".to_string(),
                }]),
                SourceKind::Web => SourceResult::Web(vec![WebResult {
                    title: "Stub Page".to_string(),
                    snippet: "stub snippet".to_string(),
                    link: "https://example.com".to_string(),
                }]),
            }
        }
    }

    #[async_trait]
    impl SourceProvider for StubProvider {
        fn kind(&self) -> SourceKind {
            self.kind
        }

        async fn fetch(&self, _query: &ResearchQuery) -> Result<SourceResult> {
            if self.hang {
                std::future::pending::<()>().await;
            }
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                return Err(AppError::Search("simulated upstream failure".to_string()));
            }
            Ok(self.payload())
        }
    }

    fn query() -> ResearchQuery {
        ResearchQuery {
            document_ref: "doc-A".to_string(),
            text: "what are the key findings?".to_string(),
            enabled: EnabledSources::default(),
        }
    }

    fn orchestrator(providers: Vec<Arc<dyn SourceProvider>>) -> ResearchOrchestrator {
        ResearchOrchestrator::new(providers, Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_all_sources_merge_into_report() {
        let orch = orchestrator(vec![
            Arc::new(StubProvider::ok(SourceKind::Answer)),
            Arc::new(StubProvider::ok(SourceKind::Papers)),
            Arc::new(StubProvider::ok(SourceKind::Web)),
        ]);

        let outcome = orch.run(&query()).await.unwrap();
        assert!(outcome.answer.is_some());
        assert!(outcome.papers.is_some());
        assert!(outcome.web.is_some());
        assert!(outcome.failures.is_empty());
        assert!(outcome.report.rendered_text.contains("stub answer"));
        assert!(outcome.report.rendered_text.contains("Stub Paper"));
    }

    #[tokio::test]
    async fn test_one_failure_does_not_poison_siblings() {
        let orch = orchestrator(vec![
            Arc::new(StubProvider::ok(SourceKind::Answer)),
            Arc::new(StubProvider::failing(SourceKind::Papers)),
            Arc::new(StubProvider::ok(SourceKind::Web)),
        ]);

        let outcome = orch.run(&query()).await.unwrap();
        assert!(outcome.answer.is_some());
        assert!(outcome.papers.is_none());
        assert!(outcome.web.is_some());
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].kind, SourceKind::Papers);
        assert_eq!(outcome.report.papers_section, NO_PAPERS_PLACEHOLDER);
        assert!(outcome.report.rendered_text.contains("stub answer"));
        assert!(outcome.report.rendered_text.contains("Stub Page"));
    }

    #[tokio::test]
    async fn test_hanging_source_times_out_without_blocking_others() {
        let orch = orchestrator(vec![
            Arc::new(StubProvider::ok(SourceKind::Answer)),
            Arc::new(StubProvider::ok(SourceKind::Papers)),
            Arc::new(StubProvider::hanging(SourceKind::Web)),
        ]);

        let outcome = orch.run(&query()).await.unwrap();
        assert!(outcome.answer.is_some());
        assert!(outcome.papers.is_some());
        assert!(outcome.web.is_none());
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].message.contains("timed out"));
        assert_eq!(outcome.report.web_section, NO_WEB_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_report_identical_across_completion_orders() {
        // Same payloads, opposite completion orders.
        let fast_answer = orchestrator(vec![
            Arc::new(StubProvider::ok(SourceKind::Answer)),
            Arc::new(StubProvider::slow(SourceKind::Papers, Duration::from_millis(50))),
            Arc::new(StubProvider::slow(SourceKind::Web, Duration::from_millis(100))),
        ]);
        let slow_answer = orchestrator(vec![
            Arc::new(StubProvider::slow(SourceKind::Answer, Duration::from_millis(100))),
            Arc::new(StubProvider::slow(SourceKind::Papers, Duration::from_millis(50))),
            Arc::new(StubProvider::ok(SourceKind::Web)),
        ]);

        let first = fast_answer.run(&query()).await.unwrap();
        let second = slow_answer.run(&query()).await.unwrap();
        assert_eq!(first.report.rendered_text, second.report.rendered_text);
    }

    #[tokio::test]
    async fn test_disabled_source_is_skipped_not_failed() {
        let orch = orchestrator(vec![
            Arc::new(StubProvider::ok(SourceKind::Answer)),
            Arc::new(StubProvider::ok(SourceKind::Papers)),
            Arc::new(StubProvider::ok(SourceKind::Web)),
        ]);

        let mut q = query();
        q.enabled.papers = false;

        let outcome = orch.run(&q).await.unwrap();
        assert!(outcome.papers.is_none());
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.report.papers_section, NO_PAPERS_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_rejects_blank_query() {
        let orch = orchestrator(vec![Arc::new(StubProvider::ok(SourceKind::Answer))]);
        let mut q = query();
        q.text = "   ".to_string();
        assert!(matches!(
            orch.run(&q).await,
            Err(AppError::Validation(_))
        ));
    }
}
