//! Orchestrator properties exercised through the public API.

mod common;

use common::mocks::MockProvider;
use lectern::ResearchOrchestrator;
use lectern::providers::SourceProvider;
use lectern::types::{EnabledSources, ResearchQuery, SourceKind};
use std::sync::Arc;
use std::time::Duration;

fn query() -> ResearchQuery {
    ResearchQuery {
        document_ref: "report.pdf".to_string(),
        text: "what are the key findings?".to_string(),
        enabled: EnabledSources::default(),
    }
}

fn orchestrator(providers: Vec<Arc<dyn SourceProvider>>) -> ResearchOrchestrator {
    ResearchOrchestrator::new(providers, Duration::from_millis(300))
}

#[tokio::test]
async fn test_rendered_report_is_independent_of_completion_order() {
    let slow_first = orchestrator(vec![
        Arc::new(MockProvider::with_delay(
            SourceKind::Answer,
            Duration::from_millis(120),
        )),
        Arc::new(MockProvider::with_delay(
            SourceKind::Papers,
            Duration::from_millis(60),
        )),
        Arc::new(MockProvider::succeeding(SourceKind::Web)),
    ]);
    let slow_last = orchestrator(vec![
        Arc::new(MockProvider::succeeding(SourceKind::Answer)),
        Arc::new(MockProvider::with_delay(
            SourceKind::Papers,
            Duration::from_millis(60),
        )),
        Arc::new(MockProvider::with_delay(
            SourceKind::Web,
            Duration::from_millis(120),
        )),
    ]);

    let first = slow_first.run(&query()).await.unwrap();
    let second = slow_last.run(&query()).await.unwrap();
    assert_eq!(first.report.rendered_text, second.report.rendered_text);
    assert_eq!(first.report, second.report);
}

#[tokio::test]
async fn test_simulated_timeout_isolates_one_source() {
    let orch = orchestrator(vec![
        Arc::new(MockProvider::succeeding(SourceKind::Answer)),
        Arc::new(MockProvider::hanging(SourceKind::Papers)),
        Arc::new(MockProvider::succeeding(SourceKind::Web)),
    ]);

    let outcome = orch.run(&query()).await.unwrap();
    assert!(outcome.answer.is_some());
    assert!(outcome.web.is_some());
    assert!(outcome.papers.is_none());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].kind, SourceKind::Papers);
    assert!(outcome.failures[0].message.contains("timed out"));
    assert!(
        outcome
            .report
            .rendered_text
            .contains("No relevant academic papers found.")
    );
}

#[tokio::test]
async fn test_all_sources_failing_still_yields_full_report_shape() {
    let orch = orchestrator(vec![
        Arc::new(MockProvider::failing(SourceKind::Answer)),
        Arc::new(MockProvider::failing(SourceKind::Papers)),
        Arc::new(MockProvider::failing(SourceKind::Web)),
    ]);

    let outcome = orch.run(&query()).await.unwrap();
    assert_eq!(outcome.failures.len(), 3);
    assert!(outcome.report.rendered_text.contains("Document Analysis:"));
    assert!(outcome.report.rendered_text.contains("Related Research:"));
    assert!(outcome.report.rendered_text.contains("Web Resources:"));
}
