//! Multi-source research orchestration.
//!
//! A research run fans one task out per enabled source provider,
//! joins all of them regardless of individual success or failure, and
//! merges the outcomes into a [`CombinedReport`](crate::types::CombinedReport)
//! whose shape and ordering never depend on completion order.
//!
//! # Guarantees
//!
//! - No fail-fast: a slow or failing source cannot block or poison the
//!   others; every started task is joined.
//! - Per-provider deadline: a source still pending when the deadline
//!   fires is recorded as a timeout failure for that source only.
//! - Deterministic merge: fixed section order (answer, papers, web),
//!   items in provider rank order, stable placeholder lines for empty
//!   or failed sections.

/// Deterministic merge of source outcomes into a combined report.
pub mod merge;
/// Concurrent fan-out/join across source providers.
pub mod orchestrator;

pub use orchestrator::{ResearchOrchestrator, ResearchOutcome};
