//! Deterministic merge of source outcomes.
//!
//! The merge is a pure function of the per-source slots; it neither
//! suspends nor observes completion order. Empty and failed sources
//! render fixed placeholder lines so the report shape stays stable for
//! downstream formatting.

use crate::types::{AnswerResult, CombinedReport, PaperResult, WebResult};

/// Placeholder when the answer engine produced nothing.
pub const NO_ANSWER_PLACEHOLDER: &str = "No document analysis available.";
/// Placeholder when paper search produced nothing.
pub const NO_PAPERS_PLACEHOLDER: &str = "No relevant academic papers found.";
/// Placeholder when web search produced nothing.
pub const NO_WEB_PLACEHOLDER: &str = "No relevant web resources found.";

/// Items rendered per list section.
pub const SECTION_ITEM_CAP: usize = 3;
/// Characters kept of each summary/snippet.
pub const ITEM_TEXT_CAP: usize = 200;

/// Merge per-source outcomes into a combined report.
///
/// `None` slots (source disabled or failed) and empty lists both
/// render their section's placeholder.
pub fn combine(
    answer: Option<&AnswerResult>,
    papers: Option<&[PaperResult]>,
    web: Option<&[WebResult]>,
) -> CombinedReport {
    let answer_section = match answer {
        Some(a) if !a.text.trim().is_empty() => a.text.clone(),
        _ => NO_ANSWER_PLACEHOLDER.to_string(),
    };

    let papers_section = match papers {
        Some(items) if !items.is_empty() => items
            .iter()
            .take(SECTION_ITEM_CAP)
            .map(|p| format!("- {}: {}...", p.title, truncate_chars(&p.summary, ITEM_TEXT_CAP)))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => NO_PAPERS_PLACEHOLDER.to_string(),
    };

    let web_section = match web {
        Some(items) if !items.is_empty() => items
            .iter()
            .take(SECTION_ITEM_CAP)
            .map(|w| format!("- {}: {}...", w.title, truncate_chars(&w.snippet, ITEM_TEXT_CAP)))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => NO_WEB_PLACEHOLDER.to_string(),
    };

    let rendered_text = format!(
        "Document Analysis:\n{}\n\nRelated Research:\n{}\n\nWeb Resources:\n{}",
        answer_section, papers_section, web_section
    );

    CombinedReport {
        answer_section,
        papers_section,
        web_section,
        rendered_text,
    }
}

/// Take the first `cap` characters, respecting char boundaries.
fn truncate_chars(text: &str, cap: usize) -> String {
    text.chars().take(cap).collect()
}
