//! Codelabs-style export: one step per research turn, markdown content.

use crate::types::{ResearchResult, Session};
use serde_json::{Value, json};

/// Render a session as a codelabs document.
pub fn export_codelabs(session: &Session) -> Value {
    json!({
        "title": format!("Research on {}", session.document_ref),
        "steps": session
            .turns
            .iter()
            .enumerate()
            .map(|(i, turn)| {
                json!({
                    "title": format!("Question {}", i + 1),
                    "duration": "5:00",
                    "content": format_turn(turn),
                })
            })
            .collect::<Vec<_>>(),
    })
}

fn format_turn(result: &ResearchResult) -> String {
    let mut content = String::new();

    content.push_str("### Question\n");
    content.push_str(&result.query_text);
    content.push_str("\n\n### Document Analysis\n");
    content.push_str(
        result
            .answer
            .as_ref()
            .map(|a| a.text.as_str())
            .unwrap_or("No document analysis available."),
    );

    content.push_str("\n\n### Academic Research\n");
    for paper in result.papers.iter().flatten() {
        content.push_str(&format!(
            "* **{}**\n  * Published: {}\n  * Summary: {}...\n",
            paper.title,
            paper.published,
            paper.summary.chars().take(200).collect::<String>(),
        ));
    }

    content.push_str("\n### Web Research\n");
    for hit in result.web.iter().flatten() {
        content.push_str(&format!("* **{}**\n  * {}\n", hit.title, hit.snippet));
    }

    content.push_str("\n### Synthesis\n");
    content.push_str(&result.combined);
    content.push('\n');

    content
}
