//! PDF report export via genpdf.

use crate::types::{AppError, ResearchResult, Result, Session};
use genpdf::elements::{Break, Paragraph};
use genpdf::style::{Style, StyledString};
use genpdf::{Document, SimplePageDecorator};

/// Render a session as a PDF report, one section per turn.
pub fn export_pdf(session: &Session) -> Result<Vec<u8>> {
    let font_family = load_font_family()?;

    let mut doc = Document::new(font_family);
    doc.set_title(format!("Research Report - {}", session.document_ref));

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(30);
    doc.set_page_decorator(decorator);

    let title_style = Style::new().bold().with_font_size(16);
    doc.push(Paragraph::new(StyledString::new(
        format!("Research Report - {}", session.document_ref),
        title_style,
    )));
    doc.push(Break::new(1));

    for (i, turn) in session.turns.iter().enumerate() {
        push_turn_section(&mut doc, i + 1, turn);
    }

    let mut buf = Vec::new();
    doc.render(&mut buf)
        .map_err(|e| AppError::Internal(format!("failed to render PDF: {}", e)))?;
    Ok(buf)
}

fn push_turn_section(doc: &mut Document, index: usize, turn: &ResearchResult) {
    let heading = Style::new().bold().with_font_size(12);
    let subheading = Style::new().bold().with_font_size(11);

    doc.push(Paragraph::new(StyledString::new(
        format!("Question {}: {}", index, turn.query_text),
        heading,
    )));

    if let Some(answer) = &turn.answer {
        doc.push(Paragraph::new(format!("Document Analysis: {}", answer.text)));
    }

    if let Some(papers) = &turn.papers {
        if !papers.is_empty() {
            doc.push(Paragraph::new(StyledString::new(
                "Related Academic Research:",
                subheading,
            )));
            for paper in papers {
                doc.push(Paragraph::new(format!("- {}", paper.title)));
                doc.push(Paragraph::new(format!(
                    "  Summary: {}...",
                    paper.summary.chars().take(200).collect::<String>()
                )));
            }
        }
    }

    if let Some(web) = &turn.web {
        if !web.is_empty() {
            doc.push(Paragraph::new(StyledString::new("Web Research:", subheading)));
            for hit in web.iter().take(3) {
                doc.push(Paragraph::new(format!("- {}: {}", hit.title, hit.snippet)));
            }
        }
    }

    doc.push(Paragraph::new(StyledString::new("Synthesis:", subheading)));
    doc.push(Paragraph::new(turn.combined.clone()));
    doc.push(Break::new(1));
}

/// Locate a usable font, trying common system locations.
fn load_font_family() -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>> {
    let candidates = [
        ("/usr/share/fonts/truetype/liberation", "LiberationSans"),
        ("/usr/share/fonts/liberation", "LiberationSans"),
        ("/usr/share/fonts/TTF", "DejaVuSans"),
        ("/usr/share/fonts/truetype/dejavu", "DejaVuSans"),
        ("/Library/Fonts", "Arial"),
    ];

    for (dir, name) in candidates {
        if let Ok(family) = genpdf::fonts::from_files(dir, name, None) {
            return Ok(family);
        }
    }

    Err(AppError::Internal(
        "no usable font found for PDF export".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // Depends on system fonts being installed.
    #[test]
    #[ignore]
    fn test_export_produces_pdf_bytes() {
        let mut session = Session::new("report.pdf");
        session.turns.push(ResearchResult {
            document_ref: "report.pdf".to_string(),
            query_text: "What are the key findings?".to_string(),
            answer: None,
            papers: None,
            web: None,
            combined: "Combined synthesis.".to_string(),
            timestamp: Utc::now(),
        });

        let bytes = export_pdf(&session).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
