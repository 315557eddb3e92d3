//! Converts extracted documents to RTL-wrapped markdown.

use super::rtl::{reverse_hebrew_tokens, RTL_CLOSE, RTL_OPEN};
use super::ExtractedDocument;

/// Render an extracted document as markdown wrapped in the RTL div.
///
/// PDF pages get a Hebrew page heading and a rule between pages, and every
/// line passes through Hebrew token reversal (PDF text layers store Hebrew
/// in visual order). TXT and DOCX text is already in logical order and is
/// only line-trimmed.
pub fn to_markdown(doc: &ExtractedDocument) -> String {
    if doc.file_type == "pdf" {
        pdf_markdown(doc)
    } else {
        text_markdown(&doc.full_text())
    }
}

fn pdf_markdown(doc: &ExtractedDocument) -> String {
    let mut out = String::new();
    out.push_str(RTL_OPEN);
    out.push_str("\n\n");

    for page in &doc.pages {
        if page.text.trim().is_empty() {
            continue;
        }
        out.push_str(&format!("# עמוד {}\n\n", page.page_number));
        for line in page.text.lines() {
            if line.trim().is_empty() {
                out.push('\n');
            } else {
                out.push_str(&reverse_hebrew_tokens(line));
                out.push('\n');
            }
        }
        out.push_str("\n---\n\n");
    }

    out.push_str(RTL_CLOSE);
    out
}

fn text_markdown(text: &str) -> String {
    let mut out = String::new();
    out.push_str(RTL_OPEN);
    out.push_str("\n\n");

    for line in text.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(line.trim());
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(RTL_CLOSE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageContent;

    fn doc(file_type: &str, pages: Vec<(usize, &str)>) -> ExtractedDocument {
        ExtractedDocument {
            filename: format!("test.{file_type}"),
            file_type: file_type.to_string(),
            pages: pages
                .into_iter()
                .map(|(n, t)| PageContent { page_number: n, text: t.to_string() })
                .collect(),
        }
    }

    #[test]
    fn wraps_in_rtl_div() {
        let md = to_markdown(&doc("txt", vec![(1, "hello")]));
        assert!(md.starts_with(RTL_OPEN));
        assert!(md.ends_with(RTL_CLOSE));
        assert!(md.contains("hello"));
    }

    #[test]
    fn pdf_pages_get_headings_and_rules() {
        let md = to_markdown(&doc("pdf", vec![(1, "first"), (2, "second")]));
        assert!(md.contains("# עמוד 1"));
        assert!(md.contains("# עמוד 2"));
        assert_eq!(md.matches("\n---\n").count(), 2);
    }

    #[test]
    fn pdf_lines_are_hebrew_reversed() {
        let md = to_markdown(&doc("pdf", vec![(1, "שלום world")]));
        assert!(md.contains("םולש world"));
    }

    #[test]
    fn txt_lines_are_not_reversed() {
        let md = to_markdown(&doc("txt", vec![(1, "שלום world")]));
        assert!(md.contains("שלום world"));
    }

    #[test]
    fn blank_pdf_pages_are_skipped() {
        let md = to_markdown(&doc("pdf", vec![(1, "  "), (2, "content")]));
        assert!(!md.contains("# עמוד 1"));
        assert!(md.contains("# עמוד 2"));
    }
}
