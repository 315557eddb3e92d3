use std::io::{Cursor, Read};

use super::{ExtractionError, PageContent};

/// Extract DOCX text by reading `word/document.xml` out of the zip container
/// and collecting the `w:t` text runs, one line per `w:p` paragraph.
pub fn extract_docx(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(format!("invalid archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractionError::Docx("no word/document.xml in archive".to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(format!("failed to read document.xml: {e}")))?;

    Ok(vec![PageContent {
        page_number: 1,
        text: plaintext_from_document_xml(&xml).trim().to_string(),
    }])
}

/// Minimal WordprocessingML scan: text lives in `<w:t>` elements, paragraph
/// boundaries are `<w:p>` elements. No attribute or namespace handling
/// beyond that is needed for plain text.
fn plaintext_from_document_xml(xml: &str) -> String {
    let mut result = String::new();
    let mut in_text = false;
    let mut chars = xml.chars();

    while let Some(c) = chars.next() {
        if c == '<' {
            let mut tag = String::new();
            for tc in chars.by_ref() {
                if tc == '>' {
                    break;
                }
                tag.push(tc);
            }

            if (tag.starts_with("w:t ") || tag == "w:t") && !tag.ends_with('/') {
                in_text = true;
            } else if tag == "/w:t" {
                in_text = false;
            } else if (tag.starts_with("w:p ") || tag == "w:p") && !tag.ends_with('/') {
                if !result.is_empty() && !result.ends_with('\n') {
                    result.push('\n');
                }
            }
        } else if in_text {
            result.push(c);
        }
    }

    unescape_xml(&result)
}

fn unescape_xml(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_text_runs_out_of_xml() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p><w:p><w:r><w:t xml:space="preserve">World</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(plaintext_from_document_xml(xml), "Hello\nWorld");
    }

    #[test]
    fn ignores_non_text_elements() {
        let xml = "<w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr><w:r><w:t>Only this</w:t></w:r></w:p>";
        assert_eq!(plaintext_from_document_xml(xml), "Only this");
    }

    #[test]
    fn unescapes_entities() {
        let xml = "<w:p><w:r><w:t>a &amp; b &lt;c&gt;</w:t></w:r></w:p>";
        assert_eq!(plaintext_from_document_xml(xml), "a & b <c>");
    }

    #[test]
    fn rejects_non_zip_bytes() {
        let err = extract_docx(b"not a zip archive").unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }
}
