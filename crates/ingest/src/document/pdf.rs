use super::{ExtractionError, PageContent};

/// Extract PDF text with `pdf-extract`, splitting pages on the form feed
/// characters it emits between them.
pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        // Scanned/image PDF with no text layer. Surface a single empty page;
        // the pipeline reports zero extractable text to the caller.
        return Ok(vec![PageContent {
            page_number: 1,
            text: String::new(),
        }]);
    }

    let pages = if text.contains('\x0C') {
        text.split('\x0C')
            .enumerate()
            .filter(|(_, page)| !page.trim().is_empty())
            .map(|(i, page)| PageContent {
                page_number: i + 1,
                text: page.trim().to_string(),
            })
            .collect()
    } else {
        vec![PageContent {
            page_number: 1,
            text: trimmed.to_string(),
        }]
    };

    Ok(pages)
}
