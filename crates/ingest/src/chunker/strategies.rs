//! The three chunking strategies.
//!
//! All positions are counted in Unicode scalar values, never bytes, so
//! mixed-script documents are never sliced mid-character.

use super::types::{ChunkError, ChunkStrategy};

/// Split `text` using the given strategy. Pure and deterministic: identical
/// input always yields identical output.
pub fn chunk(text: &str, strategy: ChunkStrategy) -> Result<Vec<String>, ChunkError> {
    match strategy {
        ChunkStrategy::Fixed { size, overlap } => chunk_fixed(text, size, overlap),
        ChunkStrategy::Sentence => Ok(chunk_by_sentences(text)),
        ChunkStrategy::Paragraph => Ok(chunk_by_paragraphs(text)),
    }
}

/// Fixed-size windows with overlap.
///
/// Emits `[cursor, cursor + size)` clipped to the text length, then advances
/// the cursor by `size - overlap`. A window whose end reaches the text end is
/// terminal, so no trailing empty chunk is produced even when the length is
/// an exact multiple of the stride. The last chunk may be shorter than `size`.
pub fn chunk_fixed(text: &str, size: usize, overlap: usize) -> Result<Vec<String>, ChunkError> {
    if size == 0 || size <= overlap {
        return Err(ChunkError::InvalidConfig { size, overlap });
    }

    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < len {
        let end = (start + size).min(len);
        chunks.push(chars[start..end].iter().collect());
        if start + size >= len {
            break;
        }
        start += size - overlap;
    }

    Ok(chunks)
}

/// Split at `.`, `!`, `?` or newline followed by one or more whitespace
/// characters. The delimiter stays at the tail of the preceding segment;
/// segments empty after trimming are dropped.
///
/// Deliberately naive: abbreviations ("Mr.") and decimal points split too.
/// Downstream consumers depend on this exact behavior.
pub fn chunk_by_sentences(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if !matches!(c, '.' | '!' | '?' | '\n') {
            continue;
        }
        let followed_by_ws = matches!(iter.peek(), Some((_, next)) if next.is_whitespace());
        if !followed_by_ws {
            continue;
        }

        let segment = text[start..i + c.len_utf8()].trim();
        if !segment.is_empty() {
            chunks.push(segment.to_string());
        }

        // Consume the whole whitespace run after the delimiter.
        start = text.len();
        while let Some(&(j, next)) = iter.peek() {
            if next.is_whitespace() {
                iter.next();
            } else {
                start = j;
                break;
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        chunks.push(tail.to_string());
    }
    chunks
}

/// Split at blank-line boundaries (the literal `\n\n` sequence), trimming
/// each paragraph and dropping empties.
pub fn chunk_by_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
