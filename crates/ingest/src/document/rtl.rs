//! Right-to-left text handling as pure string transforms.
//!
//! PDF extraction yields Hebrew with its letters in visual (reversed) order;
//! reversing each Hebrew token restores logical order while leaving Latin
//! text, digits and punctuation alone. Kept separate from chunking so the
//! chunker never special-cases script direction.

/// Directional wrapper emitted around converted markdown.
pub const RTL_OPEN: &str = "<div dir=\"rtl\">";
pub const RTL_CLOSE: &str = "</div>";

/// Whether `c` falls in the Hebrew Unicode block (U+0590..=U+05FF).
pub fn is_hebrew(c: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&c)
}

/// Reverse the characters of every whitespace-delimited token that contains
/// at least one Hebrew character. Whitespace runs and non-Hebrew tokens pass
/// through untouched, so the output has the exact same length and spacing.
pub fn reverse_hebrew_tokens(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for token in split_tokens(text) {
        if token.chars().any(is_hebrew) {
            result.extend(token.chars().rev());
        } else {
            result.push_str(token);
        }
    }

    result
}

/// Remove the literal RTL wrapper tags and trim. String replacement on the
/// exact wrapper the converter emits, not HTML parsing.
pub fn strip_rtl_wrapper(text: &str) -> String {
    text.replace(RTL_OPEN, "").replace(RTL_CLOSE, "").trim().to_string()
}

/// Split into alternating runs of non-whitespace and whitespace, preserving
/// every character.
fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_ws: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let ws = c.is_whitespace();
        match in_ws {
            Some(prev) if prev == ws => {}
            Some(_) => {
                tokens.push(&text[start..i]);
                start = i;
                in_ws = Some(ws);
            }
            None => in_ws = Some(ws),
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}
