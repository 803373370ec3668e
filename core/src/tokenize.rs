//! Word-boundary detection and token normalization.
//!
//! The pipeline only ever looks at the end of the buffer: the in-progress
//! token under the cursor and the completed token before it. Boundaries are
//! whitespace and punctuation, with the apostrophe kept word-internal so
//! contractions survive as single tokens.

use unicode_normalization::UnicodeNormalization;

/// The two tokens the pipeline cares about, in their original form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenContext {
    /// The run of non-boundary characters ending at the buffer's end.
    /// Empty when the buffer ends on a boundary character.
    pub current: String,
    /// The token immediately before `current`, or the last completed token
    /// when `current` is empty. Empty when there is no such token.
    pub previous: String,
}

/// True for characters that delimit tokens.
pub fn is_boundary(c: char) -> bool {
    c.is_whitespace() || (c.is_ascii_punctuation() && c != '\'')
}

/// Extract the current and previous tokens at the end of `text`.
///
/// The cursor is taken to be at the end of the buffer; mid-buffer editing
/// is the host's problem, not the engine's.
pub fn context_at_end(text: &str) -> TokenContext {
    let ends_on_boundary = text.chars().last().map(is_boundary).unwrap_or(true);

    let mut previous = "";
    let mut last = "";
    for token in text.split(is_boundary).filter(|t| !t.is_empty()) {
        previous = last;
        last = token;
    }

    if ends_on_boundary {
        TokenContext {
            current: String::new(),
            previous: last.to_string(),
        }
    } else {
        TokenContext {
            current: last.to_string(),
            previous: previous.to_string(),
        }
    }
}

/// Normalize a token for table lookup: NFC, lower-cased, letters only.
///
/// Suggestions are never built from the normalized form: heuristic
/// corrections emit their canonical text and index terms are stored in
/// their dictionary form.
pub fn normalize_token(token: &str) -> String {
    token
        .nfc()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphabetic())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_token_is_trailing_run() {
        let ctx = context_at_end("hello wor");
        assert_eq!(ctx.current, "wor");
        assert_eq!(ctx.previous, "hello");
    }

    #[test]
    fn trailing_whitespace_means_empty_current() {
        let ctx = context_at_end("hello world ");
        assert_eq!(ctx.current, "");
        assert_eq!(ctx.previous, "world");
    }

    #[test]
    fn punctuation_delimits_tokens() {
        let ctx = context_at_end("well,then");
        assert_eq!(ctx.current, "then");
        assert_eq!(ctx.previous, "well");
    }

    #[test]
    fn apostrophe_stays_word_internal() {
        let ctx = context_at_end("i don't");
        assert_eq!(ctx.current, "don't");
        assert_eq!(ctx.previous, "i");
    }

    #[test]
    fn empty_and_single_token_buffers() {
        assert_eq!(context_at_end(""), TokenContext::default());

        let ctx = context_at_end("hi");
        assert_eq!(ctx.current, "hi");
        assert_eq!(ctx.previous, "");
    }

    #[test]
    fn normalization_strips_non_letters_and_case() {
        assert_eq!(normalize_token("Don't"), "dont");
        assert_eq!(normalize_token("IM"), "im");
        assert_eq!(normalize_token("ab3c!"), "abc");
        assert_eq!(normalize_token("123"), "");
    }
}
