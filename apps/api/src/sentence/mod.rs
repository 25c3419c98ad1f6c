//! Sentence-boundary detection and exact-offset replacement.
//!
//! A sentence is a maximal substring bounded by the start of the text (or
//! the character after a delimiter) and the next delimiter inclusive, or the
//! end of the text. All offsets are byte offsets; the delimiters are ASCII,
//! so every offset this module produces lands on a char boundary.

pub mod editor;
pub mod handlers;
pub mod prompts;
pub mod rewrite;

use serde::Serialize;

/// Characters that terminate a sentence.
pub const SENTENCE_DELIMITERS: [u8; 5] = [b'.', b'!', b'?', b':', b'\n'];

fn is_delimiter(byte: u8) -> bool {
    SENTENCE_DELIMITERS.contains(&byte)
}

/// The sentence enclosing a caret position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceSpan {
    /// The `[start, end)` substring, trimmed for display and editing.
    pub sentence: String,
    /// Raw byte offset of the span start (untrimmed, for exact replacement).
    pub start: usize,
    /// Raw byte offset one past the span end, including the delimiter.
    pub end: usize,
}

impl SentenceSpan {
    pub fn is_blank(&self) -> bool {
        self.sentence.is_empty()
    }
}

/// Locates the sentence enclosing `caret` (clamped to `[0, text.len()]`).
///
/// Scans backward from `caret - 1` for the nearest delimiter (the sentence
/// starts one past it, or at 0) and forward from `caret` for the next
/// delimiter (included in `end`, or `end = text.len()` if none).
pub fn locate_sentence(text: &str, caret: usize) -> SentenceSpan {
    let bytes = text.as_bytes();
    let caret = caret.min(bytes.len());

    let start = bytes[..caret]
        .iter()
        .rposition(|&b| is_delimiter(b))
        .map(|pos| pos + 1)
        .unwrap_or(0);

    let end = bytes[caret..]
        .iter()
        .position(|&b| is_delimiter(b))
        .map(|pos| caret + pos + 1)
        .unwrap_or(bytes.len());

    SentenceSpan {
        sentence: text[start..end].trim().to_string(),
        start,
        end,
    }
}

/// Splices `replacement` over `text[start..end]`.
///
/// This is the exact splice from the editing contract: no revalidation of
/// the span against a possibly-stale buffer happens here. Callers must check
/// [`span_is_valid`] first when offsets come from outside.
pub fn replace_sentence(text: &str, start: usize, end: usize, replacement: &str) -> String {
    format!("{}{}{}", &text[..start], replacement, &text[end..])
}

/// Whether `[start, end)` is a well-formed span into `text`.
pub fn span_is_valid(text: &str, start: usize, end: usize) -> bool {
    start <= end
        && end <= text.len()
        && text.is_char_boundary(start)
        && text.is_char_boundary(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_sentence() {
        let span = locate_sentence("Hello world. How are you?", 3);
        assert_eq!(span.sentence, "Hello world.");
        assert_eq!(span.start, 0);
        assert_eq!(span.end, 12);
    }

    #[test]
    fn test_locate_second_sentence() {
        let span = locate_sentence("Hello world. How are you?", 15);
        assert_eq!(span.sentence, "How are you?");
        assert_eq!(span.start, 13);
        assert_eq!(span.end, 25);
    }

    #[test]
    fn test_locate_without_trailing_delimiter() {
        let span = locate_sentence("One. Two without end", 8);
        assert_eq!(span.sentence, "Two without end");
        assert_eq!(span.start, 4);
        assert_eq!(span.end, 20);
    }

    #[test]
    fn test_locate_treats_newline_and_colon_as_delimiters() {
        let text = "Dear team:\nI am writing today.";
        let span = locate_sentence(text, 5);
        assert_eq!(span.sentence, "Dear team:");
        assert_eq!(span.end, 10);

        let span = locate_sentence(text, 12);
        assert_eq!(span.sentence, "I am writing today.");
        assert_eq!(span.start, 11);
        assert_eq!(span.end, 30);
    }

    #[test]
    fn test_locate_trims_display_text_but_keeps_raw_offsets() {
        let span = locate_sentence("Hi.   Padded sentence.  ", 9);
        assert_eq!(span.sentence, "Padded sentence.");
        // raw offsets include the leading whitespace after the previous delimiter
        assert_eq!(span.start, 3);
        assert_eq!(span.end, 22);
    }

    #[test]
    fn test_locate_caret_clamped_past_end() {
        let span = locate_sentence("Short", 999);
        assert_eq!(span.sentence, "Short");
        assert_eq!(span.start, 0);
        assert_eq!(span.end, 5);
    }

    #[test]
    fn test_locate_in_empty_text() {
        let span = locate_sentence("", 0);
        assert!(span.is_blank());
        assert_eq!((span.start, span.end), (0, 0));
    }

    #[test]
    fn test_locate_caret_in_whitespace_run_yields_blank() {
        // caret sits between a "." and a newline with only a space in between
        let span = locate_sentence("End. \n", 5);
        assert!(span.is_blank());
        assert_eq!((span.start, span.end), (4, 6));
    }

    #[test]
    fn test_replace_exact_splice() {
        assert_eq!(replace_sentence("Hi. Bye.", 4, 8, "See ya!"), "Hi. See ya!");
    }

    #[test]
    fn test_replace_at_start_and_end() {
        assert_eq!(replace_sentence("abc", 0, 0, "X"), "Xabc");
        assert_eq!(replace_sentence("abc", 3, 3, "X"), "abcX");
        assert_eq!(replace_sentence("abc", 0, 3, ""), "");
    }

    #[test]
    fn test_span_validation() {
        assert!(span_is_valid("hello", 0, 5));
        assert!(span_is_valid("hello", 2, 2));
        assert!(!span_is_valid("hello", 3, 2));
        assert!(!span_is_valid("hello", 0, 6));
        // 'é' is two bytes; offset 1 splits it
        assert!(!span_is_valid("é", 1, 2));
    }

    #[test]
    fn test_locate_with_multibyte_text() {
        let text = "Café closed. Très bien!";
        let span = locate_sentence(text, 2);
        assert_eq!(span.sentence, "Café closed.");
        assert_eq!(span.start, 0);
        assert_eq!(span.end, "Café closed.".len());
    }
}
