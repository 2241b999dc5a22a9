//! Cursor-relative sentence capitalization for caption editing.

use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TextError {
    #[error("Invalid cursor offset {offset} for text of length {len}")]
    InvalidOffset { offset: usize, len: usize },
}

/// Characters that already close a sentence.
const SENTENCE_ENDINGS: [char; 4] = ['.', '?', '!', '\n'];

/// Where the backward scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SentenceStart {
    /// A space or line break at this byte offset.
    Boundary(usize),
    /// The beginning of the text.
    TextStart,
}

/// Walk back from `offset` to the space or line break that opens the current word.
fn scan_back(text: &str, offset: usize) -> SentenceStart {
    let mut pos = offset;

    loop {
        if pos == 0 {
            return SentenceStart::TextStart;
        }
        if matches!(text[pos..].chars().next(), Some(' ' | '\n')) {
            return SentenceStart::Boundary(pos);
        }
        pos -= text[..pos].chars().next_back().map_or(pos, char::len_utf8);
    }
}

/// Turn the word under the cursor into the start of a sentence.
///
/// The word's first letter is uppercased and, if the text before it does not
/// already end a sentence, a `.` is inserted right after that text. `offset` is
/// a byte offset; the caller keeps the cursor at the same numeric position.
pub fn capitalize(text: &str, offset: usize) -> Result<String, TextError> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return Err(TextError::InvalidOffset {
            offset,
            len: text.len(),
        });
    }

    let mut result = String::with_capacity(text.len() + 1);

    match scan_back(text, offset) {
        SentenceStart::Boundary(pos) => {
            let (before, rest) = text.split_at(pos);
            let mut rest_chars = rest.chars();
            let boundary = rest_chars.next().unwrap_or(' ');

            result.push_str(before);
            let needs_period = before
                .chars()
                .next_back()
                .is_some_and(|c| !SENTENCE_ENDINGS.contains(&c));
            if needs_period {
                result.push('.');
            }
            result.push(boundary);
            push_capitalized(&mut result, rest_chars.as_str());

            log::trace!("Sentence start at {}, period inserted: {}", pos, needs_period);
        }
        SentenceStart::TextStart => {
            push_capitalized(&mut result, text);
            log::trace!("Sentence start at beginning of text");
        }
    }

    Ok(result)
}

/// Capitalize at the caret, but only when nothing is selected.
///
/// Returns `Ok(None)` for a non-empty selection, leaving the text alone.
pub fn capitalize_at_caret(text: &str, selection: Range<usize>) -> Result<Option<String>, TextError> {
    if selection.start != selection.end {
        return Ok(None);
    }
    capitalize(text, selection.start).map(Some)
}

fn push_capitalized(out: &mut String, text: &str) {
    let mut chars = text.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
    }
    out.push_str(chars.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserts_period_before_new_sentence() {
        assert_eq!(
            capitalize("it ends there here we go !", 16).unwrap(),
            "it ends there. Here we go !"
        );
    }

    #[test]
    fn test_no_period_after_question_mark() {
        assert_eq!(
            capitalize("Does it end here? of course not!", 19).unwrap(),
            "Does it end here? Of course not!"
        );
    }

    #[test]
    fn test_no_period_after_blank_line() {
        assert_eq!(
            capitalize("Does it end here!\n\nof course not!", 19).unwrap(),
            "Does it end here!\n\nOf course not!"
        );
        assert_eq!(
            capitalize("first line\n\nsecond line", 14).unwrap(),
            "first line\n\nSecond line"
        );
    }

    #[test]
    fn test_word_at_start_of_line() {
        assert_eq!(
            capitalize("no period here\nnext line", 17).unwrap(),
            "no period here.\nNext line"
        );
    }

    #[test]
    fn test_cursor_on_the_boundary_itself() {
        // Offset 13 is the space after "there".
        assert_eq!(
            capitalize("it ends there here", 13).unwrap(),
            "it ends there. Here"
        );
    }

    #[test]
    fn test_start_of_text() {
        assert_eq!(capitalize("hello world", 3).unwrap(), "Hello world");
        assert_eq!(capitalize("hello world", 0).unwrap(), "Hello world");
    }

    #[test]
    fn test_idempotent_at_start() {
        assert_eq!(capitalize("Hello world", 0).unwrap(), "Hello world");
        assert_eq!(capitalize("", 0).unwrap(), "");
    }

    #[test]
    fn test_cursor_at_end_of_text() {
        assert_eq!(capitalize("one two", 7).unwrap(), "one. Two");
    }

    #[test]
    fn test_trailing_boundary_has_nothing_to_uppercase() {
        assert_eq!(capitalize("one two ", 8).unwrap(), "one two. ");
    }

    #[test]
    fn test_accented_first_letter() {
        assert_eq!(
            capitalize("c'est fini été revient", "c'est fini ".len() + 2).unwrap(),
            "c'est fini. Été revient"
        );
    }

    #[test]
    fn test_scan_stops_at_boundary_or_start() {
        assert_eq!(scan_back("it ends there here", 16), SentenceStart::Boundary(13));
        assert_eq!(scan_back("one\ntwo", 7), SentenceStart::Boundary(3));
        assert_eq!(scan_back("été", 3), SentenceStart::TextStart);
        assert_eq!(scan_back(" lead", 0), SentenceStart::TextStart);
    }

    #[test]
    fn test_invalid_offsets() {
        assert_eq!(
            capitalize("short", 6),
            Err(TextError::InvalidOffset { offset: 6, len: 5 })
        );
        // Inside the two-byte 'é'.
        assert_eq!(
            capitalize("é", 1),
            Err(TextError::InvalidOffset { offset: 1, len: 2 })
        );
    }

    #[test]
    fn test_caret_with_selection_is_ignored() {
        assert_eq!(capitalize_at_caret("it ends there here", 14..18).unwrap(), None);
        assert_eq!(
            capitalize_at_caret("it ends there here", 16..16).unwrap(),
            Some("it ends there. Here".to_string())
        );
    }
}
