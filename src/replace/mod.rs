//! Whole-word find and replace over caption buffers, tolerant of line wraps.

mod pattern;

pub use pattern::RobustPattern;

use crate::buffer::TextBuffer;
use crate::settings::SearchOptions;
use std::borrow::Cow;
use thiserror::Error;

/// Errors from compiling or running a search pattern.
///
/// Escaped input always compiles, but matching is backtracking: a search with
/// spaces run against a very long whitespace run (hundreds of thousands of
/// spaces after the first word) exceeds the engine's backtrack stack and is
/// reported as `Pattern` instead of a match.
#[derive(Error, Debug)]
pub enum ReplaceError {
    #[error("Pattern error: {0}")]
    Pattern(#[from] fancy_regex::Error),
}

/// Outcome of replacing inside a single piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub updated_text: String,
    pub match_count: usize,
}

/// A compiled search/replacement pair, reusable across buffers.
#[derive(Debug)]
pub struct ExpressionReplacer {
    pattern: Option<RobustPattern>,
    replacement: String,
}

impl ExpressionReplacer {
    pub fn new(search: &str, replacement: &str, options: SearchOptions) -> Result<Self, ReplaceError> {
        let pattern = RobustPattern::new(search, options.case_insensitive)?;
        if pattern.is_none() {
            log::debug!("Blank search expression, nothing will be replaced");
        }

        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }

    /// Replace every whole-word match in `text`.
    ///
    /// The replacement is inserted verbatim: `$1` and friends are not expanded.
    pub fn replace_text(&self, text: &str) -> Result<MatchResult, ReplaceError> {
        let Some(pattern) = &self.pattern else {
            return Ok(unchanged(text));
        };

        let mut updated = String::with_capacity(text.len());
        let mut copied_up_to = 0;
        let mut search_from = 0;
        let mut match_count = 0;

        while search_from <= text.len() {
            let Some(found) = pattern.regex().find_from_pos(text, search_from)? else {
                break;
            };

            if found.start() == found.end() {
                search_from = next_char_boundary(text, found.end());
                continue;
            }

            let (end, replacement) = if found.as_str().contains('\n') {
                self.stitch(pattern, text, found.start(), found.end())?
            } else {
                (found.end(), Cow::Borrowed(self.replacement.as_str()))
            };

            updated.push_str(&text[copied_up_to..found.start()]);
            updated.push_str(&replacement);
            copied_up_to = end;
            search_from = end;
            match_count += 1;
        }

        if match_count == 0 {
            return Ok(unchanged(text));
        }

        updated.push_str(&text[copied_up_to..]);
        Ok(MatchResult {
            updated_text: updated,
            match_count,
        })
    }

    /// Replace in every buffer, in order. Buffers without a match are not written to.
    pub fn replace_buffers<B: TextBuffer>(&self, buffers: &mut [B]) -> Result<usize, ReplaceError> {
        let mut total = 0;

        for buffer in buffers.iter_mut() {
            let result = self.replace_text(buffer.text())?;
            if result.match_count > 0 {
                buffer.set_text(result.updated_text);
                total += result.match_count;
            }
        }

        Ok(total)
    }

    /// A match that crosses a line break is folded onto one line: the character
    /// right after it (unless it is a plain space) moves up with the replacement,
    /// a newline follows, and the spaces that led the next line are dropped.
    ///
    /// Returns where the consumed fragment ends and what to put in its place.
    fn stitch<'a>(
        &'a self,
        pattern: &RobustPattern,
        text: &str,
        start: usize,
        end: usize,
    ) -> Result<(usize, Cow<'a, str>), ReplaceError> {
        let Some(trailing) = text[end..].chars().next() else {
            // Nothing follows the match, so there is no next line to fold.
            return Ok((end, Cow::Borrowed(self.replacement.as_str())));
        };

        let stitched = pattern.stitched(trailing)?;
        let end = match stitched.find_from_pos(text, start)? {
            Some(widened) if widened.start() == start => widened.end(),
            _ => {
                log::warn!("Line-wrapped match at {} could not be widened", start);
                return Ok((end, Cow::Borrowed(self.replacement.as_str())));
            }
        };

        let mut replacement = self.replacement.clone();
        if trailing != ' ' {
            replacement.push(trailing);
        }
        replacement.push('\n');

        log::trace!("Stitched line-wrapped match at {}..{}", start, end);
        Ok((end, Cow::Owned(replacement)))
    }
}

/// Replace `search` with `replacement` across `buffers`.
///
/// Returns the number of matches replaced over all buffers.
pub fn replace<B: TextBuffer>(
    buffers: &mut [B],
    search: &str,
    replacement: &str,
    options: SearchOptions,
) -> Result<usize, ReplaceError> {
    let replacer = ExpressionReplacer::new(search, replacement, options)?;
    let count = replacer.replace_buffers(buffers)?;

    log::debug!(
        "Replaced {:?} with {:?} in {} buffer(s): {} match(es)",
        search,
        replacement,
        buffers.len(),
        count
    );
    Ok(count)
}

/// Single-text convenience wrapper around [`ExpressionReplacer`].
pub fn replace_text(
    text: &str,
    search: &str,
    replacement: &str,
    options: SearchOptions,
) -> Result<MatchResult, ReplaceError> {
    ExpressionReplacer::new(search, replacement, options)?.replace_text(text)
}

fn unchanged(text: &str) -> MatchResult {
    MatchResult {
        updated_text: text.to_string(),
        match_count: 0,
    }
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    text[index..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| index + c.len_utf8())
}
