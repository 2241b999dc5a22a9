//! Caption text editing core: line-wrap tolerant find and replace, word-list
//! preprocessing and cursor-relative sentence capitalization.
//!
//! Everything here is pure. The host (the caption editor integration) reads
//! the editable regions, calls in, and writes the results back.

pub mod buffer;
pub mod dictionary;
pub mod hotkey;
pub mod replace;
pub mod settings;
pub mod text;

pub use buffer::TextBuffer;
pub use dictionary::{DictionaryError, ReplacementRule, WordList};
pub use hotkey::{should_trigger, DoublePressConfig, DoublePressDetector, PressState};
pub use replace::{replace, replace_text, ExpressionReplacer, MatchResult, ReplaceError};
pub use settings::{ReplacerSettings, SearchOptions, SettingsError};
pub use text::{capitalize, capitalize_at_caret, TextError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Replace(#[from] ReplaceError),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// Message sent by the popup form: either one search/replace or a "preprocess" run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceRequest {
    #[serde(default)]
    pub search_expression: Option<String>,
    #[serde(default)]
    pub replacement_expression: Option<String>,
    #[serde(default)]
    pub options: SearchOptions,
    #[serde(default)]
    pub preprocess: bool,
}

/// Reply sent back to the popup once the buffers are updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceResponse {
    data: &'static str,
    pub number_of_matches_replaced: usize,
}

impl ReplaceResponse {
    pub fn new(number_of_matches_replaced: usize) -> Self {
        Self {
            data: "done",
            number_of_matches_replaced,
        }
    }
}

/// Run a popup request against the caption buffers.
///
/// A preprocess request applies the whole word list in order. A plain request
/// needs both expressions to be non-empty, otherwise nothing happens.
pub fn handle_request<B: TextBuffer>(
    request: &ReplaceRequest,
    buffers: &mut [B],
    words_list: &WordList,
) -> Result<ReplaceResponse, RequestError> {
    if request.preprocess {
        let count = words_list.apply(buffers, request.options)?;
        return Ok(ReplaceResponse::new(count));
    }

    let search = request.search_expression.as_deref().unwrap_or_default();
    let replacement = request.replacement_expression.as_deref().unwrap_or_default();
    if search.is_empty() || replacement.is_empty() {
        log::debug!("Ignoring request without search or replacement expression");
        return Ok(ReplaceResponse::new(0));
    }

    let count = replace(buffers, search, replacement, request.options)?;
    Ok(ReplaceResponse::new(count))
}
