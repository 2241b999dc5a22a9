use crate::dictionary::WordList;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Per-call search flags, fed from the popup's "case insensitive" toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    #[serde(default, alias = "insensitiveSearch")]
    pub case_insensitive: bool,
}

impl SearchOptions {
    pub fn case_insensitive() -> Self {
        Self {
            case_insensitive: true,
        }
    }
}

/// User preferences as persisted by the host.
///
/// Only the shape lives here; where the JSON is stored is the host's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReplacerSettings {
    #[serde(default)]
    pub words_list: WordList,
    #[serde(default)]
    pub options: SearchOptions,
}

impl ReplacerSettings {
    pub fn from_json(contents: &str) -> Result<Self, SettingsError> {
        let settings: ReplacerSettings = serde_json::from_str(contents)?;
        log::debug!(
            "Settings loaded: {} replacement rules, case insensitive: {}",
            settings.words_list.len(),
            settings.options.case_insensitive
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
