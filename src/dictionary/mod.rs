use crate::buffer::TextBuffer;
use crate::replace::{ExpressionReplacer, ReplaceError};
use crate::settings::SearchOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Replacement failed for {search:?}: {source}")]
    Replace {
        search: String,
        #[source]
        source: ReplaceError,
    },
    #[error("Rule not found at index {0}")]
    NotFound(usize),
}

/// One search/replacement pair. Stored by the host as `[search, replacement]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ReplacementRule {
    pub search: String,
    pub replacement: String,
}

impl ReplacementRule {
    pub fn new(search: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replacement: replacement.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.search.is_empty() && self.replacement.is_empty()
    }
}

impl From<(String, String)> for ReplacementRule {
    fn from((search, replacement): (String, String)) -> Self {
        Self {
            search,
            replacement,
        }
    }
}

impl From<ReplacementRule> for (String, String) {
    fn from(rule: ReplacementRule) -> Self {
        (rule.search, rule.replacement)
    }
}

/// Ordered list of rules applied by the "preprocess" action.
///
/// Rows where both sides are empty are dropped, the way the options page never
/// saves an untouched line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "Vec<ReplacementRule>", into = "Vec<ReplacementRule>")]
pub struct WordList {
    rules: Vec<ReplacementRule>,
}

impl From<Vec<ReplacementRule>> for WordList {
    fn from(rules: Vec<ReplacementRule>) -> Self {
        Self {
            rules: rules.into_iter().filter(|r| !r.is_blank()).collect(),
        }
    }
}

impl From<WordList> for Vec<ReplacementRule> {
    fn from(list: WordList) -> Self {
        list.rules
    }
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, R)>,
        S: Into<String>,
        R: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(search, replacement)| ReplacementRule::new(search, replacement))
            .collect::<Vec<_>>()
            .into()
    }

    /// Appends a rule. Blank rules are ignored; returns whether it was kept.
    pub fn push(&mut self, rule: ReplacementRule) -> bool {
        if rule.is_blank() {
            return false;
        }
        self.rules.push(rule);
        true
    }

    pub fn remove(&mut self, index: usize) -> Result<ReplacementRule, DictionaryError> {
        if index >= self.rules.len() {
            return Err(DictionaryError::NotFound(index));
        }
        Ok(self.rules.remove(index))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReplacementRule> {
        self.rules.iter()
    }

    /// Apply every rule, in list order, across the same buffers.
    ///
    /// Each rule sees what the previous rules left behind. Returns the total
    /// number of matches replaced.
    pub fn apply<B: TextBuffer>(
        &self,
        buffers: &mut [B],
        options: SearchOptions,
    ) -> Result<usize, DictionaryError> {
        let mut total = 0;

        for rule in &self.rules {
            let count = apply_rule(rule, buffers, options).map_err(|source| {
                DictionaryError::Replace {
                    search: rule.search.clone(),
                    source,
                }
            })?;
            total += count;
        }

        log::info!(
            "Applied {} replacement rules to {} buffer(s): {} match(es)",
            self.rules.len(),
            buffers.len(),
            total
        );
        Ok(total)
    }
}

fn apply_rule<B: TextBuffer>(
    rule: &ReplacementRule,
    buffers: &mut [B],
    options: SearchOptions,
) -> Result<usize, ReplaceError> {
    let replacer = ExpressionReplacer::new(&rule.search, &rule.replacement, options)?;
    let count = replacer.replace_buffers(buffers)?;
    if count > 0 {
        log::debug!("Rule {:?} -> {:?}: {} match(es)", rule.search, rule.replacement, count);
    }
    Ok(count)
}
