//! Pattern construction for caption search expressions.
//!
//! Two phases: the base pattern finds the expression anywhere it may have been
//! wrapped, and a stitched pattern is built from it once a match is known to
//! straddle a line break.

use fancy_regex::Regex;

/// ASCII letters plus Latin-1 Supplement / Latin Extended-A letters.
/// `\b` is not enough: it would split "événements" depending on the engine.
const LETTER_CLASS: &str = "[A-Za-z\u{00C0}-\u{017F}]";

/// Stand-in for a literal space: any run of spaces and line breaks, including none.
const WRAPPED_SPACE: &str = "[ \\n]*";

/// A literal search expression compiled so it tolerates line-wrap whitespace.
#[derive(Debug)]
pub struct RobustPattern {
    /// Escaped expression, spaces widened, without boundary assertions.
    body: String,
    case_insensitive: bool,
    regex: Regex,
}

impl RobustPattern {
    /// Returns `None` when the expression has nothing to match (empty or only spaces).
    pub fn new(search: &str, case_insensitive: bool) -> Result<Option<Self>, fancy_regex::Error> {
        if search.chars().all(|c| c == ' ') {
            return Ok(None);
        }

        let body = search
            .split(' ')
            .map(|word| fancy_regex::escape(word).into_owned())
            .collect::<Vec<_>>()
            .join(WRAPPED_SPACE);

        let pattern = format!(
            "{}(?<!{letters}){}(?!{letters})",
            flags(case_insensitive),
            body,
            letters = LETTER_CLASS
        );
        let regex = Regex::new(&pattern)?;

        Ok(Some(Self {
            body,
            case_insensitive,
            regex,
        }))
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Pattern used once a match spans a line break: the expression followed by
    /// `trailing` and any spaces after it, so the whole fragment can be folded
    /// onto one line.
    pub fn stitched(&self, trailing: char) -> Result<Regex, fancy_regex::Error> {
        let mut buf = [0u8; 4];
        let pattern = format!(
            "{}(?<!{}){}{}[ ]*",
            flags(self.case_insensitive),
            LETTER_CLASS,
            self.body,
            fancy_regex::escape(trailing.encode_utf8(&mut buf))
        );
        Regex::new(&pattern)
    }
}

fn flags(case_insensitive: bool) -> &'static str {
    if case_insensitive {
        "(?i)"
    } else {
        ""
    }
}
