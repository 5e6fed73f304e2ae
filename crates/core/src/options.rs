//! Options controlling how comments are classified and how the stripped
//! output is post-processed.

use serde::{Deserialize, Serialize};

/// Rule used to decide whether a `/` in code opens a regular-expression
/// literal or is a division (or other) operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegexPolicy {
    /// A `/` opens a regular expression when the last significant character
    /// of code is one of `( , = : [ ! & | ? { } ; /`. A `/` with nothing
    /// significant before it is an operator.
    #[default]
    TokenContext,
    /// A `/` opens a regular expression unless the character after it is
    /// whitespace or `=`.
    Whitespace,
}

impl RegexPolicy {
    /// Canonical name of the policy, as written in options files.
    pub fn name(self) -> &'static str {
        match self {
            RegexPolicy::TokenContext => "token-context",
            RegexPolicy::Whitespace => "whitespace",
        }
    }
}

/// Blank-line handling applied after comments have been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankLines {
    /// Leave line breaks exactly as they are.
    Keep,
    /// Collapse every run of line breaks to a single break.
    Remove,
    /// Collapse every run of line breaks to one blank line.
    Merge,
}

/// Options for [`strip_comments`](crate::strip_comments).
///
/// Deserializes from a camelCase object where every key is optional:
///
/// ```
/// let opts: uncomment_core::StripOptions =
///     serde_json::from_str(r#"{ "mergeEmptyLines": true }"#).unwrap();
/// assert!(opts.merge_empty_lines);
/// assert!(!opts.remove_empty_lines);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StripOptions {
    /// Collapse blank-line runs left behind by comment removal to nothing.
    pub remove_empty_lines: bool,
    /// Collapse blank-line runs to exactly one blank line. Wins over
    /// `remove_empty_lines` when both are set.
    pub merge_empty_lines: bool,
    /// Division-versus-regular-expression rule.
    pub regex_policy: RegexPolicy,
    /// Treat backticks as simple string quotes. Interpolations inside them are
    /// not understood.
    pub backtick_strings: bool,
}

impl StripOptions {
    /// Resolve the two blank-line booleans into a single mode.
    pub fn blank_lines(&self) -> BlankLines {
        if self.merge_empty_lines {
            BlankLines::Merge
        } else if self.remove_empty_lines {
            BlankLines::Remove
        } else {
            BlankLines::Keep
        }
    }

    /// Whether `c` opens a string literal under these options.
    pub(crate) fn is_quote(&self, c: char) -> bool {
        c == '"' || c == '\'' || (self.backtick_strings && c == '`')
    }
}
