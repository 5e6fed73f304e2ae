//! Comment stripping for C-family source text.
//!
//! Removes `//` line comments and `/* */` block comments in a single pass
//! while leaving string literals, regular-expression literals and preserved
//! `/*!` / `/*@` comments untouched. The main entry point is
//! [`strip_comments`]; [`scan`] exposes the kept fragments and the comments
//! found, for tooling that needs more than the stripped string.
//!
//! ```
//! use uncomment_core::{StripOptions, strip_comments};
//!
//! let out = strip_comments("a(); // call\nb();", &StripOptions::default());
//! assert_eq!(out, "a(); \nb();");
//! ```

#![warn(missing_docs)]

/// Fragment assembly and blank-line normalization.
pub mod normalize;
/// Stripping and normalization options.
pub mod options;
/// The single-pass lexical scanner.
pub mod scanner;

pub use normalize::{assemble, normalize_blank_lines};
pub use options::{BlankLines, RegexPolicy, StripOptions};
pub use scanner::{Comment, CommentKind, Scan, Span, scan};

/// Strip comments from `text`.
///
/// Never fails: unterminated strings, regular expressions and comments are
/// handled on a best-effort basis (see [`scan`]).
#[must_use]
pub fn strip_comments(text: &str, options: &StripOptions) -> String {
    let stripped = assemble(scan(text, options).fragments());
    match options.blank_lines() {
        BlankLines::Keep => stripped,
        mode => normalize_blank_lines(&stripped, mode),
    }
}

/// [`strip_comments`] with default options.
#[must_use]
pub fn strip_comments_default(text: &str) -> String {
    strip_comments(text, &StripOptions::default())
}
