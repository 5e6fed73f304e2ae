//! Single-pass lexical scanner.
//!
//! Walks the source one `char` at a time and tracks which lexical mode is
//! active: plain code, a string literal, a regular-expression literal, a line
//! comment or a block comment. Content outside of discarded comments is
//! recorded as kept byte ranges, so the stripped text can be reassembled
//! without copying until the very end.

use serde::Serialize;
use tracing::{debug, trace};

use crate::options::{RegexPolicy, StripOptions};

/// Characters after which a `/` begins a regular expression under
/// [`RegexPolicy::TokenContext`].
const REGEX_PRECEDERS: &[char] = &[
    '(', ',', '=', ':', '[', '!', '&', '|', '?', '{', '}', ';', '/',
];

/// Half-open byte range `start..end` into the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Syntactic form of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    /// `// ...` up to (not including) the next line break.
    Line,
    /// `/* ... */`, possibly spanning lines.
    Block,
}

/// A comment found during the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Line or block comment.
    pub kind: CommentKind,
    /// Bytes covered by the comment, delimiters included. An unterminated
    /// comment runs to the end of the input.
    pub span: Span,
    /// `true` for `/*!` and `/*@` comments, which stay in the output.
    pub preserved: bool,
}

impl Comment {
    /// Borrow the comment's text from the source it was scanned from.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }
}

/// Lexical mode of the scanner at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    String { quote: char },
    RegExp { in_class: bool },
    LineComment,
    BlockComment { preserve: bool },
}

/// Result of scanning one input: the kept ranges and every comment seen.
#[derive(Debug, Clone)]
pub struct Scan<'a> {
    source: &'a str,
    kept: Vec<Span>,
    comments: Vec<Comment>,
}

impl<'a> Scan<'a> {
    /// Byte ranges of the kept fragments, in source order.
    pub fn kept_spans(&self) -> &[Span] {
        &self.kept
    }

    /// Kept fragments as borrowed slices of the source, in order.
    pub fn fragments(&self) -> impl Iterator<Item = &'a str> + '_ {
        let source = self.source;
        self.kept.iter().map(move |s| &source[s.start..s.end])
    }

    /// Every comment found, preserved ones included, in source order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Total number of bytes kept.
    pub fn kept_len(&self) -> usize {
        self.kept.iter().map(Span::len).sum()
    }

    /// Total number of bytes discarded.
    pub fn removed_len(&self) -> usize {
        self.source.len() - self.kept_len()
    }

}

/// Scan `text`, splitting it into kept fragments and comments.
pub fn scan<'a>(text: &'a str, options: &StripOptions) -> Scan<'a> {
    Scanner::new(text, options).run()
}

struct Scanner<'a, 'o> {
    text: &'a str,
    chars: Vec<(usize, char)>,
    options: &'o StripOptions,
    mode: Mode,
    /// Byte offset where the pending kept fragment starts.
    index: usize,
    /// Byte offset of the comment currently being scanned.
    comment_start: usize,
    /// Last non-whitespace character outside of comments.
    prev_significant: Option<char>,
    /// Number of consecutive backslashes directly before the current char.
    backslashes: usize,
    kept: Vec<Span>,
    comments: Vec<Comment>,
}

impl<'a, 'o> Scanner<'a, 'o> {
    fn new(text: &'a str, options: &'o StripOptions) -> Self {
        Self {
            text,
            chars: text.char_indices().collect(),
            options,
            mode: Mode::Code,
            index: 0,
            comment_start: 0,
            prev_significant: None,
            backslashes: 0,
            kept: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Byte offset of the char at position `i`, or the end of the text.
    fn offset(&self, i: usize) -> usize {
        self.chars.get(i).map_or(self.text.len(), |&(at, _)| at)
    }

    fn in_comment(&self) -> bool {
        matches!(self.mode, Mode::LineComment | Mode::BlockComment { .. })
    }

    fn char_at(&self, i: usize) -> Option<char> {
        self.chars.get(i).map(|&(_, c)| c)
    }

    fn run(mut self) -> Scan<'a> {
        let mut i = 0usize;
        while i < self.chars.len() {
            let c = self.chars[i].1;
            let escaped = self.backslashes % 2 == 1;
            let was_comment = self.in_comment();

            let step = match self.mode {
                Mode::Code => self.step_code(i, c),
                Mode::String { quote } => {
                    if c == quote && !escaped {
                        self.transition(Mode::Code, i);
                    }
                    1
                }
                Mode::RegExp { in_class } => {
                    self.step_regexp(i, c, in_class, escaped);
                    1
                }
                Mode::LineComment => self.step_line_comment(i),
                Mode::BlockComment { preserve } => self.step_block_comment(i, c, preserve),
            };

            // Comment delimiters and bodies never count as code context.
            if !was_comment && !self.in_comment() && !c.is_whitespace() {
                self.prev_significant = Some(c);
            }

            self.backslashes = if step == 1 && c == '\\' {
                self.backslashes + 1
            } else {
                0
            };
            i += step;
        }
        self.finish()
    }

    fn step_code(&mut self, i: usize, c: char) -> usize {
        if self.options.is_quote(c) {
            self.transition(Mode::String { quote: c }, i);
            return 1;
        }
        if c != '/' {
            return 1;
        }
        match self.char_at(i + 1) {
            Some('*') => {
                let preserve = matches!(self.char_at(i + 2), Some('@' | '!'));
                self.open_comment(i, !preserve);
                self.transition(Mode::BlockComment { preserve }, i);
                // The opening `*` must not double as a closing one.
                2
            }
            Some('/') => {
                self.open_comment(i, true);
                self.transition(Mode::LineComment, i);
                1
            }
            next => {
                if self.opens_regex(next) {
                    self.transition(Mode::RegExp { in_class: false }, i);
                }
                1
            }
        }
    }

    fn step_regexp(&mut self, i: usize, c: char, in_class: bool, escaped: bool) {
        if escaped {
            return;
        }
        match c {
            '[' => self.mode = Mode::RegExp { in_class: true },
            ']' if in_class => self.mode = Mode::RegExp { in_class: false },
            '/' if !in_class => self.transition(Mode::Code, i),
            _ => {}
        }
    }

    fn step_line_comment(&mut self, i: usize) -> usize {
        if matches!(self.char_at(i + 1), Some('\n' | '\r')) {
            let end = self.offset(i + 1);
            self.close_comment(CommentKind::Line, end, false);
            self.transition(Mode::Code, i);
        }
        1
    }

    fn step_block_comment(&mut self, i: usize, c: char, preserve: bool) -> usize {
        if c == '*' && self.char_at(i + 1) == Some('/') {
            let end = self.offset(i + 2);
            self.close_comment(CommentKind::Block, end, preserve);
            self.transition(Mode::Code, i);
            // Skip the closing `/` so it is not read as a regex or comment start.
            return 2;
        }
        1
    }

    fn opens_regex(&self, next: Option<char>) -> bool {
        match self.options.regex_policy {
            RegexPolicy::TokenContext => self
                .prev_significant
                .is_some_and(|p| REGEX_PRECEDERS.contains(&p)),
            RegexPolicy::Whitespace => next.is_some_and(|n| !n.is_whitespace() && n != '='),
        }
    }

    /// Record the start of a comment. When the comment will be discarded, the
    /// content before it is flushed as a kept fragment.
    fn open_comment(&mut self, i: usize, discard: bool) {
        let at = self.offset(i);
        self.comment_start = at;
        if discard {
            self.push_kept(at);
            self.index = at;
        }
    }

    fn close_comment(&mut self, kind: CommentKind, end: usize, preserved: bool) {
        self.comments.push(Comment {
            kind,
            span: Span::new(self.comment_start, end),
            preserved,
        });
        if !preserved {
            self.index = end;
        }
    }

    fn push_kept(&mut self, end: usize) {
        let span = Span::new(self.index, end);
        if !span.is_empty() {
            self.kept.push(span);
        }
    }

    fn transition(&mut self, to: Mode, i: usize) {
        trace!(offset = self.offset(i), from = ?self.mode, to = ?to, "mode transition");
        self.mode = to;
    }

    fn finish(mut self) -> Scan<'a> {
        let len = self.text.len();
        match self.mode {
            Mode::Code => self.push_kept(len),
            Mode::String { .. } | Mode::RegExp { .. } => {
                debug!(mode = ?self.mode, "input ends inside an unterminated literal");
                self.push_kept(len);
            }
            Mode::LineComment => self.close_comment(CommentKind::Line, len, false),
            Mode::BlockComment { preserve } => {
                debug!(preserve, "input ends inside an unterminated block comment");
                self.close_comment(CommentKind::Block, len, preserve);
                if preserve {
                    self.push_kept(len);
                }
            }
        }

        let scan = Scan {
            source: self.text,
            kept: self.kept,
            comments: self.comments,
        };
        debug!(
            bytes = len,
            fragments = scan.kept.len(),
            comments = scan.comments.len(),
            removed = scan.removed_len(),
            "scan complete"
        );
        scan
    }
}
