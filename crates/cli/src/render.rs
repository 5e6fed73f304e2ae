//! Output rendering for the CLI.
//!
//! Comment listings go to stdout, one line per comment in pretty mode or as a
//! JSON array otherwise. `--annotate` additionally renders an ariadne report
//! that underlines every comment in its source context.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind, Source};
use serde::Serialize;
use uncomment_core::{Comment, CommentKind};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Human-readable terminal output.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or detect from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            // Default: pretty for interactive terminals, JSON for pipes
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Comment listing ─────────────────────────────────────────────────────

/// One comment as reported by `uncomment comments`.
#[derive(Debug, Serialize)]
pub(crate) struct CommentReport<'a> {
    pub(crate) kind: CommentKind,
    pub(crate) start: usize,
    pub(crate) end: usize,
    /// 1-based line of the comment start.
    pub(crate) line: usize,
    /// 1-based column of the comment start, in chars.
    pub(crate) column: usize,
    pub(crate) preserved: bool,
    pub(crate) text: &'a str,
}

impl<'a> CommentReport<'a> {
    pub(crate) fn new(source: &'a str, comment: &Comment) -> Self {
        let (line, column) = line_col(source, comment.span.start);
        Self {
            kind: comment.kind,
            start: comment.span.start,
            end: comment.span.end,
            line,
            column,
            preserved: comment.preserved,
            text: comment.text(source),
        }
    }
}

/// 1-based line and char column of byte `offset`. `\r\n`, `\n` and a lone
/// `\r` each end a line.
pub(crate) fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let mut line = 1usize;
    let mut line_start = 0usize;
    let bytes = before.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        let ends_line = b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n'));
        if ends_line {
            line += 1;
            line_start = i + 1;
        }
    }
    (line, before[line_start..].chars().count() + 1)
}

fn kind_name(kind: CommentKind) -> &'static str {
    match kind {
        CommentKind::Line => "line",
        CommentKind::Block => "block",
    }
}

/// First line of a comment, for one-line listings.
fn preview(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// Print the comment listing in the given format.
pub(crate) fn render_comments(
    filename: &str,
    reports: &[CommentReport<'_>],
    format: Format,
) -> serde_json::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        Format::Pretty => {
            for r in reports {
                let action = if r.preserved { "preserved" } else { "removed" };
                println!(
                    "{filename}:{}:{}: {} comment ({action}): {}",
                    r.line,
                    r.column,
                    kind_name(r.kind),
                    preview(r.text)
                );
            }
        }
    }
    Ok(())
}

/// Render all comments as one ariadne report on stderr, underlining removed
/// comments in red and preserved ones in green.
pub(crate) fn render_annotated(source: &str, filename: &str, comments: &[Comment]) {
    let Some(first) = comments.first() else {
        return;
    };

    let config = Config::default()
        .with_compact(false)
        .with_color(io::stderr().is_terminal())
        .with_index_type(IndexType::Byte);
    let mut cache = (filename, Source::from(source));

    let mut builder = Report::build(
        ReportKind::Advice,
        (filename, first.span.start..first.span.end),
    )
    .with_message(format!("{} comment(s) found", comments.len()))
    .with_config(config);

    for c in comments {
        let (msg, color) = if c.preserved {
            ("preserved", Color::Green)
        } else {
            ("removed", Color::Red)
        };
        builder = builder.with_label(
            Label::new((filename, c.span.start..c.span.end))
                .with_message(format!("{} comment, {msg}", kind_name(c.kind)))
                .with_color(color),
        );
    }

    builder.finish().eprint(&mut cache).ok();
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary of removed and preserved counts to stderr.
///
/// Example: `3 removed, 1 preserved`
pub(crate) fn print_summary(comments: &[Comment]) {
    if comments.is_empty() {
        eprintln!("no comments");
        return;
    }
    let preserved = comments.iter().filter(|c| c.preserved).count();
    let removed = comments.len() - preserved;
    eprintln!(
        "{}, {}",
        format!("{removed} removed").fg(Color::Red),
        format!("{preserved} preserved").fg(Color::Green)
    );
}
