//! Fragment assembly and blank-line normalization.

use crate::options::BlankLines;

/// Concatenate kept fragments, in order, into one string.
pub fn assemble<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    fragments.into_iter().collect()
}

/// Apply blank-line normalization to already stripped text.
///
/// For [`BlankLines::Remove`] and [`BlankLines::Merge`], lines made only of
/// spaces and tabs are dropped first, then every run of two or more line
/// breaks is replaced by the last break of the run, once or twice
/// respectively. [`BlankLines::Keep`] returns the text unchanged.
pub fn normalize_blank_lines(text: &str, mode: BlankLines) -> String {
    match mode {
        BlankLines::Keep => text.to_string(),
        BlankLines::Remove => collapse_line_breaks(&drop_whitespace_lines(text), 1),
        BlankLines::Merge => collapse_line_breaks(&drop_whitespace_lines(text), 2),
    }
}

/// Length in bytes of the line break starting at byte `i`, if any.
/// `\r\n` counts as one break.
fn line_break_at(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes.get(i) {
        Some(b'\r') if bytes.get(i + 1) == Some(&b'\n') => Some(2),
        Some(b'\r' | b'\n') => Some(1),
        _ => None,
    }
}

fn is_horizontal_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Drop every line consisting of one or more spaces/tabs followed by a line
/// break. A whitespace-only final line without a break is kept.
fn drop_whitespace_lines(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut start = 0usize;

    while start < bytes.len() {
        let mut end = start;
        while end < bytes.len() && line_break_at(bytes, end).is_none() {
            end += 1;
        }
        let brk = line_break_at(bytes, end).unwrap_or(0);
        let line = &bytes[start..end];
        let blank = !line.is_empty() && line.iter().copied().all(is_horizontal_space);
        if !(blank && brk > 0) {
            out.push_str(&text[start..end + brk]);
        }
        start = end + brk;
    }
    out
}

/// Replace each run of two or more line breaks with its last break repeated
/// `repeat` times. Single breaks are left alone.
fn collapse_line_breaks(text: &str, repeat: usize) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        let Some(first) = line_break_at(bytes, i) else {
            i += 1;
            continue;
        };
        let run_start = i;
        let mut last = &text[i..i + first];
        let mut count = 1usize;
        i += first;
        while let Some(n) = line_break_at(bytes, i) {
            last = &text[i..i + n];
            count += 1;
            i += n;
        }
        if count >= 2 {
            out.push_str(&text[copied..run_start]);
            for _ in 0..repeat {
                out.push_str(last);
            }
            copied = i;
        }
    }
    out.push_str(&text[copied..]);
    out
}
