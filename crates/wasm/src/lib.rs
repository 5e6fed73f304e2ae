//! WASM bindings for uncomment.
//!
//! Exposes comment stripping and comment listing to JavaScript via
//! `wasm-bindgen`. Options and results cross the boundary as plain JS
//! objects through `serde-wasm-bindgen`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use uncomment_core::{CommentKind, StripOptions, scan, strip_comments};

// ── Public API ──────────────────────────────────────────────────────────

/// Strip comments from `text`.
///
/// `options` may be `undefined`, `null`, or an object with any of
/// `removeEmptyLines`, `mergeEmptyLines`, `regexPolicy`
/// (`"token-context"` | `"whitespace"`) and `backtickStrings`.
#[wasm_bindgen]
pub fn uncomment(text: &str, options: JsValue) -> Result<String, JsError> {
    let options = options_from_js(options)?;
    Ok(strip_comments(text, &options))
}

/// List the comments in `text` as `{ kind, start, end, preserved, text }`
/// objects. Offsets are UTF-8 byte offsets.
#[wasm_bindgen]
pub fn comments(text: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options = options_from_js(options)?;
    let result = scan(text, &options);
    let list: Vec<JsComment<'_>> = result
        .comments()
        .iter()
        .map(|c| JsComment {
            kind: c.kind,
            start: c.span.start,
            end: c.span.end,
            preserved: c.preserved,
            text: c.text(text),
        })
        .collect();
    to_js(&list)
}

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct JsComment<'a> {
    kind: CommentKind,
    start: usize,
    end: usize,
    preserved: bool,
    text: &'a str,
}

fn options_from_js(value: JsValue) -> Result<StripOptions, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(StripOptions::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("invalid options: {e}")))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}
