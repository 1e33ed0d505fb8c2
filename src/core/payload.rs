// src/core/payload.rs
//! Pull the server-streamed JSON array out of a page.
//!
//! The site's SSR stream writes its route data as a JS string literal:
//!
//! ```text
//! window.__reactRouterContext.streamController.enqueue("[{\"_1\":2},\"root\",...]");
//! ```
//!
//! We find every such call, undo one layer of JS string escaping, and parse the
//! result with `serde_json`. Only candidates that parse to a top-level array count.
//! No guessing: zero candidates or several different ones is `NotFound`.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotFound {
    #[error("no streamController.enqueue(...) call in page")]
    NoMatch,
    #[error("{0} different payload arrays in page")]
    Ambiguous(usize),
    #[error("bad escape sequence in payload literal")]
    BadEscape,
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload JSON is not an array")]
    NotArray,
}

fn enqueue_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)window\.__reactRouterContext\.streamController\.enqueue\(\s*"((?:[^"\\]|\\.)*)"\s*\)\s*;"#,
        )
        .expect("static regex")
    })
}

/// Locate and decode the page's payload array.
pub fn extract(markup: &str) -> Result<Vec<Value>, NotFound> {
    let mut first_err: Option<NotFound> = None;
    let mut found: Vec<Vec<Value>> = Vec::new();

    for caps in enqueue_re().captures_iter(markup) {
        let literal = caps.get(1).map_or("", |m| m.as_str());
        match decode_literal(literal) {
            Ok(arr) => {
                if !found.contains(&arr) {
                    found.push(arr);
                }
            }
            Err(e) => {
                logd!("payload candidate rejected: {e}");
                first_err.get_or_insert(e);
            }
        }
    }

    match found.len() {
        1 => Ok(found.remove(0)),
        0 => Err(first_err.unwrap_or(NotFound::NoMatch)),
        n => Err(NotFound::Ambiguous(n)),
    }
}

fn decode_literal(literal: &str) -> Result<Vec<Value>, NotFound> {
    let text = unescape_js(literal).ok_or(NotFound::BadEscape)?;
    match serde_json::from_str::<Value>(&text)? {
        Value::Array(arr) => Ok(arr),
        _ => Err(NotFound::NotArray),
    }
}

/// Reverse one layer of JS string escaping.
/// `None` on a truncated or malformed `\u` / `\x` sequence.
pub fn unescape_js(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            '0' => out.push('\0'),
            'x' => {
                let code = hex_n(&mut chars, 2)?;
                out.push(char::from_u32(code)?);
            }
            'u' => {
                let hi = hex_n(&mut chars, 4)?;
                if (0xD800..0xDC00).contains(&hi) {
                    // surrogate pair: must be followed by \uDC00..DFFF
                    if chars.next()? != '\\' || chars.next()? != 'u' {
                        return None;
                    }
                    let lo = hex_n(&mut chars, 4)?;
                    if !(0xDC00..0xE000).contains(&lo) {
                        return None;
                    }
                    let code = 0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00);
                    out.push(char::from_u32(code)?);
                } else {
                    out.push(char::from_u32(hi)?);
                }
            }
            // line continuation
            '\n' => {}
            other => out.push(other),
        }
    }
    Some(out)
}

fn hex_n(chars: &mut std::str::Chars<'_>, n: usize) -> Option<u32> {
    let mut v = 0u32;
    for _ in 0..n {
        v = v * 16 + chars.next()?.to_digit(16)?;
    }
    Some(v)
}
