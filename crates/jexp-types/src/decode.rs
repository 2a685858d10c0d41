//! JSON → [`Expr`] decoding.
//!
//! Programs may nest arbitrarily deep, so the parser runs without
//! serde_json's recursion limit and grows the stack on demand instead.

use crate::{DecodeError, Expr, Position, Result, SourceFile};
use serde::Deserialize;
use serde_json::Value as Json;

/// Grow the native stack when less than this much remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each additional stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Bytes of context kept on each side of a syntax error's column.
const EXCERPT_RADIUS: usize = 40;

/// Parse a whole program file into its root expression.
pub fn parse_program(file: &SourceFile) -> Result<Expr> {
    let json = parse_json(&file.source).map_err(|e| syntax_error(file, &e))?;
    decode(&json)
}

fn parse_json(text: &str) -> serde_json::Result<Json> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let json = Json::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(json)
}

/// Convert an already-parsed JSON value into an expression tree.
pub fn decode(json: &Json) -> Result<Expr> {
    match json {
        Json::Number(n) => n.as_i64().map(Expr::Int).ok_or_else(|| DecodeError::Number {
            text: n.to_string(),
        }),
        Json::String(s) => Ok(Expr::Str(s.clone())),
        Json::Bool(b) => Ok(Expr::Bool(*b)),
        Json::Array(items) => stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
            items.iter().map(decode).collect::<Result<_>>().map(Expr::List)
        }),
        Json::Null => Err(DecodeError::Unsupported { kind: "null" }),
        Json::Object(_) => Err(DecodeError::Unsupported { kind: "object" }),
    }
}

impl TryFrom<Json> for Expr {
    type Error = DecodeError;

    fn try_from(json: Json) -> Result<Self> {
        decode(&json)
    }
}

fn syntax_error(file: &SourceFile, err: &serde_json::Error) -> DecodeError {
    let line = u32::try_from(err.line()).unwrap_or(u32::MAX);
    let column = u32::try_from(err.column()).unwrap_or(u32::MAX);
    // serde_json appends the location to its message; we report it separately.
    let full = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();
    DecodeError::Syntax {
        file: file.name.clone(),
        position: Position::new(line, column),
        message,
        source_line: excerpt(file.line(line).unwrap_or_default(), err.column()),
    }
}

/// The part of `line` around 1-based byte `column`, marked with `...`
/// where it was cut.
fn excerpt(line: &str, column: usize) -> String {
    let at = column.saturating_sub(1).min(line.len());
    let mut start = at.saturating_sub(EXCERPT_RADIUS);
    while !line.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = at.saturating_add(EXCERPT_RADIUS).min(line.len());
    while !line.is_char_boundary(end) {
        end += 1;
    }
    let mut out = String::with_capacity(end - start + 6);
    if start > 0 {
        out.push_str("...");
    }
    out.push_str(&line[start..end]);
    if end < line.len() {
        out.push_str("...");
    }
    out
}
