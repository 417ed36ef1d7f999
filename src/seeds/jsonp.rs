//! JSONP payload parsing
//!
//! The help site ships its table of contents as MadCap JSONP files: a single
//! `define({...});` call whose argument is JSON written by hand loosely
//! enough to need a little forgiveness (single-quoted strings, bare keys,
//! trailing commas). This module unwraps the call and normalizes the payload
//! just enough for serde_json to take over.

use crate::SeedError;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static DEFINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)define\((.*)\)").unwrap());

/// Unwraps a `define(...)` JSONP body and parses its argument.
///
/// `path` only feeds the error message. The match is greedy, so the argument
/// runs to the last closing parenthesis in the file; anything after the call
/// (a trailing semicolon, a newline) is ignored.
pub fn parse_jsonp(path: &str, body: &str) -> Result<Value, SeedError> {
    let argument = DEFINE_RE
        .captures(body)
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| SeedError::JsonpFormat {
            path: path.to_string(),
            reason: "no define(...) wrapper found".to_string(),
        })?;
    parse_relaxed(&argument).map_err(|err| SeedError::JsonpFormat {
        path: path.to_string(),
        reason: err.to_string(),
    })
}

/// Parses JSON, falling back to a normalizing pass for the relaxed syntax
/// the ToC files actually use.
fn parse_relaxed(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str(text).or_else(|_| serde_json::from_str(&normalize_relaxed(text)))
}

/// Rewrites relaxed JSON into strict JSON.
///
/// Handles exactly the deviations observed in the ToC files: single-quoted
/// strings, unquoted object keys, and trailing commas. This is not a
/// JavaScript parser; payloads beyond that shape still fail in serde_json
/// and surface as a format error.
fn normalize_relaxed(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' | '\'' => {
                let quote = c;
                out.push('"');
                i += 1;
                while i < chars.len() && chars[i] != quote {
                    match chars[i] {
                        '\\' if i + 1 < chars.len() => {
                            // A \' escape is invalid JSON once the string is
                            // double-quoted; emit the apostrophe bare.
                            if chars[i + 1] == '\'' {
                                out.push('\'');
                            } else {
                                out.push('\\');
                                out.push(chars[i + 1]);
                            }
                            i += 2;
                            continue;
                        }
                        '"' => out.push_str("\\\""),
                        other => out.push(other),
                    }
                    i += 1;
                }
                out.push('"');
                i += 1;
            }
            ',' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                // Trailing comma before a closing bracket: drop it.
                if j >= chars.len() || chars[j] == '}' || chars[j] == ']' {
                    i += 1;
                } else {
                    out.push(',');
                    i += 1;
                }
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$')
                {
                    i += 1;
                }
                let ident: String = chars[start..i].iter().collect();
                let mut j = i;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                // Bare identifiers followed by a colon are object keys;
                // everything else (true, false, null) passes through.
                if j < chars.len() && chars[j] == ':' {
                    out.push('"');
                    out.push_str(&ident);
                    out.push('"');
                } else {
                    out.push_str(&ident);
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    out
}
