//! Component document scanning.
//!
//! Only as much markup is understood as is needed to locate `<style>`
//! elements reliably: comments and `<script>` bodies are skipped as opaque
//! text, and style bodies are raw text up to the matching `</style>`.

use crate::error::ParseError;
use crate::models::{Dialect, StyleBlock};
use regex::Regex;
use std::sync::LazyLock;

static SECTION_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:(!--)|(script|style)(?:[\s/>]|$))").unwrap());
static SCRIPT_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</script\s*>").unwrap());
static STYLE_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</style\s*>").unwrap());

/// Decode a document's bytes. Non UTF-8 input cannot be scanned.
pub fn decode(bytes: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)
}

/// Find every `<style>` block whose `lang` is a supported dialect.
///
/// SCSS blocks come first, then Sass blocks; each group keeps document order.
/// A document with no matching blocks yields an empty list.
pub fn find_style_blocks(text: &str) -> Result<Vec<StyleBlock<'_>>, ParseError> {
    let mut blocks = Vec::new();
    let mut position = 0usize;
    let mut cursor = 0usize;

    while let Some(caps) = SECTION_START_RE.captures_at(text, cursor) {
        let Some(whole) = caps.get(0) else { break };
        let start = whole.start();

        if let Some(open) = caps.get(1) {
            let body = open.end();
            let end = text[body..]
                .find("-->")
                .ok_or(ParseError::UnterminatedSection {
                    what: "comment",
                    line: line_at(text, start),
                })?;
            cursor = body + end + 3;
            continue;
        }
        let Some(name) = caps.get(2) else { break };

        match name.as_str().to_ascii_lowercase().as_str() {
            "script" => {
                let gt = tag_end(text, name.end()).ok_or(ParseError::UnterminatedSection {
                    what: "script tag",
                    line: line_at(text, start),
                })?;
                if text[name.end()..gt].trim_end().ends_with('/') {
                    cursor = gt + 1;
                    continue;
                }
                let close = SCRIPT_END_RE.find_at(text, gt + 1).ok_or(
                    ParseError::UnterminatedSection {
                        what: "script",
                        line: line_at(text, start),
                    },
                )?;
                cursor = close.end();
            }
            _ => {
                let gt = tag_end(text, name.end()).ok_or(ParseError::UnterminatedStartTag {
                    line: line_at(text, start),
                })?;
                let attrs = &text[name.end()..gt];
                let index = position;
                position += 1;

                if attrs.trim_end().ends_with('/') {
                    cursor = gt + 1;
                    continue;
                }

                let close = STYLE_END_RE
                    .find_at(text, gt + 1)
                    .ok_or(ParseError::UnclosedStyle {
                        line: line_at(text, start),
                    })?;
                let content = &text[gt + 1..close.start()];
                cursor = close.end();

                let Some(dialect) = lang_attr(attrs).and_then(Dialect::from_lang) else {
                    continue;
                };
                if content.is_empty() {
                    continue;
                }
                blocks.push(StyleBlock {
                    content,
                    dialect,
                    position: index,
                });
            }
        }
    }

    // Group by dialect: SCSS first, then Sass (stable within each group)
    blocks.sort_by_key(|b| match b.dialect {
        Dialect::Scss => 0,
        Dialect::Sass => 1,
    });
    Ok(blocks)
}

/// Value of the `lang` attribute in a start tag's attribute text.
fn lang_attr(attrs: &str) -> Option<&str> {
    attributes(attrs)
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("lang"))
        .and_then(|(_, value)| value)
}

/// Split start-tag attribute text into `(name, value)` pairs.
///
/// Quoted values are opaque, so text inside them never yields attributes.
fn attributes(attrs: &str) -> Vec<(&str, Option<&str>)> {
    let bytes = attrs.as_bytes();
    let is_space = |b: u8| b.is_ascii_whitespace();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if is_space(bytes[i]) || bytes[i] == b'/' {
            i += 1;
            continue;
        }
        let name_start = i;
        while i < bytes.len() && !is_space(bytes[i]) && !matches!(bytes[i], b'=' | b'/') {
            i += 1;
        }
        let name = &attrs[name_start..i];
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            out.push((name, None));
            continue;
        }
        i += 1;
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        let value = match bytes.get(i) {
            Some(&q) if q == b'"' || q == b'\'' => {
                let start = i + 1;
                let end = attrs[start..].find(q as char).map_or(attrs.len(), |e| start + e);
                i = (end + 1).min(bytes.len());
                &attrs[start..end]
            }
            _ => {
                let start = i;
                while i < bytes.len() && !is_space(bytes[i]) {
                    i += 1;
                }
                &attrs[start..i]
            }
        };
        out.push((name, Some(value)));
    }
    out
}

/// Byte index of the `>` closing a start tag, honouring quoted attribute values.
fn tag_end(text: &str, from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, b) in text.as_bytes()[from..].iter().enumerate() {
        match (quote, *b) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, b'"') | (None, b'\'') => quote = Some(*b),
            (None, b'>') => return Some(from + i),
            _ => {}
        }
    }
    None
}

/// 1-based line number of a byte index.
fn line_at(text: &str, idx: usize) -> usize {
    text[..idx].matches('\n').count() + 1
}
