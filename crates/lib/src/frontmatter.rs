//! # Transcription Markdown Parsing
//!
//! The OCR model is asked to answer with a `---` delimited frontmatter block
//! followed by a `## Transcription` section. That format is only a
//! convention, so every function here is total: missing or malformed pieces
//! fall back to something sensible instead of failing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Leading frontmatter block. Group 1 is the (possibly absent) body.
static RE_FRONTMATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)").unwrap());

/// Outer ```markdown fence wrapping the whole answer.
static RE_OUTER_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A```(?:markdown|md)?[ \t]*\r?\n(.*)\r?\n```\s*\z").unwrap());

static RE_TRANSCRIPTION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^##[ \t]+Transcription[ \t]*:?[ \t]*\r?$").unwrap());

/// Any level 1 or 2 heading; ends the transcription section.
static RE_NEXT_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,2}[ \t]").unwrap());

/// A transcription split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedTranscription {
    pub plain_text: String,
    pub metadata: BTreeMap<String, String>,
}

/// Unwraps a fenced answer when the fence holds a frontmatter document.
///
/// Fenced text without frontmatter is left alone.
pub fn unwrap_outer_fence(markdown: &str) -> &str {
    let trimmed = markdown.trim();
    match RE_OUTER_FENCE.captures(trimmed) {
        Some(caps) => {
            let inner = caps.get(1).map_or("", |m| m.as_str());
            if RE_FRONTMATTER.is_match(inner.trim_start()) {
                inner
            } else {
                markdown
            }
        }
        None => markdown,
    }
}

/// Splits a document into its frontmatter body (if any) and the remainder.
fn split_frontmatter(markdown: &str) -> (Option<&str>, &str) {
    let start = markdown.trim_start();
    match RE_FRONTMATTER.captures(start) {
        Some(caps) => {
            let body = caps.get(1).map_or("", |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            (Some(body), &start[end..])
        }
        None => (None, markdown),
    }
}

/// Parses the `key: value` lines of the leading frontmatter block.
///
/// Lines without a `": "` separator or with an empty key are skipped. A
/// missing block yields an empty map. Later duplicates win.
pub fn parse_metadata(markdown: &str) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    if let (Some(body), _) = split_frontmatter(markdown) {
        for line in body.lines() {
            if let Some((key, value)) = line.split_once(": ") {
                let key = key.trim();
                if !key.is_empty() {
                    metadata.insert(key.to_string(), value.trim().to_string());
                }
            }
        }
    }
    metadata
}

/// Extracts the body of the `## Transcription` section, if the document has one.
pub fn extract_section(markdown: &str) -> Option<&str> {
    let heading = RE_TRANSCRIPTION_HEADING.find(markdown)?;
    let rest = &markdown[heading.end()..];
    let end = RE_NEXT_HEADING.find(rest).map_or(rest.len(), |m| m.start());
    Some(rest[..end].trim())
}

/// Derives the plain transcription text from the model's markdown.
///
/// Without a frontmatter block the whole input is returned, trimmed. With one,
/// the block is stripped and the `## Transcription` section is returned, or
/// the whole stripped text when there is no such section.
pub fn extract_plain_text(markdown: &str) -> String {
    match split_frontmatter(markdown) {
        (Some(_), rest) => {
            let stripped = rest.trim();
            extract_section(stripped).unwrap_or(stripped).to_string()
        }
        (None, _) => markdown.trim().to_string(),
    }
}

/// Runs both derivations over one model answer.
pub fn parse_transcription(markdown: &str) -> ParsedTranscription {
    let markdown = unwrap_outer_fence(markdown);
    ParsedTranscription {
        plain_text: extract_plain_text(markdown),
        metadata: parse_metadata(markdown),
    }
}
