//! Directive lexer — finds `(% ... %)` doc-strings and tokenizes them.
//!
//! A doc-string holds a run of directives of the form `\name "payload"`:
//!
//! ```text
//! (%
//!   \function "fill"
//!   \abstract "Fills the current path with \"paint\"."
//!   \params "color: the fill color"
//! %)
//! ```
//!
//! The lexer has no idea what the directives mean. Malformed directives are
//! simply not matched, so they never surface as errors.

use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

/// `(%` ... `%)` with at least one non-`%` character inside.
static RE_DOC_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(%([^%]+)%\)").unwrap());

/// `\name` + whitespace + quoted payload. `\x` inside the payload consumes
/// the escaped character, so `\"` does not terminate it.
static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)\\(\S+)\s+"((?:\\.|[^"\\])*)""#).unwrap());

/// A single `\name "contents"` pair with the payload already unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub contents: String,
}

impl Directive {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Directives of one doc-string, in source order.
pub type DirectiveGroup = Vec<Directive>;

// -- Public API ---------------------------------------------------------------

/// Split `text` into one directive group per doc-string region.
///
/// Regions come back in the order they appear. A region without any
/// well-formed directive still yields an (empty) group.
pub fn lex(text: &str) -> Vec<DirectiveGroup> {
    let groups: Vec<DirectiveGroup> = RE_DOC_STRING
        .captures_iter(text)
        .map(|caps| lex_region(caps[1].trim()))
        .collect();
    tracing::debug!(regions = groups.len(), "lexed doc-strings");
    groups
}

/// Undo the payload escaping. Only `\"` is rewritten; any other backslash
/// sequence is kept as written.
pub fn unescape(payload: &str) -> String {
    payload.replace("\\\"", "\"")
}

fn lex_region(region: &str) -> DirectiveGroup {
    RE_DIRECTIVE
        .captures_iter(region)
        .map(|caps| Directive::new(&caps[1], unescape(&caps[2])))
        .collect()
}
