//! gfxdoc — extract structured documentation from `(% ... %)` doc-strings.
//!
//! The pipeline has two stages, used leaves first:
//!
//! 1. [`lexer::lex`] finds doc-string regions and splits each into directives
//! 2. [`scanner::scan`] folds every directive group into a typed record and
//!    attaches it to the unit's [`model::ModuleDoc`]
//!
//! The finished modules are handed to a [`render::Renderer`].

pub mod lexer;
pub mod model;
pub mod render;
pub mod scanner;
mod toc;

use scanner::ScanResult;

/// Lex and scan the text of one source unit.
#[tracing::instrument(skip_all, fields(unit = unit_name.unwrap_or(model::ANONYMOUS_MODULE)))]
pub fn extract(text: &str, unit_name: Option<&str>) -> ScanResult {
    scanner::scan(lexer::lex(text), unit_name)
}
