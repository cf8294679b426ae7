//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;
pub mod markdown;

use crate::model::ModuleDoc;
use anyhow::{anyhow, Result};

/// How a renderer's output is split into artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// All modules go into one stream or file.
    Combined,
    /// One file per module, named after the module.
    PerModule,
}

/// Settings shared by every renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Keep keys whose value is absent (structured output only)
    pub include_empty: bool,
}

/// Trait for rendering modules into a specific output format.
pub trait Renderer {
    fn render(&self, module: &ModuleDoc) -> String;
    fn file_extension(&self) -> &str;

    fn layout(&self) -> Layout {
        Layout::PerModule
    }

    /// Render every module as one artifact.
    fn render_all(&self, modules: &[ModuleDoc]) -> String {
        modules.iter().map(|m| self.render(m)).collect()
    }
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, opts: RenderOptions) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer::new(opts))),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use json, html, or markdown",
            format
        )),
    }
}

/// Remove common leading indentation from a multi-line payload.
///
/// Payloads spanning lines keep the indentation of the comment they were
/// written in. Only ASCII spaces and tabs count as indentation, and
/// whitespace-only lines come out empty.
pub(crate) fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.trim_matches('\n').split('\n').collect();

    let min_indent = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_width(l))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                l.trim_start()
            } else if l.trim().is_empty() {
                ""
            } else {
                l.get(min_indent..).unwrap_or(l)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn indent_width(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}
