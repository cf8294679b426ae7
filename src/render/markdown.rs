//! GitHub-flavored markdown renderer, one page per module.

use crate::model::*;
use crate::render::{unindent, Renderer};
use crate::toc;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, module: &ModuleDoc) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {}\n", module.name()));
        render_common(&mut lines, &module.common);

        // Table of contents
        if !module.children.is_empty() {
            lines.push("## Index\n".to_string());
            for child in &module.children {
                lines.push(format!("* {}", toc::markdown_link(child.name())));
            }
            lines.push(String::new());
        }

        for child in &module.children {
            render_child(&mut lines, child);
        }

        render_see_also(&mut lines, &module.common.see_also);

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Render a single child record.
fn render_child(lines: &mut Vec<String>, child: &DocInfo) {
    lines.push(format!("### {}\n", child.name()));
    lines.push(format!("> `{}`\n", child.kind()));

    match child {
        DocInfo::Function(f) => {
            if let Some(ref signature) = f.signature {
                lines.push("```".to_string());
                lines.push(format!("{} {}", f.common.name, signature));
                lines.push("```".to_string());
                lines.push(String::new());
            }
        }
        DocInfo::Constant(c) => {
            if let Some(ref value_type) = c.value_type {
                lines.push(format!("Type: `{}`\n", value_type));
            }
        }
        DocInfo::Type(t) => {
            if let Some(ref supertype) = t.supertype {
                lines.push(format!("Inherits from {}\n", toc::markdown_link(supertype)));
            }
        }
    }

    render_common(lines, child.common());

    match child {
        DocInfo::Function(f) => {
            render_list(lines, "Parameters", &f.params);
            if let Some(ref returns) = f.returns {
                lines.push("#### Returns\n".to_string());
                lines.push(returns.clone());
                lines.push(String::new());
            }
        }
        DocInfo::Type(t) => render_list(lines, "Fields", &t.fields),
        DocInfo::Constant(_) => {}
    }

    render_see_also(lines, &child.common().see_also);
}

fn render_common(lines: &mut Vec<String>, common: &DocCommon) {
    if let Some(ref abstract_text) = common.abstract_text {
        lines.push(format!("_{}_\n", abstract_text.trim()));
    }
    if let Some(ref discussion) = common.discussion {
        lines.push(unindent(discussion));
        lines.push(String::new());
    }
}

fn render_list(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("#### {}\n", title));
    for item in items {
        // Indent additional lines for markdown list
        lines.push(format!("* {}", item.replace('\n', "\n  ")));
    }
    lines.push(String::new());
}

fn render_see_also(lines: &mut Vec<String>, links: &[String]) {
    if links.is_empty() {
        return;
    }
    lines.push("#### See also\n".to_string());
    for link in links {
        lines.push(format!("* {}", toc::markdown_link(link)));
    }
    lines.push(String::new());
}
