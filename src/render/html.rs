//! HTML renderer — standalone HTML page per module with semantic markup.

use crate::model::*;
use crate::render::{unindent, Renderer};
use crate::toc::{self, LinkTarget};

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, module: &ModuleDoc) -> String {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", html_escape(module.name())));
        out.push_str("<style>\n");
        out.push_str("body { font-family: system-ui, sans-serif; max-width: 48em; margin: 2em auto; padding: 0 1em; }\n");
        out.push_str("code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }\n");
        out.push_str("pre { background: #f4f4f4; padding: 1em; border-radius: 5px; overflow-x: auto; }\n");
        out.push_str("dt { font-weight: bold; margin-top: 0.5em; }\n");
        out.push_str("dd { margin-left: 1.5em; }\n");
        out.push_str(".tag { display: inline-block; font-size: 0.75em; padding: 0.1em 0.4em; border-radius: 3px; margin-left: 0.5em; }\n");
        out.push_str(".tag-function { background: #4eaa25; color: white; }\n");
        out.push_str(".tag-constant { background: #3b6ea5; color: white; }\n");
        out.push_str(".tag-type { background: #dea584; color: #1a1a1a; }\n");
        out.push_str("</style>\n");
        out.push_str("</head>\n<body>\n");

        out.push_str(&format!("<h1>{}</h1>\n", html_escape(module.name())));
        render_common_html(&mut out, &module.common);

        // Index
        if !module.children.is_empty() {
            out.push_str("<h2>Index</h2>\n<ul>\n");
            for child in &module.children {
                out.push_str(&format!(
                    "  <li><a href=\"#{}\">{}</a></li>\n",
                    html_escape(&toc::slug(child.name())),
                    html_escape(child.name())
                ));
            }
            out.push_str("</ul>\n");
        }

        for child in &module.children {
            out.push_str(&render_child_html(child));
        }

        render_see_also_html(&mut out, &module.common.see_also);

        out.push_str("</body>\n</html>\n");
        out
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn render_child_html(child: &DocInfo) -> String {
    let mut out = String::new();
    let kind = child.kind();

    out.push_str(&format!(
        "<h3 id=\"{}\">{} <span class=\"tag tag-{}\">{}</span></h3>\n",
        html_escape(&toc::slug(child.name())),
        html_escape(child.name()),
        kind,
        kind
    ));

    match child {
        DocInfo::Function(f) => {
            if let Some(ref signature) = f.signature {
                out.push_str(&format!(
                    "<pre><code>{} {}</code></pre>\n",
                    html_escape(&f.common.name),
                    html_escape(signature)
                ));
            }
        }
        DocInfo::Constant(c) => {
            if let Some(ref value_type) = c.value_type {
                out.push_str(&format!(
                    "<p>Type: <code>{}</code></p>\n",
                    html_escape(value_type)
                ));
            }
        }
        DocInfo::Type(t) => {
            if let Some(ref supertype) = t.supertype {
                out.push_str(&format!(
                    "<p>Inherits from <a href=\"#{}\"><code>{}</code></a></p>\n",
                    html_escape(&toc::slug(supertype)),
                    html_escape(supertype)
                ));
            }
        }
    }

    render_common_html(&mut out, child.common());

    match child {
        DocInfo::Function(f) => {
            render_list_html(&mut out, "Parameters", &f.params);
            if let Some(ref returns) = f.returns {
                out.push_str("<h4>Returns</h4>\n");
                out.push_str(&format!("<p>{}</p>\n", html_escape(returns)));
            }
        }
        DocInfo::Type(t) => render_list_html(&mut out, "Fields", &t.fields),
        DocInfo::Constant(_) => {}
    }

    render_see_also_html(&mut out, &child.common().see_also);
    out
}

/// Abstract and discussion paragraphs.
fn render_common_html(out: &mut String, common: &DocCommon) {
    if let Some(ref abstract_text) = common.abstract_text {
        out.push_str(&format!(
            "<p><strong>{}</strong></p>\n",
            html_escape(abstract_text)
        ));
    }
    if let Some(ref discussion) = common.discussion {
        for para in unindent(discussion).split("\n\n") {
            out.push_str(&format!("<p>{}</p>\n", html_escape(para.trim())));
        }
    }
}

fn render_list_html(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("<h4>{}</h4>\n<ul>\n", title));
    for item in items {
        out.push_str(&format!("  <li>{}</li>\n", html_escape(item)));
    }
    out.push_str("</ul>\n");
}

fn render_see_also_html(out: &mut String, links: &[String]) {
    if links.is_empty() {
        return;
    }
    out.push_str("<h4>See also</h4>\n<ul>\n");
    for link in links {
        let href = match toc::link_target(link) {
            LinkTarget::External(url) => url.to_string(),
            LinkTarget::Anchor(anchor) => format!("#{}", anchor),
        };
        out.push_str(&format!(
            "  <li><a href=\"{}\">{}</a></li>\n",
            html_escape(&href),
            html_escape(link)
        ));
    }
    out.push_str("</ul>\n");
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
