//! Anchor slugs and index links shared by the page renderers.

/// GitHub-style heading slug.
///
/// Lowercase, keep alphanumerics, spaces and hyphens, then turn spaces into
/// hyphens. Everything else (`:`, `.`, `_`, `<`, ...) is dropped.
pub fn slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

/// Where a `\see_also` entry should point.
pub enum LinkTarget<'a> {
    /// A URL or relative path, used as-is
    External(&'a str),
    /// A record heading on the same page
    Anchor(String),
}

pub fn link_target(text: &str) -> LinkTarget<'_> {
    if is_external(text) {
        LinkTarget::External(text)
    } else {
        LinkTarget::Anchor(slug(text))
    }
}

fn is_external(text: &str) -> bool {
    text.contains("://")
        || text.starts_with('/')
        || text.starts_with("./")
        || text.starts_with("../")
}

/// Markdown link for an index entry or `\see_also` reference.
pub fn markdown_link(text: &str) -> String {
    match link_target(text) {
        LinkTarget::External(url) => format!("[{}]({})", text, url),
        LinkTarget::Anchor(anchor) => format!("[{}](#{})", text, anchor),
    }
}
