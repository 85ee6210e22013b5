//! Anchor slugs and table-of-contents links.

use crate::parser::signature::FALLBACK_NAME;

/// Generate a table-of-contents list item for a function name.
pub fn render_toc_item(name: &str) -> String {
    format!("* [{}](#{})", name, slug(name))
}

/// Generate the inline anchor placed before a function's heading.
pub fn render_anchor(name: &str) -> String {
    format!("<a id=\"{}\"></a>", slug(name))
}

/// Anchor slug for a function name.
///
/// - lowercase
/// - every run of non-alphanumeric characters becomes a single `-`
/// - leading and trailing `-` are trimmed
///
/// Names that differ only in case or punctuation share a slug.
pub fn slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }
    if slug.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    slug
}
