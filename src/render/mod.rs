//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::model::{FunctionEntry, HeaderFile, RenderedDocument};
use crate::parser;
use anyhow::{anyhow, Result};

/// Text every generated page carries; `--clean` only removes files containing it.
pub const GENERATED_MARKER: &str = "Auto-generated by hdrdoc";

/// Trait for rendering one header's entries into a specific output format.
pub trait Renderer {
    /// `file_name` is the header's file name (`logger.h`); `entries` are
    /// already sorted and deduplicated.
    fn render(&self, file_name: &str, entries: &[FunctionEntry]) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" | "mdx" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use markdown or json",
            format
        )),
    }
}

/// Extract and render one header. Returns `None` when the header has no
/// prototypes, in which case no page is written for it.
pub fn render_header(header: &HeaderFile, renderer: &dyn Renderer) -> Option<RenderedDocument> {
    let entries = parser::extract(&header.text);
    if entries.is_empty() {
        return None;
    }
    let text = renderer.render(&header.file_name, &entries);
    Some(RenderedDocument {
        name: header.name.clone(),
        file_name: header.file_name.clone(),
        entries,
        text,
    })
}

/// Provenance notice embedded in every generated page.
pub fn generated_notice(file_name: &str) -> String {
    format!("{} from {}. Do not edit.", GENERATED_MARKER, file_name)
}
