//! MDX renderer — front matter plus Markdown body for the docs site.

use crate::model::*;
use crate::render::{generated_notice, Renderer};
use crate::toc;

pub struct MarkdownRenderer;

const UNDOCUMENTED_WARNING: &str = "> **Warning:** No documentation found. \
Add a `/** ... */` comment with `@brief` above this prototype.";

impl Renderer for MarkdownRenderer {
    fn render(&self, file_name: &str, entries: &[FunctionEntry]) -> String {
        let mut output = String::new();

        // Front matter
        output.push_str(&format!(
            "---\ntitle: {}\ndescription: API reference for {}\n---\n\n",
            file_name, file_name
        ));

        // Provenance
        output.push_str(&format!("{{/* {} */}}\n\n", generated_notice(file_name)));
        output.push_str(&format!("> Generated from `{}`.\n\n", file_name));

        // Table of contents
        if !entries.is_empty() {
            output.push_str("## Functions\n\n");
            for entry in entries {
                output.push_str(&toc::render_toc_item(&entry.name));
                output.push('\n');
            }
            output.push('\n');
        }

        let sections: Vec<String> = entries.iter().map(render_function).collect();
        output.push_str(&sections.join("\n"));

        output
    }

    fn file_extension(&self) -> &str {
        "mdx"
    }
}

/// Render a single function's reference section.
fn render_function(entry: &FunctionEntry) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(toc::render_anchor(&entry.name));
    lines.push(String::new());
    lines.push(format!("### {}\n", entry.name));

    let empty = StructuredComment::default();
    let doc = match entry.doc {
        Some(ref doc) => doc,
        None => {
            lines.push(UNDOCUMENTED_WARNING.to_string());
            lines.push(String::new());
            &empty
        }
    };

    if let Some(brief) = non_empty(&doc.brief) {
        lines.push(brief.to_string());
        lines.push(String::new());
    }

    if let Some(desc) = non_empty(&doc.description) {
        lines.push(desc.to_string());
        lines.push(String::new());
    }

    lines.push("```c".to_string());
    lines.push(entry.signature.clone());
    lines.push("```".to_string());
    lines.push(String::new());

    if !doc.parameters.is_empty() {
        lines.push("#### Parameters\n".to_string());
        lines.push("| Name | Description |".to_string());
        lines.push("| --- | --- |".to_string());
        for param in &doc.parameters {
            lines.push(render_param_row(param));
        }
        lines.push(String::new());
    }

    if let Some(returns) = non_empty(&doc.returns) {
        lines.push("#### Returns\n".to_string());
        lines.push(returns.to_string());
        lines.push(String::new());
    }

    if !doc.errors.is_empty() {
        lines.push("#### Errors\n".to_string());
        for error in &doc.errors {
            lines.push(format!("* {}", error));
        }
        lines.push(String::new());
    }

    if let Some(example) = non_empty(&doc.example) {
        lines.push("#### Example\n".to_string());
        lines.push("```c".to_string());
        lines.push(example.to_string());
        lines.push("```".to_string());
        lines.push(String::new());
    }

    if let Some(since) = non_empty(&doc.since) {
        lines.push(format!("_Since: {}_", since));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// `| `name` (in) | description |`
fn render_param_row(param: &Parameter) -> String {
    let name = match param.direction {
        Some(ref dir) if !dir.is_empty() => format!("`{}` ({})", param.name, dir),
        _ => format!("`{}`", param.name),
    };
    format!("| {} | {} |", table_cell(&name), table_cell(&param.description))
}

/// Keep a value on one table row.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
