//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the extracted entries of one header, one object per function.

use crate::model::*;
use crate::render::{generated_notice, Renderer};
use crate::toc;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, file_name: &str, entries: &[FunctionEntry]) -> String {
        let mut out = String::new();
        out.push_str("{\n");
        out.push_str(&format!("  \"header\": \"{}\",\n", json_escape(file_name)));
        out.push_str(&format!(
            "  \"notice\": \"{}\",\n",
            json_escape(&generated_notice(file_name))
        ));

        out.push_str("  \"functions\": [");
        if entries.is_empty() {
            out.push_str("]\n");
        } else {
            out.push('\n');
            let functions: Vec<String> = entries.iter().map(render_function_json).collect();
            out.push_str(&functions.join(",\n"));
            out.push_str("\n  ]\n");
        }
        out.push_str("}\n");
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn render_function_json(entry: &FunctionEntry) -> String {
    let mut fields: Vec<String> = vec![
        string_field("name", &entry.name),
        string_field("anchor", &toc::slug(&entry.name)),
        string_field("signature", &entry.signature),
        format!("\"has_doc\": {}", entry.has_doc()),
    ];

    if let Some(ref doc) = entry.doc {
        push_opt_field(&mut fields, "brief", &doc.brief);
        push_opt_field(&mut fields, "description", &doc.description);

        if !doc.parameters.is_empty() {
            let params: Vec<String> = doc.parameters.iter().map(render_param_json).collect();
            fields.push(format!(
                "\"parameters\": [\n        {}\n      ]",
                params.join(",\n        ")
            ));
        }

        push_opt_field(&mut fields, "returns", &doc.returns);

        if !doc.errors.is_empty() {
            let errors: Vec<String> = doc
                .errors
                .iter()
                .map(|e| format!("\"{}\"", json_escape(e)))
                .collect();
            fields.push(format!("\"errors\": [{}]", errors.join(", ")));
        }

        push_opt_field(&mut fields, "example", &doc.example);
        push_opt_field(&mut fields, "since", &doc.since);
    }

    format!("    {{\n      {}\n    }}", fields.join(",\n      "))
}

fn render_param_json(param: &Parameter) -> String {
    let mut parts = vec![
        string_field("name", &param.name),
        string_field("description", &param.description),
    ];
    if let Some(ref dir) = param.direction {
        parts.push(string_field("direction", dir));
    }
    format!("{{ {} }}", parts.join(", "))
}

fn push_opt_field(fields: &mut Vec<String>, name: &str, value: &Option<String>) {
    if let Some(v) = value {
        fields.push(string_field(name, v));
    }
}

fn string_field(name: &str, value: &str) -> String {
    format!("\"{}\": \"{}\"", name, json_escape(value))
}

fn json_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
