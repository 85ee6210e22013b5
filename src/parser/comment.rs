//! `/** ... */` tag parser — line-by-line two-state machine.
//!
//! Normal mode dispatches on `@brief`, `@param`, `@return(s)`, `@error`,
//! `@since` and `@example`; everything else untagged is prose. `@example`
//! switches to example mode, which keeps lines verbatim until the next line
//! that starts with `@`.

use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_CONTINUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\*\s?").unwrap());

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@(brief|param|returns?|error|since|example)\b\s*(.*)$").unwrap()
});

// A recognized tag in the middle of a line starts a new logical line
static RE_INLINE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s(@(?:brief|param|returns?|error|since|example)\b)").unwrap()
});

// -- Parser state -------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    Normal,
    Example,
}

#[derive(Default)]
struct ParserState {
    doc: StructuredComment,
    mode: Mode,
    prose: Vec<String>,
    example: Vec<String>,
}

// -- Public API ---------------------------------------------------------------

/// Parse the body of a `/** ... */` block (delimiters excluded).
pub fn parse(body: &str) -> StructuredComment {
    let mut state = ParserState::default();

    for line in clean_block(body) {
        feed(&mut state, &line);
    }

    finish_example(&mut state);
    if !state.prose.is_empty() {
        state.doc.description = Some(state.prose.join("\n"));
    }
    state.doc
}

/// Strip the leading `*` continuation marker from every line of a block body.
/// Indentation after the marker is kept so example code survives.
pub fn clean_block(body: &str) -> Vec<String> {
    body.lines()
        .map(|l| RE_CONTINUATION.replace(l, "").trim_end().to_string())
        .collect()
}

// -- Line processing ----------------------------------------------------------

fn feed(s: &mut ParserState, line: &str) {
    // Example continuation: verbatim until a tag line
    if s.mode == Mode::Example && !line.trim_start().starts_with('@') {
        s.example.push(line.to_string());
        return;
    }

    for piece in split_inline_tags(line.trim()) {
        process_line(s, piece);
    }
}

fn process_line(s: &mut ParserState, line: &str) {
    if line.starts_with('@') {
        finish_example(s);
    }

    if s.mode == Mode::Example {
        s.example.push(line.to_string());
        return;
    }

    let Some(caps) = RE_TAG.captures(line) else {
        // Unrecognized @tags are dropped; anything else is prose
        if !line.is_empty() && !line.starts_with('@') {
            s.prose.push(line.to_string());
        }
        return;
    };

    let text = caps[2].trim();
    match &caps[1] {
        "brief" => s.doc.brief = Some(text.to_string()),
        "param" => s.doc.parameters.push(parse_param(text)),
        "return" | "returns" => s.doc.returns = Some(text.to_string()),
        "error" => s.doc.errors.push(text.to_string()),
        "since" => s.doc.since = Some(text.to_string()),
        "example" => {
            s.mode = Mode::Example;
            s.example.clear();
            if !text.is_empty() {
                s.example.push(text.to_string());
            }
        }
        _ => {}
    }
}

/// Leave example mode, assigning the collected block.
fn finish_example(s: &mut ParserState) {
    if s.mode != Mode::Example {
        return;
    }
    s.mode = Mode::Normal;
    let lines = std::mem::take(&mut s.example);
    s.doc.example = Some(unindent(&lines));
}

/// `[in] name text` → Parameter { direction: "in", name, description: text }
fn parse_param(text: &str) -> Parameter {
    let mut direction = None;
    let mut rest = text;
    if let Some(inner) = text.strip_prefix('[') {
        if let Some((dir, after)) = inner.split_once(']') {
            direction = Some(dir.trim().to_string());
            rest = after.trim_start();
        }
    }

    let (name, description) = match rest.split_once(char::is_whitespace) {
        Some((name, desc)) => (name, desc.trim()),
        None => (rest, ""),
    };
    Parameter {
        name: name.to_string(),
        description: description.to_string(),
        direction,
    }
}

/// Split `@brief A. @param x B.` into `["@brief A.", "@param x B."]`.
fn split_inline_tags(line: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for caps in RE_INLINE_TAG.captures_iter(line) {
        let Some(tag) = caps.get(1) else { continue };
        pieces.push(line[start..tag.start()].trim_end());
        start = tag.start();
    }
    pieces.push(&line[start..]);
    pieces
}

/// Remove common leading indentation, drop leading blank lines and trim the end.
fn unindent(lines: &[String]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(lines.len());
    let body = &lines[start..];

    let min_indent = body
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    body.iter()
        .map(|l| l.get(min_indent..).unwrap_or_else(|| l.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tagged_block() {
        let body = "\n * @brief Sets log level threshold.\n * @param level One of: 0=ERROR, 1=WARN.\n * @return 0 on success; -1 invalid level.\n ";
        let doc = parse(body);
        assert_eq!(doc.brief.as_deref(), Some("Sets log level threshold."));
        assert_eq!(doc.parameters.len(), 1);
        assert_eq!(doc.parameters[0].name, "level");
        assert_eq!(doc.parameters[0].description, "One of: 0=ERROR, 1=WARN.");
        assert_eq!(doc.returns.as_deref(), Some("0 on success; -1 invalid level."));
        assert!(doc.description.is_none());
    }

    #[test]
    fn parse_prose_in_order() {
        let body = "\n * Applies automatic photo correction.\n * @param input   Pointer to RGBA buffer.\n * Works in place.\n ";
        let doc = parse(body);
        assert_eq!(
            doc.description.as_deref(),
            Some("Applies automatic photo correction.\nWorks in place.")
        );
        assert_eq!(doc.parameters[0].description, "Pointer to RGBA buffer.");
    }

    #[test]
    fn parse_single_line_block() {
        let doc = parse(" @brief Opens a file. @param path File path. @return Handle or -1. ");
        assert_eq!(doc.brief.as_deref(), Some("Opens a file."));
        assert_eq!(doc.parameters.len(), 1);
        assert_eq!(doc.parameters[0].name, "path");
        assert_eq!(doc.parameters[0].description, "File path.");
        assert_eq!(doc.returns.as_deref(), Some("Handle or -1."));
    }

    #[test]
    fn parse_returns_alias_and_errors() {
        let doc = parse("\n * @returns A handle.\n * @error EINVAL bad path\n * @error ENOMEM out of memory\n * @since 1.2\n");
        assert_eq!(doc.returns.as_deref(), Some("A handle."));
        assert_eq!(doc.errors, vec!["EINVAL bad path", "ENOMEM out of memory"]);
        assert_eq!(doc.since.as_deref(), Some("1.2"));
    }

    #[test]
    fn duplicate_params_preserved() {
        let doc = parse("\n * @param x first\n * @param x second\n");
        assert_eq!(doc.parameters.len(), 2);
        assert_eq!(doc.parameters[1].description, "second");
    }

    #[test]
    fn param_direction() {
        let doc = parse("\n * @param [in] status 0 on success.\n * @param[out] user context\n");
        assert_eq!(doc.parameters[0].direction.as_deref(), Some("in"));
        assert_eq!(doc.parameters[0].name, "status");
        assert_eq!(doc.parameters[0].description, "0 on success.");
        assert_eq!(doc.parameters[1].direction.as_deref(), Some("out"));
        assert_eq!(doc.parameters[1].name, "user");
    }

    #[test]
    fn example_until_next_tag() {
        let body = "\n * @brief Adds.\n * @example\n *   int r = api_add(1, 2);\n *   if (r != 3) {\n *       abort();\n *   }\n * @return Sum.\n ";
        let doc = parse(body);
        assert_eq!(
            doc.example.as_deref(),
            Some("int r = api_add(1, 2);\nif (r != 3) {\n    abort();\n}")
        );
        assert_eq!(doc.returns.as_deref(), Some("Sum."));
    }

    #[test]
    fn example_to_end_of_comment() {
        let doc = parse("\n * @example\n *   api_init();\n *\n *   api_shutdown();\n ");
        assert_eq!(doc.example.as_deref(), Some("api_init();\n\napi_shutdown();"));
    }

    #[test]
    fn example_keeps_inline_tag_text() {
        let doc = parse("\n * @example\n *   log(\"see @return docs\");\n");
        assert_eq!(doc.example.as_deref(), Some("log(\"see @return docs\");"));
    }

    #[test]
    fn empty_tags_register_fields() {
        let doc = parse("\n * @brief\n * @return\n * @example\n");
        assert_eq!(doc.brief.as_deref(), Some(""));
        assert_eq!(doc.returns.as_deref(), Some(""));
        assert_eq!(doc.example.as_deref(), Some(""));
    }

    #[test]
    fn tags_are_case_sensitive_whole_tokens() {
        let doc = parse("\n * @Brief Nope.\n * @returned nothing\n * @note ignored\n");
        assert!(doc.brief.is_none());
        assert!(doc.returns.is_none());
        assert!(doc.description.is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn empty_block() {
        assert!(parse("\n *\n ").is_empty());
    }

    #[test]
    fn clean_block_strips_marker() {
        assert_eq!(
            clean_block("\n * a\n *    b\n c"),
            vec!["", "a", "   b", " c"]
        );
    }
}
