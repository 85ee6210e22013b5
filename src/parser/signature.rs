//! Prototype scanner — two lexical passes over a header's text.
//!
//! Pass A pairs a `/** ... */` block with the prototype that directly follows
//! it. Pass B picks up the remaining single-line prototypes at top level.
//! A name seen once is never emitted again, so documented entries win over
//! bare duplicates.
//!
//! A documented `typedef` (e.g. a callback `typedef void (*Cb)(int);`) has the
//! prototype shape but declares no function; Pass A claims its span and
//! emits nothing for it rather than an entry named after its return type.

use regex::Regex;
use std::collections::HashSet;
use std::iter::Peekable;
use std::ops::Range;
use std::str::Chars;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

// Doc block (body may not contain "*/") followed by a prototype ending in ';'
static RE_DOC_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\*\*((?:[^*]|\*+[^*/])*)\*+/\s*([A-Za-z_][\w\s*]+?\([^;{]*\)\s*;)").unwrap()
});

static RE_BARE_PROTOTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][\w\s*]+?\([^;{]*\)\s*;)").unwrap());

static RE_FN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z_]\w*)\s*\(").unwrap());

static RE_TYPEDEF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^typedef\b").unwrap());

static RE_DECL_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:typedef|struct|enum)\b").unwrap());

static RE_EXTERN_C: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*extern\s+"C"\s*\{"#).unwrap());

/// Name used when a prototype has no identifier directly before `(`.
pub const FALLBACK_NAME: &str = "function";

/// Line prefixes that never start a bare prototype.
const REJECTED_PREFIXES: &[&str] = &["#", "/*", "//", "*"];

/// A prototype span found in a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype<'a> {
    pub name: String,
    /// Trimmed, HTML-escaped prototype text.
    pub signature: String,
    /// Raw body of the preceding `/** ... */` block (Pass A only).
    pub comment: Option<&'a str>,
}

/// Scan a header for prototypes, documented ones first.
pub fn scan(text: &str) -> Vec<Prototype<'_>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut claimed: Vec<Range<usize>> = Vec::new();
    let mut found = Vec::new();

    // Pass A: documented prototypes
    for caps in RE_DOC_PAIR.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        claimed.push(whole.range());

        let sig = caps[2].trim();
        if RE_TYPEDEF.is_match(sig) {
            continue;
        }
        let name = fn_name(sig);
        if !seen.insert(name.clone()) {
            continue;
        }
        found.push(Prototype {
            name,
            signature: html_escape(sig),
            comment: caps.get(1).map(|m| m.as_str()),
        });
    }

    // Pass B: bare top-level prototypes outside the claimed spans
    let mut braces = BraceTracker::default();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let span = offset..offset + line.len();
        offset = span.end;

        if braces.top_level() {
            for segment in unclaimed_segments(&span, &claimed) {
                let Some(sig) = bare_prototype(&text[segment]) else { continue };
                let name = fn_name(sig);
                if seen.insert(name.clone()) {
                    found.push(Prototype {
                        name,
                        signature: html_escape(sig),
                        comment: None,
                    });
                }
            }
        }

        braces.feed(line);
    }

    found
}

/// Match a single line against the prototype shape, applying the
/// keyword/prefix rejection heuristic.
fn bare_prototype(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if RE_DECL_KEYWORD.is_match(trimmed) || REJECTED_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
        return None;
    }
    RE_BARE_PROTOTYPE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Parts of a line's byte span not covered by any Pass A match.
fn unclaimed_segments(span: &Range<usize>, claimed: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut segments = vec![span.clone()];
    for r in claimed.iter().filter(|r| r.start < span.end && span.start < r.end) {
        segments = segments
            .into_iter()
            .flat_map(|s| {
                let mut parts = Vec::new();
                if s.start < r.start {
                    parts.push(s.start..r.start.min(s.end));
                }
                if r.end < s.end {
                    parts.push(r.end.max(s.start)..s.end);
                }
                parts
            })
            .collect();
    }
    segments
}

/// Open-brace stack for Pass B. Braces inside comments and string or
/// character literals are ignored. Braces opened on an `extern "C" {` line
/// are transparent and do not count as nesting.
#[derive(Default)]
struct BraceTracker {
    open: Vec<bool>,
    in_block_comment: bool,
}

impl BraceTracker {
    fn top_level(&self) -> bool {
        !self.open.iter().any(|transparent| !transparent)
    }

    fn feed(&mut self, line: &str) {
        let mut transparent = RE_EXTERN_C.is_match(line);
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if self.in_block_comment {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    self.in_block_comment = false;
                }
                continue;
            }
            match c {
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    self.in_block_comment = true;
                }
                '/' if chars.peek() == Some(&'/') => break,
                '"' | '\'' => skip_literal(&mut chars, c),
                '{' => {
                    self.open.push(transparent);
                    transparent = false;
                }
                '}' => {
                    self.open.pop();
                }
                _ => {}
            }
        }
    }
}

/// Consume a string or character literal up to its closing quote.
fn skip_literal(chars: &mut Peekable<Chars<'_>>, quote: char) {
    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            return;
        }
    }
}

/// Extract the function name: the first identifier directly followed by `(`.
fn fn_name(sig: &str) -> String {
    RE_FN_NAME
        .captures(sig)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

fn html_escape(s: &str) -> String {
    s.replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(found: &[Prototype]) -> Vec<String> {
        found.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn documented_prototype() {
        let input = "/**\n * Initializes the engine.\n */\nint eyeq_init(const char* license_key);\n";
        let found = scan(input);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "eyeq_init");
        assert_eq!(found[0].signature, "int eyeq_init(const char* license_key);");
        assert!(found[0].comment.unwrap().contains("Initializes the engine."));
    }

    #[test]
    fn bare_prototype_found() {
        let found = scan("void eyeq_shutdown(void);\n");
        assert_eq!(names(&found), vec!["eyeq_shutdown"]);
        assert!(found[0].comment.is_none());
    }

    #[test]
    fn documented_wins_over_bare_duplicate() {
        let input = "int open_file(const char* path);\n\n/** @brief Opens. */\nint open_file(const char* path);\n";
        let found = scan(input);
        assert_eq!(found.len(), 1);
        assert!(found[0].comment.is_some());
    }

    #[test]
    fn definitions_are_skipped() {
        let input = "static inline int api_add(int a, int b) { return a + b; }\n";
        assert!(scan(input).is_empty());
    }

    #[test]
    fn body_lines_are_not_top_level() {
        let input = "static inline int api_twice(int a)\n{\n    return api_add(a, a);\n}\n";
        assert!(scan(input).is_empty());
    }

    #[test]
    fn extern_c_block_is_transparent() {
        let input = "#ifdef __cplusplus\nextern \"C\" {\n#endif\nint log_write(int level);\n#ifdef __cplusplus\n}\n#endif\n";
        assert_eq!(names(&scan(input)), vec!["log_write"]);
    }

    #[test]
    fn rejected_line_prefixes() {
        let input = "typedef int (*AnonFnPtr)(const char*);\n\
                     struct api_ctx *api_ctx_new(void);\n\
                     enum api_mode api_mode_get(void);\n\
                     #define API_MIN(a,b) ((a) < (b));\n\
                     // int commented(void);\n\
                     /* int hidden(void); */\n\
                     * int continuation(void);\n";
        assert!(scan(input).is_empty());
    }

    #[test]
    fn documented_typedef_is_skipped() {
        let input = "/**\n * @brief Callback.\n */\ntypedef void (*ApiCompletionCb)(int status, void* user);\n";
        assert!(scan(input).is_empty());
    }

    #[test]
    fn comment_not_followed_by_prototype_does_not_swallow_next() {
        let input = "/**\n * @file logger.h\n */\n\n/**\n * @brief Sets level.\n */\nint log_set_level(int level);\n";
        let found = scan(input);
        assert_eq!(found.len(), 1);
        let body = found[0].comment.unwrap();
        assert!(body.contains("Sets level"));
        assert!(!body.contains("@file"));
    }

    #[test]
    fn multi_line_documented_prototype() {
        let input = "/** Sends. */\nint http_send(const char* url,\n              const char* body);\n";
        let found = scan(input);
        assert_eq!(found[0].name, "http_send");
        assert!(found[0].signature.contains("const char* body);"));
    }

    #[test]
    fn signature_is_escaped() {
        let found = scan("int cmp(vec<int> a);\n");
        assert_eq!(found[0].signature, "int cmp(vec&lt;int&gt; a);");
    }

    #[test]
    fn fallback_name_deduplicates() {
        let input = "int *(first)(void);\nint *(second)(void);\n";
        let found = scan(input);
        assert_eq!(names(&found), vec![FALLBACK_NAME]);
    }

    #[test]
    fn braces_in_comments_are_ignored() {
        let input = "/* note: { */\nint lost(void);\n// open { here\nint found(void);\n";
        assert_eq!(names(&scan(input)), vec!["lost", "found"]);
    }

    #[test]
    fn braces_in_multi_line_comment_are_ignored() {
        let input = "/*\n * usage: if (x) {\n */\nint after_comment(void);\n";
        assert_eq!(names(&scan(input)), vec!["after_comment"]);
    }

    #[test]
    fn braces_in_literals_are_ignored() {
        let input = "static const char OPEN = '{';\nstatic const char* FMT = \"{%s\";\nint still_top(void);\n";
        assert_eq!(names(&scan(input)), vec!["still_top"]);
    }

    #[test]
    fn bare_prototype_before_doc_block_on_same_line() {
        let input = "int first(void); /** Second. */\nint second(void);\n";
        let found = scan(input);
        assert_eq!(names(&found), vec!["second", "first"]);
        assert!(found[0].comment.is_some());
        assert!(found[1].comment.is_none());
    }

    #[test]
    fn no_prototypes() {
        assert!(scan("#define API_OK 0\nenum { A = 1 };\n").is_empty());
    }
}
