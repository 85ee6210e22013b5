//! Data model for extracted header documentation — format-agnostic.

use std::path::PathBuf;

/// A single C header read from the input directory.
#[derive(Debug)]
pub struct HeaderFile {
    pub path: PathBuf,
    /// File stem ("logger" for `logger.h`), used for the output file name.
    pub name: String,
    /// Full file name ("logger.h"), used in titles and provenance notices.
    pub file_name: String,
    pub text: String,
}

/// One function prototype discovered in a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEntry {
    pub name: String,
    /// Trimmed prototype text with `<` and `>` already HTML-escaped.
    pub signature: String,
    pub doc: Option<StructuredComment>,
}

impl FunctionEntry {
    pub fn has_doc(&self) -> bool {
        self.doc.is_some()
    }
}

/// Parsed `/** ... */` block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StructuredComment {
    /// @brief
    pub brief: Option<String>,
    /// Untagged prose lines joined with newlines
    pub description: Option<String>,
    /// @param entries, in encounter order (duplicates kept)
    pub parameters: Vec<Parameter>,
    /// @return / @returns
    pub returns: Option<String>,
    /// @error entries
    pub errors: Vec<String>,
    /// @example block, dedented
    pub example: Option<String>,
    /// @since
    pub since: Option<String>,
}

impl StructuredComment {
    pub fn is_empty(&self) -> bool {
        self.brief.is_none()
            && self.description.is_none()
            && self.parameters.is_empty()
            && self.returns.is_none()
            && self.errors.is_empty()
            && self.example.is_none()
            && self.since.is_none()
    }
}

/// Parsed @param entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub description: String,
    /// Doxygen direction attribute, e.g. "in" from `@param [in] name`
    pub direction: Option<String>,
}

/// Rendered page for one header.
#[derive(Debug)]
pub struct RenderedDocument {
    pub name: String,
    pub file_name: String,
    pub entries: Vec<FunctionEntry>,
    pub text: String,
}

/// Run-wide counters used for the summary line and the exit status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionReport {
    pub headers: usize,
    pub documents: usize,
    pub functions: usize,
    pub documented: usize,
}
