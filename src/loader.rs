//! Header discovery and loading.

use crate::error::ExtractError;
use crate::model::HeaderFile;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension recognized as a C header.
const HEADER_EXTENSION: &str = "h";

/// List the `.h` files directly inside `dir` (non-recursive).
///
/// Fails with [`ExtractError::MissingInputDirectory`] when `dir` is absent and
/// [`ExtractError::NoHeadersFound`] when it contains no headers.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ExtractError::MissingInputDirectory(dir.to_path_buf()).into());
    }

    let root = dir
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", dir.display()))?;
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        HEADER_EXTENSION
    );

    let mut headers = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("invalid glob pattern: {}", pattern))? {
        let path = entry.with_context(|| format!("failed to read directory: {}", root.display()))?;
        if path.is_file() {
            headers.push(path);
        }
    }

    if headers.is_empty() {
        return Err(ExtractError::NoHeadersFound(dir.to_path_buf()).into());
    }
    Ok(headers)
}

/// Read one header into memory.
pub fn load(path: &Path) -> Result<HeaderFile> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(HeaderFile {
        path: path.to_path_buf(),
        name: derive_output_name(&file_name),
        file_name,
        text,
    })
}

/// Derive the output document name from a header file name.
/// "logger.h" → "logger", "api.v2.h" → "api.v2"
fn derive_output_name(file_name: &str) -> String {
    file_name
        .strip_suffix(".h")
        .unwrap_or(file_name)
        .to_string()
}
