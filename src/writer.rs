//! Output directory handling: page writes, the landing page and stale-page pruning.

use crate::model::RenderedDocument;
use crate::render::GENERATED_MARKER;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Landing page written on every run, regardless of what the headers contain.
pub const LANDING_PAGE: &str = "getting-started.mdx";

const LANDING_CONTENT: &str = "---
title: Getting Started
---
This site is **auto-generated** from the C header files in `headers/`.

- Document functions with `/** ... */` comments using `@brief`, `@param`, `@return`, `@error`, `@since` and `@example`
- Regenerate the pages with `hdrdoc`
- Each header gets one page named after the header file
";

/// Create the output directory if it does not exist.
pub fn prepare_output(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))
}

/// Remove pages left behind by earlier runs. Only files with the given
/// extension that carry [`GENERATED_MARKER`] are deleted; hand-written pages
/// are left alone. Returns the number of files removed.
pub fn prune_stale(dir: &Path, extension: &str) -> Result<usize> {
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        extension
    );

    let mut removed = 0;
    for entry in glob::glob(&pattern).with_context(|| format!("invalid glob pattern: {}", pattern))? {
        let path = entry.with_context(|| format!("failed to read directory: {}", dir.display()))?;
        if !path.is_file() {
            continue;
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if content.contains(GENERATED_MARKER) {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
            tracing::debug!("Removed stale page {}", path.display());
            removed += 1;
        }
    }
    Ok(removed)
}

/// Write one rendered page as `<name>.<extension>`.
pub fn write_document(dir: &Path, doc: &RenderedDocument, extension: &str) -> Result<PathBuf> {
    let out_path = dir.join(format!("{}.{}", doc.name, extension));
    fs::write(&out_path, &doc.text)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(out_path)
}

/// Write the fixed landing page.
pub fn write_landing(dir: &Path) -> Result<PathBuf> {
    let out_path = dir.join(LANDING_PAGE);
    fs::write(&out_path, LANDING_CONTENT)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(out_path)
}
