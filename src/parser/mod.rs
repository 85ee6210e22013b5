//! Parser module — prototype scanning plus doc comment parsing.

pub mod comment;
pub mod signature;

use crate::model::FunctionEntry;
use std::cmp::Ordering;

/// Extract the sorted, deduplicated function entries of one header.
pub fn extract(text: &str) -> Vec<FunctionEntry> {
    let mut entries: Vec<FunctionEntry> = signature::scan(text)
        .into_iter()
        .map(|proto| FunctionEntry {
            name: proto.name,
            signature: proto.signature,
            doc: proto.comment.map(comment::parse),
        })
        .collect();

    // Stable sort for a deterministic table of contents
    entries.sort_by(|a, b| name_order(&a.name, &b.name));
    entries
}

/// Dictionary order: case-insensitive, lowercase before uppercase on ties.
fn name_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .find(|(x, y)| x != y)
                .map(|(x, y)| y.is_lowercase().cmp(&x.is_lowercase()))
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.cmp(b))
}
