//! Notebook discovery.
//!
//! A notebook collection is a flat directory: one source file per notebook,
//! identified by extension. Discovery is non-recursive and tolerant — a
//! missing or unreadable directory means there is nothing to export, not an
//! error. Callers that require a non-empty set (the `check` command does)
//! enforce that themselves.
//!
//! The returned list is sorted by filename, and that order is load-bearing:
//! it defines each notebook's display number and the card order on the
//! generated index page. Re-running against an unchanged directory yields an
//! identical list.

use std::fs;
use std::path::{Path, PathBuf};

/// File extension identifying a notebook source file.
pub const NOTEBOOK_EXTENSION: &str = "py";

/// List all notebook sources directly inside `dir`, sorted by filename.
///
/// Hidden files are skipped. A missing or unreadable directory yields an
/// empty list.
pub fn locate_notebooks(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut notebooks: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let hidden = p
                .file_name()
                .map(|n| n.to_string_lossy().starts_with('.'))
                .unwrap_or(true);
            !hidden
                && p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case(NOTEBOOK_EXTENSION))
                    .unwrap_or(false)
        })
        .collect();

    notebooks.sort();
    notebooks
}
