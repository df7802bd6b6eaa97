//! Export orchestration.
//!
//! [`export_all`] composes the pipeline stages into one batch operation:
//!
//! ```text
//! 1. locate     notebooks/           → sorted source list
//! 2. extract    each source          → NotebookMetadata
//! 3. render     each source          → {output}/{stem}.html   (worker pool)
//! 4. index      full metadata set    → {output}/index.html
//! ```
//!
//! The returned path list holds one HTML file per notebook, in
//! filename-sorted order, followed by the index page (and the about page
//! just before it, when `about.md` exists in the source directory).
//!
//! ## Failure semantics
//!
//! Fail-fast, no partial-success mode: the first notebook whose export
//! fails aborts the whole batch. This is a documentation build step, not a
//! service — partial output in CI would be misleading.
//!
//! ## Ordering under parallelism
//!
//! Renders fan out across the worker pool, but results are collected back
//! in input order, so the returned list and the index generator's input
//! both keep filename-sorted order regardless of pool width. Re-running
//! against the same inputs overwrites prior artifacts in place.

use crate::index::{self, IndexError};
use crate::locate;
use crate::metadata::{self, ExtractError, NotebookMetadata};
use crate::render::{NotebookRenderer, RenderError};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable carrying the CI repository identifier
/// (`owner/name`), used for the index footer's source link.
pub const REPO_ENV_VAR: &str = "GITHUB_REPOSITORY";

/// Markdown file in the source directory rendered as the site's about page.
const ABOUT_PAGE: &str = "about.md";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Inputs for one export run.
pub struct ExportOptions {
    /// Directory holding notebook source files.
    pub source_dir: PathBuf,
    /// Destination for HTML artifacts; created if absent.
    pub output_dir: PathBuf,
    /// Whether exported notebooks display their source code.
    pub include_code: bool,
    /// Landing page title.
    pub site_title: String,
    /// Source-repository URL for the index footer, already resolved.
    pub repo_url: Option<String>,
}

impl ExportOptions {
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            include_code: false,
            site_title: index::DEFAULT_SITE_TITLE.to_string(),
            repo_url: None,
        }
    }
}

/// Resolve the repository URL from the CI environment, once, at the
/// orchestration boundary. The index generator itself never reads the
/// environment.
pub fn repo_url_from_env() -> Option<String> {
    std::env::var(REPO_ENV_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(|v| format!("https://github.com/{v}"))
}

/// Extract metadata for every located notebook, in located order.
pub fn scan(source_dir: &Path) -> Result<Vec<NotebookMetadata>, ExtractError> {
    locate::locate_notebooks(source_dir)
        .iter()
        .map(|path| metadata::extract_metadata(path))
        .collect()
}

/// Export every notebook and generate the index page.
///
/// Returns all produced paths: N notebook pages in filename-sorted order,
/// then the index (preceded by the about page when one exists).
pub fn export_all(
    opts: &ExportOptions,
    renderer: &dyn NotebookRenderer,
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(&opts.output_dir)?;

    let notebooks = scan(&opts.source_dir)?;

    let mut produced: Vec<PathBuf> = notebooks
        .par_iter()
        .map(|nb| {
            let output = opts.output_dir.join(format!("{}.html", nb.stem));
            renderer.render(&nb.path, &output, opts.include_code)?;
            Ok(output)
        })
        .collect::<Result<Vec<_>, RenderError>>()?;

    let about_md = opts.source_dir.join(ABOUT_PAGE);
    let about = if about_md.exists() {
        Some(fs::read_to_string(&about_md)?)
    } else {
        None
    };

    if let Some(markdown) = &about {
        produced.push(index::write_about_page(
            markdown,
            &opts.output_dir,
            &opts.site_title,
        )?);
    }

    produced.push(index::write_index(
        &notebooks,
        &opts.output_dir,
        &opts.site_title,
        about.as_deref().map(|_| "About"),
        opts.repo_url.as_deref(),
    )?);

    Ok(produced)
}
