//! Shared test utilities for the lectern test suite.
//!
//! Provides notebook fixture writers and canned metadata sets used across
//! module tests. Fixtures are generated programmatically — a notebook here
//! is just a source file with a markdown block in the expected shape.

use std::fs;
use std::path::{Path, PathBuf};

use crate::metadata::{Category, NotebookMetadata};

/// Build a minimal notebook source with a markdown title block.
///
/// The shape mirrors what the notebook runner produces: a cell calling
/// into the markdown helper with a raw triple-quoted literal.
pub fn notebook_source(title: &str, description: &str) -> String {
    format!(
        r#"import marimo

app = marimo.App()


@app.cell
def _(mo):
    mo.md(
        r"""
    # {title}

    {description}
    """
    )
    return


if __name__ == "__main__":
    app.run()
"#
    )
}

/// Write a notebook source file and return its path.
pub fn write_notebook(dir: &Path, stem: &str, source: &str) -> PathBuf {
    let path = dir.join(format!("{stem}.py"));
    fs::write(&path, source).unwrap();
    path
}

/// A canned metadata set: two lecture-series notebooks and one exploration,
/// in filename-sorted order.
pub fn sample_metadata() -> Vec<NotebookMetadata> {
    vec![
        NotebookMetadata {
            number: "1".to_string(),
            stem: "gravitation".to_string(),
            title: "Gravitation".to_string(),
            description: "Newton's law of universal gravitation.".to_string(),
            tags: vec!["Gravity".to_string(), "Feynman Lectures".to_string()],
            path: PathBuf::from("notebooks/gravitation.py"),
            category: Category::Feynman,
        },
        NotebookMetadata {
            number: "2".to_string(),
            stem: "motion".to_string(),
            title: "Motion".to_string(),
            description: "Position, velocity, and acceleration.".to_string(),
            tags: vec!["Mechanics".to_string()],
            path: PathBuf::from("notebooks/motion.py"),
            category: Category::Feynman,
        },
        NotebookMetadata {
            number: "3".to_string(),
            stem: "three_body".to_string(),
            title: "The Three-Body Problem".to_string(),
            description: "Chaos in three-body orbits.".to_string(),
            tags: vec!["Chaos".to_string(), "Physics".to_string()],
            path: PathBuf::from("notebooks/three_body.py"),
            category: Category::Exploration,
        },
    ]
}

/// Find a metadata record by stem. Panics with a clear message on miss.
pub fn find_notebook<'a>(set: &'a [NotebookMetadata], stem: &str) -> &'a NotebookMetadata {
    set.iter().find(|n| n.stem == stem).unwrap_or_else(|| {
        let stems: Vec<&str> = set.iter().map(|n| n.stem.as_str()).collect();
        panic!("notebook '{stem}' not found. Available: {stems:?}")
    })
}
