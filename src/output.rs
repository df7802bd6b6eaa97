//! CLI output formatting.
//!
//! Output is information-centric, not file-centric: the primary display for
//! every notebook is its semantic identity — positional number and title —
//! with filesystem paths shown as indented `Source:` context lines. The
//! inventory reads as a table of contents while still letting users trace
//! entries back to files.
//!
//! ```text
//! Feynman Lectures Series
//! 001 Gravitation
//!     Source: gravitation.py
//!     Tags: Gravity, Feynman Lectures
//!
//! Explorations
//! 002 The Three-Body Problem
//!     Source: three_body.py
//!     Tags: Chaos, Physics
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::metadata::{Category, NotebookMetadata};
use std::path::{Path, PathBuf};

/// Format a positional number as 3-digit zero-padded.
fn format_number(number: &str) -> String {
    format!("{number:0>3}")
}

fn format_entry(nb: &NotebookMetadata) -> Vec<String> {
    let source = nb
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| nb.path.display().to_string());

    vec![
        format!("{} {}", format_number(&nb.number), nb.title),
        format!("    Source: {source}"),
        format!("    Tags: {}", nb.tags.join(", ")),
    ]
}

/// Format the scan inventory, grouped into the two index sections.
pub fn format_scan_output(notebooks: &[NotebookMetadata]) -> Vec<String> {
    let mut lines = Vec::new();

    let sections = [
        ("Feynman Lectures Series", Category::Feynman),
        ("Explorations", Category::Exploration),
    ];

    for (heading, category) in sections {
        let entries: Vec<&NotebookMetadata> = notebooks
            .iter()
            .filter(|n| n.category == category)
            .collect();
        if entries.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(heading.to_string());
        for nb in entries {
            lines.extend(format_entry(nb));
        }
    }

    if lines.is_empty() {
        lines.push("No notebooks found".to_string());
    }
    lines
}

/// Format the export result: produced files relative to the output
/// directory, then a summary line.
pub fn format_export_output(paths: &[PathBuf], output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = paths
        .iter()
        .map(|p| {
            p.strip_prefix(output_dir)
                .unwrap_or(p)
                .display()
                .to_string()
        })
        .collect();

    lines.push(String::new());
    lines.push(format!(
        "Exported {} files → {}",
        paths.len(),
        output_dir.display()
    ));
    lines
}

pub fn print_scan_output(notebooks: &[NotebookMetadata]) {
    for line in format_scan_output(notebooks) {
        println!("{line}");
    }
}

pub fn print_export_output(paths: &[PathBuf], output_dir: &Path) {
    for line in format_export_output(paths, output_dir) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_metadata;

    #[test]
    fn scan_output_groups_by_section() {
        let lines = format_scan_output(&sample_metadata());
        let joined = lines.join("\n");

        let feynman_at = joined.find("Feynman Lectures Series").unwrap();
        let explorations_at = joined.find("Explorations").unwrap();
        assert!(feynman_at < explorations_at);
        assert!(joined.find("Gravitation").unwrap() < explorations_at);
        assert!(joined.find("Three-Body").unwrap() > explorations_at);
    }

    #[test]
    fn entries_show_number_source_and_tags() {
        let lines = format_scan_output(&sample_metadata());
        let joined = lines.join("\n");

        assert!(joined.contains("001 Gravitation"));
        assert!(joined.contains("    Source: gravitation.py"));
        assert!(joined.contains("    Tags: "));
    }

    #[test]
    fn empty_set_reports_nothing_found() {
        assert_eq!(format_scan_output(&[]), vec!["No notebooks found"]);
    }

    #[test]
    fn export_output_relativizes_paths_and_counts() {
        let out = Path::new("/site/docs");
        let paths = vec![
            PathBuf::from("/site/docs/gravitation.html"),
            PathBuf::from("/site/docs/index.html"),
        ];

        let lines = format_export_output(&paths, out);
        assert_eq!(lines[0], "gravitation.html");
        assert_eq!(lines[1], "index.html");
        assert!(lines.last().unwrap().contains("Exported 2 files"));
    }
}
