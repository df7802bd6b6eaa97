//! Notebook metadata extraction.
//!
//! Each notebook carries display metadata (title, description, tags) derived
//! entirely from its source text. Nothing is persisted between runs — every
//! export recomputes the full set from scratch.
//!
//! ## Sources and fallbacks
//!
//! Extraction is a best-effort heuristic over semi-structured text, so every
//! field has a guaranteed fallback and is never empty:
//!
//! - **Title**: first `# heading` at the start of a triple-quoted markdown
//!   block, trailing `*` decoration stripped. Falls back to the filename stem
//!   with underscores as spaces, title-cased (`wave_particle` → "Wave
//!   Particle").
//! - **Description**: first non-empty, non-heading line after the title
//!   inside the same block, capped at [`DESCRIPTION_MAX`] characters with a
//!   `...` ellipsis. Falls back to a templated sentence over the lower-cased
//!   title.
//! - **Tags**: ordered keyword table scanned against the case-folded source
//!   text and filename stem; first match wins position, duplicates dropped,
//!   at most [`MAX_TAGS`]. Falls back to `["Physics"]`.
//!
//! ## Numbering
//!
//! A notebook's display number is its 1-based position in the sorted listing
//! of its own directory. The number is positional, not an identity: adding
//! or removing files renumbers the set on the next run. A path missing from
//! its listing numbers itself `"0"` rather than erroring.
//!
//! ## Category
//!
//! Notebooks whose stem appears in the fixed [`FEYNMAN_SERIES`] set form the
//! lecture-series section of the index; everything else is an exploration.

use crate::locate;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read notebook {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Maximum description length, ellipsis included.
pub const DESCRIPTION_MAX: usize = 200;

/// Maximum number of inferred tags per notebook.
pub const MAX_TAGS: usize = 4;

/// Tag applied when no keyword matches.
const FALLBACK_TAG: &str = "Physics";

/// Notebook stems belonging to the lecture series.
pub const FEYNMAN_SERIES: &[&str] = &[
    "atoms_in_motion",
    "basic_physics",
    "conservation_of_energy",
    "gravitation",
    "motion",
    "probability",
    "time_and_distance",
];

/// Keyword → tag table, scanned in order against case-folded text.
///
/// First occurrence wins position in the tag list, so the physics keywords
/// come before the generic trailing entries.
const TAG_KEYWORDS: &[(&str, &str)] = &[
    ("gravit", "Gravity"),
    ("orbit", "Orbital Mechanics"),
    ("pendulum", "Mechanics"),
    ("momentum", "Mechanics"),
    ("electro", "Electromagnetism"),
    ("magnet", "Electromagnetism"),
    ("maxwell", "Electromagnetism"),
    ("relativ", "Relativity"),
    ("spacetime", "Relativity"),
    ("lorentz", "Relativity"),
    ("quantum", "Quantum Mechanics"),
    ("black hole", "Black Holes"),
    ("schwarzschild", "Black Holes"),
    ("event horizon", "Black Holes"),
    ("wormhole", "Exotic Physics"),
    ("tachyon", "Exotic Physics"),
    ("antimatter", "Exotic Physics"),
    ("three body", "Chaos"),
    ("three_body", "Chaos"),
    ("chaos", "Chaos"),
    ("wave", "Waves"),
    ("feynman", "Feynman Lectures"),
    ("animation", "Animations"),
    ("visualiz", "Visualizations"),
];

/// First `# heading` at the start of a triple-quoted markdown block.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"r?"{3}\s*#[ \t]+([^\r\n]+)"#).expect("invalid title regex"));

/// Index section a notebook belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Feynman,
    Exploration,
}

/// Display metadata for one notebook, derived from its source text.
///
/// Constructed once per notebook per export run; immutable afterwards.
/// `stem` is the identity key within one run, `number` is purely positional.
#[derive(Debug, Clone, Serialize)]
pub struct NotebookMetadata {
    /// 1-based position in the sorted directory listing, stringified.
    pub number: String,
    /// Filename without extension; unique within the notebook set.
    pub stem: String,
    /// Human-readable title. Never empty.
    pub title: String,
    /// Short explanatory sentence, at most [`DESCRIPTION_MAX`] characters.
    pub description: String,
    /// 1 to [`MAX_TAGS`] tags, deduplicated, in first-match order.
    pub tags: Vec<String>,
    /// Path to the source notebook file.
    pub path: PathBuf,
    /// Index section assignment.
    pub category: Category,
}

/// Read a notebook's source and derive its metadata.
///
/// A read failure propagates: the orchestrator only calls this on files it
/// just discovered, so an unreadable notebook is exceptional.
pub fn extract_metadata(path: &Path) -> Result<NotebookMetadata, ExtractError> {
    let source = fs::read_to_string(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let title = extract_title(&source).unwrap_or_else(|| title_from_stem(&stem));
    let description = extract_description(&source)
        .unwrap_or_else(|| format!("An interactive visualization of {}.", title.to_lowercase()));

    let category = if FEYNMAN_SERIES.contains(&stem.as_str()) {
        Category::Feynman
    } else {
        Category::Exploration
    };

    Ok(NotebookMetadata {
        number: position_number(path),
        tags: infer_tags(&source, &stem),
        title,
        description,
        stem,
        path: path.to_path_buf(),
        category,
    })
}

/// 1-based position of `path` in the sorted listing of its directory.
///
/// `"0"` when the path is not in the listing — an edge case that never
/// occurs in orchestrated use but must not panic.
fn position_number(path: &Path) -> String {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    match locate::locate_notebooks(dir).iter().position(|p| p == path) {
        Some(idx) => (idx + 1).to_string(),
        None => "0".to_string(),
    }
}

/// Extract the first markdown-block heading, trailing `*` stripped.
fn extract_title(source: &str) -> Option<String> {
    TITLE_RE
        .captures(source)
        .map(|cap| cap[1].trim().trim_end_matches('*').trim_end().to_string())
        .filter(|t| !t.is_empty())
}

/// First non-empty, non-heading line after the title within the same block.
fn extract_description(source: &str) -> Option<String> {
    let heading = TITLE_RE.find(source)?;
    let after = &source[heading.end()..];
    // The paragraph must live inside the same markdown block.
    let block = after.find(r#"""""#).map(|i| &after[..i]).unwrap_or(after);

    block
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(truncate_description)
}

/// Cap a description at [`DESCRIPTION_MAX`] characters, ellipsis included.
fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_MAX {
        text.to_string()
    } else {
        let head: String = text.chars().take(DESCRIPTION_MAX - 3).collect();
        format!("{head}...")
    }
}

/// Derive a title from the filename stem: underscores to spaces, each word
/// capitalized.
fn title_from_stem(stem: &str) -> String {
    stem.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scan source text and stem against the keyword table.
fn infer_tags(source: &str, stem: &str) -> Vec<String> {
    let haystack = format!("{}\n{}", source.to_lowercase(), stem.to_lowercase());

    let mut tags: Vec<String> = Vec::new();
    for (keyword, tag) in TAG_KEYWORDS {
        if tags.len() == MAX_TAGS {
            break;
        }
        if haystack.contains(keyword) && !tags.iter().any(|t| t == tag) {
            tags.push((*tag).to_string());
        }
    }

    if tags.is_empty() {
        tags.push(FALLBACK_TAG.to_string());
    }
    tags
}
