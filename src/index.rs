//! Static index and about page generation.
//!
//! Renders the landing page for one export run: a fixed header, a "Feynman
//! Lectures Series" section, an "Explorations" section, and a footer
//! crediting the rendering toolkit with an optional source-repository link.
//! Every notebook appears in exactly one section, as a card linking to
//! `{stem}.html`, in the same order the metadata collection was supplied
//! (filename-sorted order in orchestrated use).
//!
//! Rendering is a pure function of its arguments — the repository URL is
//! resolved by the orchestrator and passed in, never read from the
//! environment here — so the only I/O in this module is the final file
//! write. Two runs over the same metadata produce byte-identical HTML.
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/): compile-time
//! checked templates with automatic escaping, so notebook titles and
//! descriptions cannot inject markup. The stylesheet is embedded at compile
//! time and inlined into each page.

use crate::metadata::{Category, NotebookMetadata};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = include_str!("../static/style.css");

/// Default page title, overridable via `config.toml`.
pub const DEFAULT_SITE_TITLE: &str = "Interactive Physics Notebooks";

const SITE_TAGLINE: &str = "Visual, interactive explorations of physics";

/// Render and write `index.html` into `output_dir` (created if absent).
pub fn write_index(
    notebooks: &[NotebookMetadata],
    output_dir: &Path,
    site_title: &str,
    about_title: Option<&str>,
    repo_url: Option<&str>,
) -> Result<PathBuf, IndexError> {
    fs::create_dir_all(output_dir)?;
    let page = render_index(notebooks, site_title, about_title, repo_url);
    let path = output_dir.join("index.html");
    fs::write(&path, page.into_string())?;
    Ok(path)
}

/// Render and write `about.html` from markdown page content.
pub fn write_about_page(
    markdown: &str,
    output_dir: &Path,
    site_title: &str,
) -> Result<PathBuf, IndexError> {
    fs::create_dir_all(output_dir)?;
    let page = render_about_page(markdown, site_title);
    let path = output_dir.join("about.html");
    fs::write(&path, page.into_string())?;
    Ok(path)
}

/// Renders the base HTML document structure shared by all pages.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(site_title: &str, about_title: Option<&str>) -> Markup {
    html! {
        header.site-header {
            h1 { (site_title) }
            p.tagline { (SITE_TAGLINE) }
            @if let Some(about) = about_title {
                nav { a href="about.html" { (about) } }
            }
        }
    }
}

/// Footer crediting the rendering toolkit. The repository link falls back
/// to an inert placeholder when no URL is available.
fn site_footer(repo_url: Option<&str>) -> Markup {
    html! {
        footer.site-footer {
            span {
                "Built with "
                a href="https://marimo.io" { "marimo" }
            }
            a href=(repo_url.unwrap_or("#")) { "Source" }
        }
    }
}

/// Renders the full landing page.
pub fn render_index(
    notebooks: &[NotebookMetadata],
    site_title: &str,
    about_title: Option<&str>,
    repo_url: Option<&str>,
) -> Markup {
    let feynman: Vec<&NotebookMetadata> = notebooks
        .iter()
        .filter(|n| n.category == Category::Feynman)
        .collect();
    let explorations: Vec<&NotebookMetadata> = notebooks
        .iter()
        .filter(|n| n.category == Category::Exploration)
        .collect();

    let content = html! {
        (site_header(site_title, about_title))
        main {
            @if !feynman.is_empty() {
                h2.section-title { "Feynman Lectures Series" }
                div.notebook-grid {
                    @for nb in &feynman {
                        (notebook_card(nb, false))
                    }
                }
            }
            @if !explorations.is_empty() {
                h2.section-title { "Explorations" }
                div.notebook-grid {
                    @for nb in &explorations {
                        (notebook_card(nb, true))
                    }
                }
            }
        }
        (site_footer(repo_url))
    };

    base_document(site_title, content)
}

/// Renders one notebook card, linking to its exported HTML.
fn notebook_card(nb: &NotebookMetadata, badge: bool) -> Markup {
    html! {
        a.notebook-card href={ (nb.stem) ".html" } {
            span.card-number { (nb.number) }
            h3.card-title {
                (nb.title)
                @if badge { span.card-badge { "Exploration" } }
            }
            p.card-description { (nb.description) }
            ul.card-tags {
                @for tag in &nb.tags {
                    li.tag { (tag) }
                }
            }
        }
    }
}

/// Renders the about page from markdown content.
fn render_about_page(markdown: &str, site_title: &str) -> Markup {
    let parser = Parser::new(markdown);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    let content = html! {
        header.site-header {
            h1 { (site_title) }
            nav { a href="index.html" { "Index" } }
        }
        main {
            article.about-content {
                (PreEscaped(body_html))
            }
        }
    };

    base_document(site_title, content)
}
