//! # Lectern
//!
//! A static site exporter for collections of interactive notebooks. Your
//! filesystem is the data source: each notebook source file in one flat
//! directory becomes an exported HTML page, and the collection becomes a
//! static landing page grouped into a lecture series and explorations.
//!
//! # Architecture: Batch Export Pipeline
//!
//! One export run flows through four stages:
//!
//! ```text
//! 1. Locate    notebooks/        →  sorted source list
//! 2. Extract   source text       →  NotebookMetadata per file
//! 3. Render    each notebook     →  {stem}.html   (external renderer)
//! 4. Index     full metadata set →  index.html
//! ```
//!
//! The stages are independent functions over plain data, so each is
//! testable without the others: discovery never reads file contents,
//! extraction never writes, rendering is hidden behind a trait, and index
//! generation is a pure function of the metadata collection. Everything is
//! recomputed from scratch on every run — there is no cross-run state, and
//! re-running over the same inputs overwrites the same outputs.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`locate`] | Stage 1 — sorted, non-recursive notebook discovery |
//! | [`metadata`] | Stage 2 — title/description/tag/category extraction from source text |
//! | [`render`] | Stage 3 — the external renderer boundary: subprocess backend, timeout, structured failures |
//! | [`index`] | Stage 4 — index and about page rendering with Maud |
//! | [`pipeline`] | The orchestrator composing stages 1–4 into `export_all` |
//! | [`config`] | `config.toml` loading, validation, and the documented stock config |
//! | [`output`] | CLI output formatting — information-first inventory display |
//!
//! # Design Decisions
//!
//! ## The Renderer Is a Capability, Not a Library
//!
//! Notebook-to-HTML conversion is owned by an external tool (marimo by
//! default) and reached through the [`render::NotebookRenderer`] trait.
//! lectern never parses notebook semantics — it orchestrates the renderer
//! and surfaces its failures with the exit code and both captured streams.
//! This keeps the pipeline honest about what it can guarantee and makes the
//! backend swappable in tests.
//!
//! ## Best-Effort Metadata, Guaranteed Fallbacks
//!
//! Titles and descriptions are extracted by pattern matching over
//! markdown-literal blocks in the notebook source. That is inherently
//! fragile, so the extractor's contract is not "parse correctly" but
//! "always produce a valid, non-empty title and description": every field
//! has a deterministic fallback derived from the filename or title.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are
//! compile-time-checked Rust, interpolation is auto-escaped, and there is
//! no template directory to ship or get out of sync.
//!
//! ## Fail-Fast Batches
//!
//! One broken notebook fails the whole export. The intended use is a CI
//! documentation build, where a partially exported site is worse than a
//! loud failure.

pub mod config;
pub mod index;
pub mod locate;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;
