//! Site configuration.
//!
//! Handles loading and validating `config.toml` from the notebooks
//! directory. Every option has a sensible default, so the file is optional
//! and may be sparse — override just the values you want. Unknown keys are
//! rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Interactive Physics Notebooks"  # Landing page title
//! # repository = "https://github.com/you/notebooks"  # Footer source link
//!
//! [renderer]
//! program = "marimo"        # External notebook-to-HTML command
//! timeout_secs = 180        # Per-notebook export ceiling
//! include_code = false      # Show notebook source in exported pages
//!
//! [processing]
//! max_workers = 4           # Max parallel exports (omit for auto = CPU cores)
//! ```
//!
//! When `repository` is unset, the orchestrator falls back to the CI
//! environment (`GITHUB_REPOSITORY`); when that is unset too, the footer
//! link is an inert placeholder.

use crate::index::DEFAULT_SITE_TITLE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration filename looked up in the notebooks directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Landing page title.
    pub title: String,
    /// Source-repository URL for the index footer. Overrides the CI
    /// environment when set.
    pub repository: Option<String>,
    /// External renderer settings.
    pub renderer: RendererConfig,
    /// Parallel export settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_SITE_TITLE.to_string(),
            repository: None,
            renderer: RendererConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.renderer.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "renderer.program must not be empty".into(),
            ));
        }
        if self.renderer.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "renderer.timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// External renderer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Command invoked as `<program> export html <source> -o <output>`.
    pub program: String,
    /// Per-notebook export ceiling in seconds.
    pub timeout_secs: u64,
    /// Whether exported pages display notebook source code.
    pub include_code: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: "marimo".to_string(),
            timeout_secs: 180,
            include_code: false,
        }
    }
}

/// Parallel export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel export workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_workers(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load `config.toml` from the notebooks directory, falling back to
/// defaults when the file does not exist. The loaded config is validated.
pub fn load_config(source_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let path = source_dir.join(CONFIG_FILE);
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A fully documented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> String {
    r#"# lectern site configuration
# All options are optional - the values below are the defaults.

# Landing page title.
title = "Interactive Physics Notebooks"

# Source-repository URL for the index footer. When unset, lectern falls
# back to the GITHUB_REPOSITORY environment variable (set by CI), and
# renders an inert placeholder link when that is unset too.
# repository = "https://github.com/you/notebooks"

[renderer]
# External notebook-to-HTML command, invoked as:
#   <program> export html <notebook> -o <output> [--no-include-code]
program = "marimo"
# Per-notebook export ceiling, in seconds.
timeout_secs = 180
# Show notebook source code in exported pages.
include_code = false

[processing]
# Maximum number of parallel exports. Omit for auto (one per CPU core).
# Values above the core count are clamped down.
# max_workers = 4
"#
    .to_string()
}
