//! CLI infrastructure for minicheckers
//!
//! This module provides the command-line interface for playing against the
//! agent and for inspecting or exporting what it has learned.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::AppConfig;

pub mod commands;
pub mod output;

/// Load the application config, or defaults when no file is given.
pub fn load_app_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

/// Table path from the command line, falling back to the configured one.
pub fn resolve_table_path(config: &AppConfig, table: Option<PathBuf>) -> PathBuf {
    table.unwrap_or_else(|| config.storage.table_path.clone())
}
