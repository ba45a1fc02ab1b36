//! Command implementations

use std::path::PathBuf;

use anyhow::{Context, Result};

pub mod build_config;
pub mod prepare;

/// Resolve `--root`, defaulting to the current directory.
pub fn platform_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("failed to determine current directory"),
    }
}
