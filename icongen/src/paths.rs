//! Asset path resolution relative to the running executable.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{CONFIG_FILE_NAME, IconConfig};

/// All paths the generator touches, derived from one base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub base_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl AssetPaths {
    pub fn new(base_dir: impl Into<PathBuf>, config: &IconConfig) -> Self {
        let base_dir = base_dir.into();
        let assets_dir = base_dir.join(&config.assets_dir);
        Self {
            base_dir: base_dir.clone(),
            assets_dir: assets_dir.clone(),
            input_path: assets_dir.join(&config.input),
            output_path: assets_dir.join(&config.output),
        }
    }

    /// Resolve paths from the directory containing the current executable.
    pub fn from_executable(config: &IconConfig) -> Result<Self> {
        Ok(Self::new(executable_dir()?, config))
    }
}

/// Directory containing the running executable.
///
/// Independent of the caller's working directory.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("resolve current executable")?;
    let dir = exe
        .parent()
        .with_context(|| format!("executable has no parent directory: {}", exe.display()))?;
    Ok(dir.to_path_buf())
}

/// Default config location for a base directory.
pub fn default_config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(CONFIG_FILE_NAME)
}
