//! Generator configuration, optionally stored as `icongen.toml` next to the binary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// File name looked up in the base directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "icongen.toml";

/// Generator configuration (TOML).
///
/// Every field has a default, and the defaults reproduce the fixed
/// `convert -background none -density 72 icon.svg -resize 256x256 aetherStream.png`
/// invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IconConfig {
    /// Assets directory, relative to the base directory.
    pub assets_dir: PathBuf,

    /// Vector source, relative to the assets directory.
    pub input: PathBuf,

    /// Bitmap destination, relative to the assets directory.
    pub output: PathBuf,

    /// Wall-clock bound on the rasterizer in seconds.
    pub timeout_secs: u64,

    /// Keep at most this many bytes of rasterizer stdout/stderr.
    pub output_limit_bytes: usize,

    pub convert: ConvertSettings,
}

/// Rasterizer invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConvertSettings {
    /// Program followed by leading arguments (e.g. `["magick", "convert"]`).
    pub command: Vec<String>,
    pub background: String,
    pub density: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            command: vec!["convert".to_string()],
            background: "none".to_string(),
            density: 72,
            width: 256,
            height: 256,
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            input: PathBuf::from("icon.svg"),
            output: PathBuf::from("aetherStream.png"),
            timeout_secs: 5 * 60,
            output_limit_bytes: 100_000,
            convert: ConvertSettings::default(),
        }
    }
}

impl ConvertSettings {
    /// Program name, i.e. the first element of `command`.
    pub fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }

    /// `-resize` geometry, e.g. `256x256`.
    pub fn geometry(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl IconConfig {
    pub fn validate(&self) -> Result<()> {
        if self.convert.command.is_empty() || self.convert.command[0].trim().is_empty() {
            return Err(anyhow!("convert.command must be a non-empty array"));
        }
        if self.convert.density == 0 {
            return Err(anyhow!("convert.density must be > 0"));
        }
        if self.convert.width == 0 || self.convert.height == 0 {
            return Err(anyhow!("convert.width and convert.height must be > 0"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be > 0"));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        if self.assets_dir.as_os_str().is_empty() {
            return Err(anyhow!("assets_dir must not be empty"));
        }
        if self.input.as_os_str().is_empty() || self.output.as_os_str().is_empty() {
            return Err(anyhow!("input and output must not be empty"));
        }
        Ok(())
    }
}

/// Command-line overrides applied on top of the loaded config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Replace `convert.command` with this single program.
    pub tool: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Apply CLI overrides to `base` and re-validate.
pub fn apply_overrides(mut base: IconConfig, overrides: &Overrides) -> Result<IconConfig> {
    if let Some(tool) = &overrides.tool {
        base.convert.command = vec![tool.clone()];
    }
    if let Some(timeout_secs) = overrides.timeout_secs {
        base.timeout_secs = timeout_secs;
    }
    base.validate()?;
    Ok(base)
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `IconConfig::default()`.
pub fn load_config(path: &Path) -> Result<IconConfig> {
    if !path.exists() {
        let cfg = IconConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: IconConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
