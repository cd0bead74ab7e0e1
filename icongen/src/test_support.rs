//! Test-only helpers: scripted converters and throwaway project directories.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::config::{CONFIG_FILE_NAME, IconConfig};
use crate::convert::{Conversion, ConvertRequest, Converter};
use crate::paths::AssetPaths;

/// Minimal vector icon accepted by [`FAKE_RASTERIZER`].
pub const SAMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64"><circle cx="32" cy="32" r="30" fill="#3a7bd5"/></svg>
"##;

/// Stand-in for `convert`, run as `sh <script> <args...>`.
///
/// Records its arguments next to the output, rejects inputs that are missing
/// or not SVG, and otherwise writes a placeholder bitmap.
pub const FAKE_RASTERIZER: &str = r#"#!/bin/sh
# -background BG -density DPI INPUT -resize WxH OUTPUT
input="$5"
output="$8"
printf '%s\n' "$@" > "$output.args"
if ! grep -q '<svg' "$input" 2>/dev/null; then
  echo "convert: unable to open image '$input'" >&2
  exit 1
fi
printf 'PNG %s\n' "$7" > "$output"
"#;

/// Stand-in that never finishes on its own.
pub const HANGING_RASTERIZER: &str = "#!/bin/sh\nexec sleep 30\n";

/// Stand-in whose shell stays alive while a child of its own holds the pipes.
pub const FORKING_RASTERIZER: &str = "#!/bin/sh\nsleep 30\ntrue\n";

/// Stand-in that succeeds but warns on stderr, as `convert` does for some SVGs.
pub const WARNING_RASTERIZER: &str = r#"#!/bin/sh
echo "convert: unknown font family 'Inter'" >&2
printf 'PNG %s\n' "$7" > "$8"
"#;

/// Converter that replays queued outcomes and records every request.
pub struct ScriptedConverter {
    outcomes: RefCell<VecDeque<Conversion>>,
    requests: RefCell<Vec<ConvertRequest>>,
}

impl ScriptedConverter {
    pub fn new(outcomes: Vec<Conversion>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ConvertRequest> {
        self.requests.borrow().clone()
    }
}

impl Converter for ScriptedConverter {
    fn convert(&self, request: &ConvertRequest) -> Result<Conversion> {
        self.requests.borrow_mut().push(request.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("scripted converter exhausted"))
    }
}

/// Temporary base directory laid out like an installed generator.
pub struct TestProject {
    dir: TempDir,
    config: IconConfig,
}

impl TestProject {
    /// Create an empty project with an `assets/` directory and default config.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp project")?;
        let config = IconConfig::default();
        fs::create_dir_all(dir.path().join(&config.assets_dir)).context("create assets dir")?;
        Ok(Self { dir, config })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    pub fn paths(&self) -> AssetPaths {
        AssetPaths::new(self.path(), &self.config)
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join(CONFIG_FILE_NAME)
    }

    /// Write the vector source at the configured input path.
    pub fn write_icon(&self, contents: &str) -> Result<()> {
        let input = self.paths().input_path;
        fs::write(&input, contents).with_context(|| format!("write {}", input.display()))
    }

    /// Install `script` as the rasterizer and persist the config to `icongen.toml`.
    pub fn use_rasterizer_script(&mut self, script: &str) -> Result<PathBuf> {
        let script_path = self.path().join("fake-convert.sh");
        fs::write(&script_path, script)
            .with_context(|| format!("write {}", script_path.display()))?;
        self.config.convert.command = vec![
            "sh".to_string(),
            script_path.to_string_lossy().into_owned(),
        ];
        self.save_config()?;
        Ok(script_path)
    }

    /// Point the command straight at a file without execute permission.
    pub fn use_non_executable_rasterizer(&mut self) -> Result<PathBuf> {
        let script_path = self.path().join("fake-convert.sh");
        fs::write(&script_path, FAKE_RASTERIZER)
            .with_context(|| format!("write {}", script_path.display()))?;
        self.config.convert.command = vec![script_path.to_string_lossy().into_owned()];
        self.save_config()?;
        Ok(script_path)
    }

    /// Use a program that does not exist anywhere on `PATH`.
    pub fn use_missing_rasterizer(&mut self) -> Result<()> {
        self.config.convert.command = vec!["icongen-test-no-such-rasterizer".to_string()];
        self.save_config()
    }

    pub fn set_timeout_secs(&mut self, timeout_secs: u64) -> Result<()> {
        self.config.timeout_secs = timeout_secs;
        self.save_config()
    }

    fn save_config(&self) -> Result<()> {
        let buf = toml::to_string(&self.config).context("serialize config toml")?;
        let path = self.config_path();
        fs::write(&path, buf).with_context(|| format!("write {}", path.display()))
    }
}
