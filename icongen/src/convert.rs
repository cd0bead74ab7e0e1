//! Rasterizer invocation and outcome classification.
//!
//! The [`Converter`] trait separates the generator flow from the process that
//! does the work (ImageMagick's `convert` by default). Tests use scripted
//! converters that return predetermined outcomes without spawning anything.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::config::{ConvertSettings, IconConfig};
use crate::paths::AssetPaths;
use crate::process::{run_command_with_timeout, spawn_error_kind};

pub const SUCCESS_MESSAGE: &str = "Icon generated successfully!";
pub const TOOL_UNAVAILABLE_MESSAGE: &str =
    "ImageMagick not found. Please install it or use an online converter.";

/// Fully resolved rasterizer invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    pub program: String,
    /// Leading arguments from `convert.command` followed by the conversion arguments.
    pub args: Vec<OsString>,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub timeout: Duration,
    pub output_limit_bytes: usize,
}

impl ConvertRequest {
    pub fn new(config: &IconConfig, paths: &AssetPaths) -> Self {
        let settings = &config.convert;
        let mut args: Vec<OsString> = settings
            .command
            .iter()
            .skip(1)
            .map(OsString::from)
            .collect();
        args.extend(convert_args(settings, &paths.input_path, &paths.output_path));
        Self {
            program: settings.program().to_string(),
            args,
            input_path: paths.input_path.clone(),
            output_path: paths.output_path.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            output_limit_bytes: config.output_limit_bytes,
        }
    }

    /// Program and arguments joined for display.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().map(|arg| arg.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// `-background <bg> -density <dpi> <input> -resize <WxH> <output>`.
pub fn convert_args(settings: &ConvertSettings, input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-background".into(),
        settings.background.as_str().into(),
        "-density".into(),
        settings.density.to_string().into(),
        input.into(),
        "-resize".into(),
        settings.geometry().into(),
        output.into(),
    ]
}

/// Outcome of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// The rasterizer exited zero.
    Generated { output_path: PathBuf },
    /// The rasterizer ran but exited non-zero or timed out.
    ConversionFailed { detail: String },
    /// The rasterizer could not be located or executed.
    ToolUnavailable { program: String },
}

impl Conversion {
    pub fn is_success(&self) -> bool {
        matches!(self, Conversion::Generated { .. })
    }

    /// Status line printed to stdout.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Generated { .. } => f.write_str(SUCCESS_MESSAGE),
            Conversion::ConversionFailed { detail } => {
                write!(f, "Error generating icon: {detail}")
            }
            Conversion::ToolUnavailable { .. } => f.write_str(TOOL_UNAVAILABLE_MESSAGE),
        }
    }
}

/// Abstraction over rasterizer backends.
pub trait Converter {
    /// Run the conversion described by `request` and classify the result.
    ///
    /// Only unexpected failures are errors; a non-zero exit or a missing tool
    /// is a [`Conversion`] value.
    fn convert(&self, request: &ConvertRequest) -> Result<Conversion>;
}

/// Converter that spawns the configured ImageMagick command.
pub struct ImageMagickConverter;

impl Converter for ImageMagickConverter {
    #[instrument(skip_all, fields(program = %request.program, timeout_secs = request.timeout.as_secs()))]
    fn convert(&self, request: &ConvertRequest) -> Result<Conversion> {
        info!(command = %request.display_command(), "starting conversion");

        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args);

        let output =
            match run_command_with_timeout(cmd, request.timeout, request.output_limit_bytes) {
                Ok(output) => output,
                Err(err) => {
                    return match spawn_error_kind(&err) {
                        Some(io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied) => {
                            warn!(err = %err, "rasterizer unavailable");
                            Ok(Conversion::ToolUnavailable {
                                program: request.program.clone(),
                            })
                        }
                        _ => Err(err).context("run rasterizer"),
                    };
                }
            };

        if !output.stdout.is_empty() {
            debug!(stdout = %String::from_utf8_lossy(&output.stdout), "rasterizer stdout");
        }

        if output.timed_out {
            warn!(
                timeout_secs = request.timeout.as_secs(),
                "rasterizer timed out"
            );
            return Ok(Conversion::ConversionFailed {
                detail: format!(
                    "`{}` timed out after {}s",
                    request.program,
                    request.timeout.as_secs()
                ),
            });
        }
        if !output.status.success() {
            warn!(exit_code = ?output.status.code(), "rasterizer failed");
            return Ok(Conversion::ConversionFailed {
                detail: failure_detail(
                    &request.program,
                    output.status.code(),
                    &output.stderr_text(),
                ),
            });
        }

        let stderr = output.stderr_text();
        if !stderr.is_empty() {
            warn!(stderr = %stderr, "rasterizer reported warnings");
        }
        if !request.output_path.exists() {
            warn!(
                output = %request.output_path.display(),
                "rasterizer succeeded but wrote no output"
            );
        }
        debug!("conversion completed successfully");
        Ok(Conversion::Generated {
            output_path: request.output_path.clone(),
        })
    }
}

fn failure_detail(program: &str, code: Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("`{program}` exited with status {code}"),
        None => format!("`{program}` was terminated by a signal"),
    };
    if stderr.is_empty() {
        status
    } else {
        format!("{status}: {stderr}")
    }
}

/// Run the generator: build the request from `config` and `paths`, then convert.
#[instrument(skip_all, fields(input = %paths.input_path.display(), output = %paths.output_path.display()))]
pub fn generate_icon<C: Converter>(
    converter: &C,
    config: &IconConfig,
    paths: &AssetPaths,
) -> Result<Conversion> {
    let request = ConvertRequest::new(config, paths);
    let conversion = converter.convert(&request)?;
    debug!(success = conversion.is_success(), "conversion classified");
    Ok(conversion)
}
