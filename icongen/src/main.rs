//! Generate the application icon bitmap from `assets/icon.svg`.
//!
//! Runs ImageMagick's `convert` against the assets directory next to this
//! executable and prints one status line. Handled failures still exit 0
//! unless `--strict` is given.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use icongen::config::{Overrides, apply_overrides, load_config};
use icongen::convert::{Conversion, ImageMagickConverter, generate_icon};
use icongen::exit_codes;
use icongen::logging;
use icongen::paths::{AssetPaths, default_config_path, executable_dir};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "icongen",
    version,
    about = "Rasterize assets/icon.svg into assets/aetherStream.png"
)]
struct Cli {
    /// Base directory containing `assets/` (defaults to the executable's directory).
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Config file (defaults to `<root>/icongen.toml` when present).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rasterizer program to run instead of `convert`.
    #[arg(long, value_name = "PROGRAM")]
    tool: Option<String>,

    /// Kill the rasterizer after this many seconds.
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Exit non-zero when the icon could not be generated.
    #[arg(long)]
    strict: bool,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    let base_dir = match &cli.root {
        Some(root) => root.clone(),
        None => executable_dir()?,
    };
    let config_path = cli
        .config
        .unwrap_or_else(|| default_config_path(&base_dir));
    let config = load_config(&config_path)?;
    let config = apply_overrides(
        config,
        &Overrides {
            tool: cli.tool,
            timeout_secs: cli.timeout_secs,
        },
    )?;
    let paths = match cli.root {
        Some(root) => AssetPaths::new(root, &config),
        None => AssetPaths::from_executable(&config)?,
    };
    debug!(base_dir = %paths.base_dir.display(), config = %config_path.display(), "resolved paths");

    let conversion = generate_icon(&ImageMagickConverter, &config, &paths)?;
    println!("{}", conversion);
    Ok(exit_code(&conversion, cli.strict))
}

fn exit_code(conversion: &Conversion, strict: bool) -> i32 {
    match conversion {
        Conversion::Generated { .. } => exit_codes::OK,
        _ if !strict => exit_codes::OK,
        Conversion::ConversionFailed { .. } => exit_codes::CONVERSION_FAILED,
        Conversion::ToolUnavailable { .. } => exit_codes::TOOL_UNAVAILABLE,
    }
}
