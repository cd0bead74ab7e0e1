//! CLI tests for the `icongen` binary.
//!
//! Spawns the binary against a temp project whose config points at a
//! shell-script rasterizer, and checks the status line, the output file, and
//! the exit code for each outcome.
#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use icongen::exit_codes;
use icongen::test_support::{
    FAKE_RASTERIZER, HANGING_RASTERIZER, SAMPLE_SVG, TestProject, WARNING_RASTERIZER,
};

fn run_icongen(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_icongen"))
        .arg("--root")
        .arg(root)
        .args(extra)
        .output()
        .expect("run icongen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn generates_icon_and_reports_success() {
    let mut project = TestProject::new().expect("project");
    project.write_icon(SAMPLE_SVG).expect("icon");
    project
        .use_rasterizer_script(FAKE_RASTERIZER)
        .expect("rasterizer");

    let output = run_icongen(project.path(), &[]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "Icon generated successfully!\n");
    let paths = project.paths();
    let bitmap = fs::read_to_string(&paths.output_path).expect("read output");
    assert_eq!(bitmap, "PNG 256x256\n");
}

#[test]
fn passes_fixed_arguments_to_rasterizer() {
    let mut project = TestProject::new().expect("project");
    project.write_icon(SAMPLE_SVG).expect("icon");
    project
        .use_rasterizer_script(FAKE_RASTERIZER)
        .expect("rasterizer");

    run_icongen(project.path(), &[]);

    let paths = project.paths();
    let args_path = paths.output_path.with_extension("png.args");
    let recorded = fs::read_to_string(args_path).expect("read args");
    let expected = [
        "-background".to_string(),
        "none".to_string(),
        "-density".to_string(),
        "72".to_string(),
        paths.input_path.display().to_string(),
        "-resize".to_string(),
        "256x256".to_string(),
        paths.output_path.display().to_string(),
    ];
    assert_eq!(recorded.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn rasterizer_warnings_reach_stderr_on_success() {
    let mut project = TestProject::new().expect("project");
    project.write_icon(SAMPLE_SVG).expect("icon");
    project
        .use_rasterizer_script(WARNING_RASTERIZER)
        .expect("rasterizer");

    let output = Command::new(env!("CARGO_BIN_EXE_icongen"))
        .arg("--root")
        .arg(project.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("run icongen");

    assert_eq!(stdout(&output), "Icon generated successfully!\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown font family"), "stderr: {stderr}");
}

#[test]
fn missing_tool_prints_guidance_and_exits_ok() {
    let mut project = TestProject::new().expect("project");
    project.write_icon(SAMPLE_SVG).expect("icon");
    project.use_missing_rasterizer().expect("config");

    let output = run_icongen(project.path(), &[]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        stdout(&output),
        "ImageMagick not found. Please install it or use an online converter.\n"
    );
    assert!(!project.paths().output_path.exists());
}

#[test]
fn tool_flag_overrides_config() {
    let mut project = TestProject::new().expect("project");
    project.write_icon(SAMPLE_SVG).expect("icon");
    project
        .use_rasterizer_script(FAKE_RASTERIZER)
        .expect("rasterizer");

    let output = run_icongen(
        project.path(),
        &["--tool", "icongen-test-no-such-rasterizer"],
    );

    assert!(stdout(&output).starts_with("ImageMagick not found."));
    assert!(!project.paths().output_path.exists());
}

#[test]
fn missing_input_reports_conversion_failure() {
    let mut project = TestProject::new().expect("project");
    project
        .use_rasterizer_script(FAKE_RASTERIZER)
        .expect("rasterizer");

    let output = run_icongen(project.path(), &[]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let out = stdout(&output);
    assert!(out.starts_with("Error generating icon: "), "stdout: {out}");
    assert!(out.contains("exited with status 1"), "stdout: {out}");
    assert!(out.contains("unable to open image"), "stdout: {out}");
    assert!(!project.paths().output_path.exists());
}

#[test]
fn malformed_input_reports_conversion_failure() {
    let mut project = TestProject::new().expect("project");
    project.write_icon("definitely not vector data").expect("icon");
    project
        .use_rasterizer_script(FAKE_RASTERIZER)
        .expect("rasterizer");

    let output = run_icongen(project.path(), &[]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(stdout(&output).starts_with("Error generating icon: "));
}

#[test]
fn second_run_overwrites_output() {
    let mut project = TestProject::new().expect("project");
    project.write_icon(SAMPLE_SVG).expect("icon");
    project
        .use_rasterizer_script(FAKE_RASTERIZER)
        .expect("rasterizer");
    let output_path = project.paths().output_path;
    fs::write(&output_path, "stale").expect("seed stale output");

    for _ in 0..2 {
        let output = run_icongen(project.path(), &[]);
        assert_eq!(output.status.code(), Some(exit_codes::OK));
        assert_eq!(stdout(&output), "Icon generated successfully!\n");
        assert_eq!(
            fs::read_to_string(&output_path).expect("read output"),
            "PNG 256x256\n"
        );
    }
}

#[test]
fn strict_mode_maps_failures_to_exit_codes() {
    let mut project = TestProject::new().expect("project");
    project
        .use_rasterizer_script(FAKE_RASTERIZER)
        .expect("rasterizer");

    let failed = run_icongen(project.path(), &["--strict"]);
    assert_eq!(failed.status.code(), Some(exit_codes::CONVERSION_FAILED));

    let missing = run_icongen(
        project.path(),
        &["--strict", "--tool", "icongen-test-no-such-rasterizer"],
    );
    assert_eq!(missing.status.code(), Some(exit_codes::TOOL_UNAVAILABLE));

    project.write_icon(SAMPLE_SVG).expect("icon");
    let ok = run_icongen(project.path(), &["--strict"]);
    assert_eq!(ok.status.code(), Some(exit_codes::OK));
}

#[test]
fn hanging_rasterizer_is_killed_after_timeout() {
    let mut project = TestProject::new().expect("project");
    project.write_icon(SAMPLE_SVG).expect("icon");
    project
        .use_rasterizer_script(HANGING_RASTERIZER)
        .expect("rasterizer");
    project.set_timeout_secs(1).expect("timeout");

    let output = run_icongen(project.path(), &[]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let out = stdout(&output);
    assert!(out.starts_with("Error generating icon: "), "stdout: {out}");
    assert!(out.contains("timed out after 1s"), "stdout: {out}");
}

#[test]
fn invalid_config_exits_invalid() {
    let project = TestProject::new().expect("project");
    fs::write(project.config_path(), "[convert]\ndensity = 0\n").expect("write config");

    let output = run_icongen(project.path(), &[]);

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("convert.density"), "stderr: {stderr}");
}

#[test]
fn explicit_config_flag_is_used() {
    let project = TestProject::new().expect("project");
    project.write_icon(SAMPLE_SVG).expect("icon");
    let other = tempfile::tempdir().expect("tempdir");
    let config_path = other.path().join("custom.toml");
    fs::write(
        &config_path,
        "[convert]\ncommand = [\"icongen-test-no-such-rasterizer\"]\n",
    )
    .expect("write config");

    let output = run_icongen(
        project.path(),
        &["--config", config_path.to_str().expect("utf-8 path")],
    );

    assert!(stdout(&output).starts_with("ImageMagick not found."));
}
