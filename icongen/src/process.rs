//! Run a child process with a timeout and bounded output capture.

use std::io::{self, Read};
#[cfg(unix)]
use std::os::unix::process::CommandExt;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

/// How long to keep draining pipes after a timed-out child has been killed.
pub const KILL_GRACE: Duration = Duration::from_secs(2);

type StreamResult = Result<(Vec<u8>, usize)>;

/// Captured child process output.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub stdout_truncated: usize,
    pub stderr_truncated: usize,
    pub timed_out: bool,
}

impl CommandOutput {
    /// Lossy, trimmed stderr with a truncation marker when bytes were dropped.
    pub fn stderr_text(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stderr).trim().to_string();
        if self.stderr_truncated > 0 {
            text.push_str(&format!(" [stderr truncated {} bytes]", self.stderr_truncated));
        }
        text
    }
}

/// Run `cmd` to completion, killing it after `timeout`.
///
/// stdout and stderr are drained on reader threads while the child runs so a
/// full pipe cannot stall it. At most `output_limit_bytes` per stream are kept.
///
/// On unix the child leads its own process group, and a timeout kills the
/// whole group. Readers still blocked [`KILL_GRACE`] after the kill are
/// abandoned, so the call returns within `timeout + KILL_GRACE`.
///
/// A spawn failure is returned as an error whose chain contains the
/// [`io::Error`]; see [`spawn_error_kind`].
#[instrument(skip_all, fields(program = ?cmd.get_program(), timeout_secs = timeout.as_secs(), output_limit_bytes))]
pub fn run_command_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    output_limit_bytes: usize,
) -> Result<CommandOutput> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    cmd.process_group(0);

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let stdout_rx = spawn_reader(stdout, output_limit_bytes);
    let stderr_rx = spawn_reader(stderr, output_limit_bytes);

    let mut timed_out = false;
    let status = match child.wait_timeout(timeout).context("wait for command")? {
        Some(status) => status,
        None => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "command timed out, killing"
            );
            timed_out = true;
            #[cfg(unix)]
            kill_process_group(child.id());
            // Already reaped or exited if the group kill landed first.
            if let Err(e) = child.kill() {
                debug!(err = %e, "kill after group kill");
            }
            child.wait().context("wait command after kill")?
        }
    };

    let grace = timed_out.then_some(KILL_GRACE);
    let (stdout, stdout_truncated) = collect_output(&stdout_rx, grace).context("join stdout")?;
    let (stderr, stderr_truncated) = collect_output(&stderr_rx, grace).context("join stderr")?;

    if stdout_truncated > 0 || stderr_truncated > 0 {
        warn!(stdout_truncated, stderr_truncated, "output truncated");
    }

    debug!(exit_code = ?status.code(), timed_out, "command finished");
    Ok(CommandOutput {
        status,
        stdout,
        stderr,
        stdout_truncated,
        stderr_truncated,
        timed_out,
    })
}

/// The [`io::ErrorKind`] of a failed spawn, if `err` came from one.
pub fn spawn_error_kind(err: &anyhow::Error) -> Option<io::ErrorKind> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<io::Error>())
        .map(io::Error::kind)
}

fn spawn_reader<R: Read + Send + 'static>(reader: R, limit: usize) -> Receiver<StreamResult> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // Receiver is gone once the caller abandoned this stream.
        let _ = tx.send(read_stream_limited(reader, limit));
    });
    rx
}

/// Wait for a reader. With `grace`, give up after that long and return
/// nothing; a surviving grandchild may still hold the pipe open.
fn collect_output(rx: &Receiver<StreamResult>, grace: Option<Duration>) -> StreamResult {
    match grace {
        None => rx
            .recv()
            .map_err(|_| anyhow!("output reader thread panicked"))?,
        Some(grace) => match rx.recv_timeout(grace) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    grace_secs = grace.as_secs(),
                    "pipe still open after kill, abandoning output"
                );
                Ok((Vec::new(), 0))
            }
            Err(RecvTimeoutError::Disconnected) => Err(anyhow!("output reader thread panicked")),
        },
    }
}

/// Best-effort `kill -KILL -- -<pgid>` for a child spawned with `process_group(0)`.
#[cfg(unix)]
fn kill_process_group(pgid: u32) {
    let status = Command::new("kill")
        .arg("-KILL")
        .arg("--")
        .arg(format!("-{pgid}"))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(status) if status.success() => debug!(pgid, "killed process group"),
        Ok(status) => warn!(pgid, exit_code = ?status.code(), "process group kill failed"),
        Err(e) => warn!(pgid, err = %e, "spawn kill for process group"),
    }
}

fn read_stream_limited<R: Read>(mut reader: R, limit: usize) -> Result<(Vec<u8>, usize)> {
    let mut buf = Vec::new();
    let mut truncated = 0usize;
    let mut chunk = [0u8; 8192];

    loop {
        let n = reader.read(&mut chunk).context("read output")?;
        if n == 0 {
            break;
        }
        let remaining = limit.saturating_sub(buf.len());
        if remaining > 0 {
            let keep = n.min(remaining);
            buf.extend_from_slice(&chunk[..keep]);
            truncated += n.saturating_sub(keep);
        } else {
            truncated += n;
        }
    }

    Ok((buf, truncated))
}
