//! Notebook-to-HTML rendering backends.
//!
//! The [`NotebookRenderer`] trait is the capability boundary around the
//! external rendering tool: given a source path, an output path, and a code
//! inclusion flag, a backend either produces a self-contained HTML file or
//! reports a structured failure. The rest of the pipeline is backend-agnostic.
//!
//! The production implementation is [`CommandRenderer`], which shells out to
//! a marimo-style CLI (`<program> export html <source> -o <output>`). The
//! renderer's internal correctness is not validated here — it is orchestrated,
//! and its failures are surfaced with full diagnostics.
//!
//! ## Timeout
//!
//! Each invocation is bounded by a 180-second ceiling. `std::process` has no
//! built-in timeout, so the child is spawned with captured streams and polled
//! via `try_wait` against a deadline; on expiry it is killed and the failure
//! reported as [`RenderError::Timeout`]. Stream capture runs on reader
//! threads so a chatty renderer cannot fill a pipe buffer and stall the
//! exchange.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Ceiling for a single renderer invocation.
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(180);

/// Interval between child liveness polls.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to run renderer: {0}")]
    Io(#[from] std::io::Error),
    #[error("renderer exited with code {code}: {command}\nstderr: {stderr}")]
    Failed {
        /// The command line that was invoked, for diagnostics.
        command: String,
        /// Exit code; -1 when the child was terminated by a signal.
        code: i32,
        /// Captured standard output, verbatim.
        stdout: String,
        /// Captured standard error, verbatim.
        stderr: String,
    },
    #[error("renderer timed out after {0:?} on {1}")]
    Timeout(Duration, PathBuf),
}

/// Capability to turn one notebook source file into a static HTML document.
///
/// `Sync` so the orchestrator can fan renders out across its worker pool.
pub trait NotebookRenderer: Sync {
    /// Render `source` to `output`. `include_code` controls whether the
    /// notebook's source code is shown in the exported document.
    fn render(&self, source: &Path, output: &Path, include_code: bool) -> Result<(), RenderError>;
}

/// Subprocess-backed renderer driving an external notebook CLI.
pub struct CommandRenderer {
    program: String,
    /// Working directory for the child, so notebook-relative imports and
    /// assets resolve.
    project_root: PathBuf,
    timeout: Duration,
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            project_root: project_root.into(),
            timeout: RENDER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The argument vector for one invocation, also used in error reports.
    fn arguments(source: &Path, output: &Path, include_code: bool) -> Vec<String> {
        let mut args = vec![
            "export".to_string(),
            "html".to_string(),
            source.to_string_lossy().to_string(),
            "-o".to_string(),
            output.to_string_lossy().to_string(),
        ];
        if !include_code {
            args.push("--no-include-code".to_string());
        }
        args
    }
}

impl NotebookRenderer for CommandRenderer {
    fn render(&self, source: &Path, output: &Path, include_code: bool) -> Result<(), RenderError> {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }

        let args = Self::arguments(source, output, include_code);
        let mut child = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = drain_stdout(child.stdout.take());
        let stderr = drain_stderr(child.stderr.take());

        let Some(status) = wait_with_deadline(&mut child, self.timeout)? else {
            return Err(RenderError::Timeout(self.timeout, source.to_path_buf()));
        };

        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        if !status.success() {
            return Err(RenderError::Failed {
                command: format!("{} {}", self.program, args.join(" ")),
                code: status.code().unwrap_or(-1),
                stdout,
                stderr,
            });
        }
        Ok(())
    }
}

/// Poll the child until it exits or the deadline passes.
///
/// Returns `None` after killing a child that outlived the deadline.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            child.kill().ok();
            child.wait().ok();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain_stdout(stream: Option<ChildStdout>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut stream) = stream {
            stream.read_to_string(&mut buf).ok();
        }
        buf
    })
}

fn drain_stderr(stream: Option<ChildStderr>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut stream) = stream {
            stream.read_to_string(&mut buf).ok();
        }
        buf
    })
}
