//! External process invocation with captured output.

use crate::bundler::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

/// Working directory and environment for a spawned process.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Working directory, inherits the current one when `None`
    pub cwd: Option<PathBuf>,
    /// Extra environment variables
    pub env: Vec<(String, String)>,
    /// Log the command instead of spawning it
    pub dry_run: bool,
}

impl ProcessOptions {
    /// Options running in `cwd`.
    pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
            ..Default::default()
        }
    }

    /// Adds an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Sets dry-run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Runs `command` with `args` and waits for it to exit.
///
/// stdout and stderr are drained concurrently so a chatty child cannot block on
/// a full pipe.
///
/// # Returns
///
/// * `Ok(String)` - captured stdout when the exit code is zero
/// * `Err(Error::ToolExecutionFailed)` - captured stderr, or a generic message when empty
/// * `Err(Error::ToolNotFound)` - the program does not exist
pub async fn invoke_process<S: AsRef<OsStr>>(
    command: &Path,
    args: &[S],
    options: &ProcessOptions,
) -> Result<String> {
    let display = command_line(command, args);
    let program = program_name(command);

    if options.dry_run {
        log::info!(
            "[dry-run] {} (in {})",
            display,
            options
                .cwd
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string())
        );
        return Ok(String::new());
    }

    log::debug!("Running: {}", display);

    let mut cmd = Command::new(command);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn().map_err(|error| spawn_error(&program, error))?;

    let (stdout_buf, stderr_buf) = tokio::join!(
        drain(child.stdout.take(), "stdout", &program),
        drain(child.stderr.take(), "stderr", &program)
    );

    let status = child.wait().await.map_err(|error| Error::CommandFailed {
        command: program.clone(),
        error,
    })?;

    let stdout = String::from_utf8_lossy(&stdout_buf).into_owned();
    let stderr = String::from_utf8_lossy(&stderr_buf).into_owned();
    log::debug!(
        "{} exited with {} ({} bytes stdout, {} bytes stderr)",
        program,
        status,
        stdout.len(),
        stderr.len()
    );

    if status.success() {
        return Ok(stdout);
    }

    let message = if stderr.trim().is_empty() {
        match status.code() {
            Some(code) => format!("{program} exited with status {code}"),
            None => format!("{program} was terminated by a signal"),
        }
    } else {
        stderr.trim_end().to_string()
    };

    Err(Error::ToolExecutionFailed {
        command: program,
        code: status.code(),
        message,
    })
}

/// Reads a child stream to the end, keeping whatever arrived before a read error.
async fn drain<R: AsyncRead + Unpin>(stream: Option<R>, name: &str, program: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    let Some(mut stream) = stream else {
        return buf;
    };
    if let Err(e) = stream.read_to_end(&mut buf).await {
        log::debug!("Reading {} of {} stopped early: {}", name, program, e);
    }
    buf
}

fn spawn_error(program: &str, error: std::io::Error) -> Error {
    if error.kind() == std::io::ErrorKind::NotFound {
        Error::ToolNotFound {
            program: program.to_string(),
        }
    } else {
        Error::CommandFailed {
            command: program.to_string(),
            error,
        }
    }
}

fn program_name(command: &Path) -> String {
    command
        .file_name()
        .unwrap_or(command.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn command_line<S: AsRef<OsStr>>(command: &Path, args: &[S]) -> String {
    let mut line = command.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&OsStr::new(arg).to_string_lossy());
    }
    line
}
