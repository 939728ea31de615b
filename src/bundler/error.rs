//! Error types for bundling operations.
//!
//! Every pipeline step surfaces one of these to its caller. The CLI layer wraps
//! them in [`crate::error::BundlerError`].

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the bundling pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// External program could not be found
    #[error("Tool not found: {program}. Make sure it is installed and on PATH")]
    ToolNotFound {
        /// Program that was looked up
        program: String,
    },

    /// External program exited with a non-zero status
    #[error("{command} failed: {message}")]
    ToolExecutionFailed {
        /// Program name
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured stderr, or a generic message when stderr was empty
        message: String,
    },

    /// Spawning or waiting on an external program failed
    #[error("Failed to run {command}: {error}")]
    CommandFailed {
        /// Program name
        command: String,
        /// Underlying IO error
        #[source]
        error: std::io::Error,
    },

    /// No `.xcworkspace` or `.xcodeproj` in the scanned directory
    #[error("No .xcworkspace or .xcodeproj found in {}", directory.display())]
    ProjectFileNotFound {
        /// Directory that was scanned
        directory: PathBuf,
    },

    /// None of the candidate delegate sources exist
    #[error("AppDelegate source not found, tried: {}", display_paths(candidates))]
    DelegateNotFound {
        /// Paths that were checked
        candidates: Vec<PathBuf>,
    },

    /// The delegate has no recognizable bundle URL line
    #[error("No bundle URL line found in {}, nothing to rewrite", path.display())]
    BundleUrlLineNotFound {
        /// Delegate source path
        path: PathBuf,
    },

    /// Filesystem operation failed
    #[error("Failed {context} ({}): {error}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        error: std::io::Error,
    },

    /// Writing the original delegate content back failed
    #[error("{}", restore_message(path, error, upstream.as_deref()))]
    RestoreFailed {
        /// Delegate source path
        path: PathBuf,
        /// Underlying IO error
        error: std::io::Error,
        /// The failure that happened before restore, if any
        upstream: Option<Box<Error>>,
    },

    /// Settings were incomplete or invalid
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Catch-all error
    #[error("{0}")]
    GenericError(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn restore_message(path: &Path, error: &std::io::Error, upstream: Option<&Error>) -> String {
    match upstream {
        Some(upstream) => format!(
            "Failed to restore {}: {} (after earlier failure: {})",
            path.display(),
            error,
            upstream
        ),
        None => format!("Failed to restore {}: {}", path.display(), error),
    }
}

impl Error {
    /// Returns the earlier pipeline failure carried by a restore failure, if any.
    pub fn upstream(&self) -> Option<&Error> {
        match self {
            Error::RestoreFailed { upstream, .. } => upstream.as_deref(),
            _ => None,
        }
    }
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Maps an IO error into [`Error::Fs`] with a description and the path involved.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Converts a missing value into [`Error::GenericError`] with a message.
pub trait Context<T> {
    /// Adds a context message.
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
