//! Top-level error types for the CLI and library consumers.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all bundler operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pipeline errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as E;

        match self {
            BundlerError::Bundler(E::ToolNotFound { program }) => vec![
                format!("Install {program} or point to it with the matching --flag"),
                "Run with --dry-run to see the commands that would be executed".to_string(),
            ],
            BundlerError::Bundler(E::ProjectFileNotFound { .. }) => vec![
                "Run from the React Native project root or pass --root".to_string(),
                "Run `pod install` in ios/ if the project uses CocoaPods".to_string(),
            ],
            BundlerError::Bundler(E::BundleUrlLineNotFound { .. }) => vec![
                "The AppDelegate must call jsBundleURLForBundleRoot in an assignment or return"
                    .to_string(),
            ],
            BundlerError::Bundler(E::RestoreFailed { path, .. }) => vec![format!(
                "{} may still be rewritten; restore it from version control",
                path.display()
            )],
            BundlerError::Bundler(E::ToolExecutionFailed { .. }) => {
                vec!["Run with RUST_LOG=debug to see the full command line".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
