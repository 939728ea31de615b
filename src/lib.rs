//! Simulator app packaging for React Native iOS projects
//!
//! This library builds a React Native app for the iOS simulator with an
//! offline JS bundle and zips the resulting `.app` for upload to a
//! device-emulation service. The AppDelegate is rewritten for the build and
//! restored afterwards.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
