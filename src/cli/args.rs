//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with environment
//! variable fallbacks for the toolchain overrides.

use crate::bundler::Toolchain;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Pipeline step to execute
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Step {
    /// Rewrite, build, bundle, archive and restore
    #[default]
    All,
    /// Rewrite the AppDelegate and restore it, checking that the bundle URL line is recognized
    Rewrite,
    /// Only run xcodebuild
    Build,
    /// Only generate the offline JS bundle
    Bundle,
    /// Only zip the built .app
    Archive,
}

impl Step {
    /// Programs this step invokes, checked before it runs.
    pub fn programs<'a>(&self, toolchain: &'a Toolchain) -> Vec<&'a Path> {
        match self {
            Step::All => toolchain.programs().collect(),
            Step::Rewrite => Vec::new(),
            Step::Build => vec![toolchain.xcodebuild.as_path()],
            Step::Bundle => vec![toolchain.react_native.as_path()],
            Step::Archive => vec![toolchain.zip.as_path()],
        }
    }
}

/// Simulator app packager for React Native projects
#[derive(Parser, Debug)]
#[command(
    name = "sim_bundler",
    version,
    about = "Packages a React Native iOS simulator build into an uploadable zip",
    long_about = "Builds a React Native iOS app for the simulator with an offline JS bundle and zips the .app.

The AppDelegate is temporarily rewritten to load main.jsbundle and is always restored afterwards.

Usage:
  sim_bundler --root ./MyApp
  sim_bundler --root ./MyApp --name MyApp --dry-run
  sim_bundler --root ./MyApp --step archive

Exit code 0 = archive guaranteed to exist at the printed path."
)]
pub struct Args {
    /// React Native project root (contains package.json and ios/)
    #[arg(short = 'r', long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// App name (Xcode target directory and .app name); read from app.json when omitted
    #[arg(short = 'n', long, value_name = "NAME", env = "SIM_BUNDLER_APP_NAME")]
    pub name: Option<String>,

    /// Pipeline step to run
    #[arg(short = 's', long, value_enum, default_value_t = Step::All)]
    pub step: Step,

    /// Output directory for `--step bundle` (defaults to the built .app)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the commands and rewrites without running or writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also print tool output, such as the xcodebuild log of `--step build`
    #[arg(short, long)]
    pub verbose: bool,

    /// React Native CLI to use for `bundle`
    #[arg(long, value_name = "PATH", env = "SIM_BUNDLER_REACT_NATIVE")]
    pub react_native: Option<PathBuf>,

    /// xcodebuild to use
    #[arg(long, value_name = "PATH", env = "SIM_BUNDLER_XCODEBUILD")]
    pub xcodebuild: Option<PathBuf>,

    /// zip to use
    #[arg(long, value_name = "PATH", env = "SIM_BUNDLER_ZIP")]
    pub zip: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.output_dir.is_some() && self.step != Step::Bundle {
            return Err("--output-dir is only valid with --step bundle".to_string());
        }

        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err("App name cannot be empty".to_string());
        }

        if !self.root.is_dir() {
            return Err(format!(
                "Project root {} is not a directory",
                self.root.display()
            ));
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
