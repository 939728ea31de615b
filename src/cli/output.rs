//! Terminal output for user-facing progress.
//!
//! Progress and results go to stdout, warnings and errors to stderr. Library
//! diagnostics go through `log` instead.

use std::io::{self, Write};

/// Writes progress, success and warning lines honouring verbose/quiet flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates a new output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Whether verbose output is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    fn out(&self, prefix: &str, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{prefix}{message}")
    }

    /// Print message only in verbose mode
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose {
            self.out("  ", message)
        } else {
            Ok(())
        }
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.out("→ ", message)
    }

    /// Print success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.out("✓ ", message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.out("    ", message)
    }

    /// Print warning message to stderr, even in quiet mode
    pub fn warn(&self, message: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "⚠ {message}")
    }

    /// Print error message to stderr, even in quiet mode
    pub fn error(&self, message: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "✗ {message}")
    }
}
