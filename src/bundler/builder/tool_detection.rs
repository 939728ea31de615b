//! External tool availability checking.
//!
//! Resolves each toolchain program before a run so a missing `xcodebuild` is
//! reported up front instead of after the delegate has been rewritten.

use crate::bundler::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolves a program to the path that would be executed.
///
/// Bare names are looked up on `PATH`; anything with a directory component
/// must exist as given.
pub fn resolve_program(program: &Path) -> Result<PathBuf> {
    let is_bare = program.components().count() == 1;

    if is_bare {
        match which::which(program) {
            Ok(path) => {
                log::debug!("Found {} at: {}", program.display(), path.display());
                Ok(path)
            }
            Err(e) => {
                log::debug!("{} not found in PATH: {}", program.display(), e);
                Err(Error::ToolNotFound {
                    program: program.display().to_string(),
                })
            }
        }
    } else if program.is_file() {
        Ok(program.to_path_buf())
    } else {
        Err(Error::ToolNotFound {
            program: program.display().to_string(),
        })
    }
}

/// Checks that every program in `programs` can be found.
///
/// Fails on the first missing program.
pub fn check_programs<'a>(programs: impl IntoIterator<Item = &'a Path>) -> Result<()> {
    for program in programs {
        let path = resolve_program(program)?;
        log::info!("✓ {} available at {}", program.display(), path.display());
    }
    Ok(())
}
