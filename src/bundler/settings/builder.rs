//! Builder for constructing Settings.

use super::{Settings, Toolchain};
use crate::bundler::error::{Context, Error};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use sim_bundler::bundler::SettingsBuilder;
///
/// # fn example() -> sim_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .app_name("MyApp")
///     .root_dir(".")
///     .dry_run(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    app_name: Option<String>,
    root_dir: Option<PathBuf>,
    dry_run: bool,
    react_native: Option<PathBuf>,
    xcodebuild: Option<PathBuf>,
    zip: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the application name.
    ///
    /// # Required
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Sets the project root directory. Relative paths are absolutized against the
    /// current directory.
    ///
    /// # Required
    pub fn root_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.root_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables dry-run mode.
    ///
    /// Default: false
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Overrides the React Native CLI.
    pub fn react_native<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.react_native = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides `xcodebuild`.
    pub fn xcodebuild<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.xcodebuild = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides `zip`.
    pub fn zip<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.zip = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `app_name` or `root_dir` is missing, or the name is
    /// empty or contains a path separator.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let app_name = self.app_name.context("app_name is required")?;
        if app_name.is_empty() || app_name.contains(['/', '\\']) {
            return Err(Error::InvalidSettings(format!(
                "app name {app_name:?} must be non-empty and contain no path separators"
            )));
        }

        let root_dir = self.root_dir.context("root_dir is required")?;
        let root_dir = root_dir
            .absolutize()
            .map_err(|e| {
                Error::InvalidSettings(format!(
                    "cannot resolve root directory {}: {e}",
                    root_dir.display()
                ))
            })?
            .into_owned();

        let defaults = Toolchain::for_root(&root_dir);
        let toolchain = Toolchain {
            react_native: self.react_native.unwrap_or(defaults.react_native),
            xcodebuild: self.xcodebuild.unwrap_or(defaults.xcodebuild),
            zip: self.zip.unwrap_or(defaults.zip),
        };

        Ok(Settings::new(app_name, root_dir, self.dry_run, toolchain))
    }
}
