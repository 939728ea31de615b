//! Core Settings struct and derived paths.

use super::Toolchain;
use std::path::{Path, PathBuf};

/// Subdirectory of the project root holding the native iOS project.
const IOS_DIR: &str = "ios";

/// Derived-data directory passed to `xcodebuild`, relative to the iOS project.
pub(crate) const DERIVED_DATA_DIR: &str = "build";

/// Products directory for the Debug simulator configuration, relative to derived data.
const SIMULATOR_PRODUCTS_DIR: &str = "Build/Products/Debug-iphonesimulator";

/// Main settings for a bundling run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder) and immutable afterwards.
///
/// # Examples
///
/// ```no_run
/// use sim_bundler::bundler::SettingsBuilder;
///
/// # fn example() -> sim_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .app_name("fixture")
///     .root_dir("/work/fixture")
///     .build()?;
///
/// assert_eq!(
///     settings.release_dir(),
///     std::path::Path::new("/work/fixture/ios/build/Build/Products/Debug-iphonesimulator")
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Application name, also the Xcode target directory and `.app` name.
    app_name: String,

    /// React Native project root (holds `package.json` and `ios/`).
    root_dir: PathBuf,

    /// `<root>/ios`
    project_dir: PathBuf,

    /// `<project>/build/Build/Products/Debug-iphonesimulator`
    release_dir: PathBuf,

    /// Log commands and rewrites without touching the filesystem or spawning tools.
    dry_run: bool,

    /// External programs used by the pipeline.
    toolchain: Toolchain,
}

impl Settings {
    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        app_name: String,
        root_dir: PathBuf,
        dry_run: bool,
        toolchain: Toolchain,
    ) -> Self {
        let project_dir = root_dir.join(IOS_DIR);
        let release_dir = project_dir
            .join(DERIVED_DATA_DIR)
            .join(SIMULATOR_PRODUCTS_DIR);

        Self {
            app_name,
            root_dir,
            project_dir,
            release_dir,
            dry_run,
            toolchain,
        }
    }

    /// Returns the application name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the project root directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Returns the native iOS project directory (`<root>/ios`).
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the directory `xcodebuild` writes simulator products to.
    pub fn release_dir(&self) -> &Path {
        &self.release_dir
    }

    /// Returns the path of the built `<name>.app` directory.
    pub fn app_bundle_path(&self) -> PathBuf {
        self.release_dir.join(format!("{}.app", self.app_name))
    }

    /// Returns the path of the `<name>.zip` archive.
    pub fn archive_path(&self) -> PathBuf {
        self.release_dir.join(format!("{}.zip", self.app_name))
    }

    /// Returns the candidate AppDelegate sources, in lookup order.
    pub fn delegate_candidates(&self) -> Vec<PathBuf> {
        let dir = self.project_dir.join(&self.app_name);
        vec![dir.join("AppDelegate.m"), dir.join("AppDelegate.mm")]
    }

    /// Whether this is a dry run.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the toolchain.
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }
}
