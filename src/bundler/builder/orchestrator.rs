//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs each pipeline
//! step against the external tools and sequences them with a guaranteed
//! delegate restore.

use crate::bundler::{
    DelegateRewrite, Result, Settings,
    delegate,
    error::ErrorExt,
    process::{ProcessOptions, invoke_process},
    project::locate_project_file,
    settings::DERIVED_DATA_DIR,
    utils::fs,
};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use super::checksum::calculate_sha256;

/// Entry file preferred by older templates with per-platform entry points.
const IOS_ENTRY_FILE: &str = "index.ios.js";

/// Entry file used when no platform-specific one exists.
const DEFAULT_ENTRY_FILE: &str = "index.js";

/// Offline bundle file name, matched by the rewritten delegate.
pub const OFFLINE_BUNDLE_NAME: &str = "main.jsbundle";

/// Keeps `xcodebuild`'s React Native build phase from opening a Metro packager.
const NO_PACKAGER_ENV: (&str, &str) = ("RCT_NO_LAUNCH_PACKAGER", "1");

/// Pipeline stage, logged as each one is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Rewriting the AppDelegate
    Rewriting,
    /// Running `xcodebuild`
    Building,
    /// Generating the offline JS bundle
    Bundling,
    /// Zipping the `.app`
    Archiving,
    /// Writing the original AppDelegate back
    Restoring,
    /// Archive produced
    Done,
    /// A step failed
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Rewriting => "rewriting AppDelegate",
            Stage::Building => "building for simulator",
            Stage::Bundling => "generating offline bundle",
            Stage::Archiving => "archiving app",
            Stage::Restoring => "restoring AppDelegate",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Archive produced by a run, with metadata for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledArtifact {
    /// Path to the `.zip`
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256
    pub checksum: String,
}

impl BundledArtifact {
    /// Collects size and checksum for an archive on disk.
    pub async fn from_path(path: PathBuf) -> Result<Self> {
        let metadata = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?;
        let checksum = calculate_sha256(&path).await?;

        Ok(Self {
            size: metadata.len(),
            path,
            checksum,
        })
    }
}

/// Main bundler orchestrator.
///
/// Each step is callable on its own; [`run`](Self::run) sequences all of them.
///
/// # Examples
///
/// ```no_run
/// use sim_bundler::bundler::{Bundler, Settings};
///
/// # async fn example(settings: Settings) -> sim_bundler::bundler::Result<()> {
/// let bundler = Bundler::new(settings);
///
/// // Individual steps
/// let output = bundler.build().await?;
/// let archive = bundler.archive().await?;
///
/// // Or the whole pipeline
/// let archive = bundler.run().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn options_in(&self, cwd: &Path) -> ProcessOptions {
        ProcessOptions::in_dir(cwd).dry_run(self.settings.dry_run())
    }

    /// Rewrites the AppDelegate to load the offline bundle.
    ///
    /// The returned [`DelegateRewrite`] must be restored by the caller.
    pub async fn rewrite_delegate(&self) -> Result<DelegateRewrite> {
        delegate::rewrite_delegate(&self.settings).await
    }

    /// Builds the app for the iOS simulator with `xcodebuild`.
    ///
    /// Returns the captured build output.
    pub async fn build(&self) -> Result<String> {
        let project_dir = self.settings.project_dir();
        let project = locate_project_file(project_dir).await?;

        log::info!(
            "Building {} (scheme {}) for iphonesimulator",
            project.file_name,
            project.name
        );

        let args = [
            project.xcodebuild_flag(),
            project.file_name.as_str(),
            "-sdk",
            "iphonesimulator",
            "-configuration",
            "Debug",
            "-scheme",
            project.name.as_str(),
            "-derivedDataPath",
            DERIVED_DATA_DIR,
        ];
        let (key, value) = NO_PACKAGER_ENV;
        let options = self.options_in(project_dir).env(key, value);

        invoke_process(&self.settings.toolchain().xcodebuild, &args, &options).await
    }

    /// Generates the offline JS bundle and its assets into `output_dir`.
    ///
    /// Creates `output_dir` if needed and returns the bundler output.
    pub async fn generate_offline_bundle(&self, output_dir: &Path) -> Result<String> {
        let root = self.settings.root_dir();
        let entry_file = entry_file(root).await?;

        if !self.settings.dry_run() {
            fs::create_dir_all(output_dir).await?;
        }

        let bundle_output = output_dir.join(OFFLINE_BUNDLE_NAME);
        log::info!("Bundling {} into {}", entry_file, bundle_output.display());

        let args: [&OsStr; 11] = [
            OsStr::new("bundle"),
            OsStr::new("--platform"),
            OsStr::new("ios"),
            OsStr::new("--dev"),
            OsStr::new("false"),
            OsStr::new("--entry-file"),
            OsStr::new(entry_file),
            OsStr::new("--bundle-output"),
            bundle_output.as_os_str(),
            OsStr::new("--assets-dest"),
            output_dir.as_os_str(),
        ];

        invoke_process(
            &self.settings.toolchain().react_native,
            &args,
            &self.options_in(root),
        )
        .await
    }

    /// Zips the built `.app` into `<name>.zip` beside it.
    ///
    /// Runs inside the release directory so the archive root is the `.app`.
    /// A stale archive from an earlier run is removed first.
    pub async fn archive(&self) -> Result<PathBuf> {
        let release_dir = self.settings.release_dir();
        let archive_path = self.settings.archive_path();
        let app_name = format!("{}.app", self.settings.app_name());
        let zip_name = format!("{}.zip", self.settings.app_name());

        if !self.settings.dry_run() && fs::remove_file_if_exists(&archive_path).await? {
            log::debug!("Removed stale archive {}", archive_path.display());
        }

        log::info!("Archiving {} into {}", app_name, archive_path.display());

        // relative names from the release dir, not the project root, keep the .app at the zip root
        invoke_process(
            &self.settings.toolchain().zip,
            &["-r", "-q", zip_name.as_str(), app_name.as_str()],
            &self.options_in(release_dir),
        )
        .await?;

        if !self.settings.dry_run()
            && !tokio::fs::try_exists(&archive_path)
                .await
                .fs_context("checking archive", &archive_path)?
        {
            crate::bail!(
                "zip reported success but {} does not exist",
                archive_path.display()
            );
        }

        Ok(archive_path)
    }

    /// Runs the full pipeline and returns the archive path.
    ///
    /// Once the delegate has been rewritten it is always restored, whether or
    /// not a later step failed. A restore failure is reported together with
    /// the earlier error.
    pub async fn run(&self) -> Result<PathBuf> {
        enter(Stage::Rewriting);
        let rewrite = match self.rewrite_delegate().await {
            Ok(rewrite) => rewrite,
            Err(e) => {
                enter(Stage::Failed);
                return Err(e);
            }
        };

        let outcome = self.build_and_package().await;

        enter(Stage::Restoring);
        let result = rewrite.restore(outcome).await;

        match &result {
            Ok(path) => {
                enter(Stage::Done);
                log::info!("✓ Created {}", path.display());
            }
            Err(e) => {
                enter(Stage::Failed);
                log::error!("{}", e);
            }
        }

        result
    }

    async fn build_and_package(&self) -> Result<PathBuf> {
        enter(Stage::Building);
        self.build().await?;

        enter(Stage::Bundling);
        self.generate_offline_bundle(&self.settings.app_bundle_path()).await?;

        enter(Stage::Archiving);
        self.archive().await
    }
}

fn enter(stage: Stage) {
    log::info!("==> {}", stage);
}

/// Picks the bundler entry file for the project root.
///
/// `index.ios.js` wins when present, otherwise `index.js`.
pub async fn entry_file(root: &Path) -> Result<&'static str> {
    let ios_entry = root.join(IOS_ENTRY_FILE);
    let exists = tokio::fs::try_exists(&ios_entry)
        .await
        .fs_context("checking for iOS entry file", &ios_entry)?;

    Ok(if exists {
        IOS_ENTRY_FILE
    } else {
        DEFAULT_ENTRY_FILE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn entry_file_prefers_ios_specific() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(entry_file(dir.path()).await.unwrap(), "index.js");

        std::fs::write(dir.path().join("index.ios.js"), "").unwrap();
        assert_eq!(entry_file(dir.path()).await.unwrap(), "index.ios.js");
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::Building.to_string(), "building for simulator");
        assert_eq!(Stage::Restoring.to_string(), "restoring AppDelegate");
    }

    #[tokio::test]
    async fn artifact_reports_size_and_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.zip");
        std::fs::write(&path, b"abc").unwrap();

        let artifact = BundledArtifact::from_path(path.clone()).await.unwrap();
        assert_eq!(artifact.path, path);
        assert_eq!(artifact.size, 3);
        assert_eq!(artifact.checksum.len(), 64);
    }
}
