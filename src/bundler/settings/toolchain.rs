//! External program locations.

use std::path::{Path, PathBuf};

/// Programs invoked by the pipeline.
///
/// Bare names are resolved on `PATH` at spawn time; paths are used as given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    /// React Native CLI used for `bundle`.
    pub react_native: PathBuf,

    /// Xcode command line build tool.
    pub xcodebuild: PathBuf,

    /// Info-ZIP archiver.
    pub zip: PathBuf,
}

impl Toolchain {
    /// Returns the default toolchain for a project root.
    ///
    /// Prefers the project-local `node_modules/.bin/react-native` when it exists.
    pub fn for_root(root_dir: &Path) -> Self {
        let local_cli = root_dir.join("node_modules/.bin/react-native");
        let react_native = if local_cli.is_file() {
            local_cli
        } else {
            PathBuf::from("react-native")
        };

        Self {
            react_native,
            xcodebuild: PathBuf::from("xcodebuild"),
            zip: PathBuf::from("zip"),
        }
    }

    /// Iterates over every program in the toolchain.
    pub fn programs(&self) -> impl Iterator<Item = &Path> {
        [&self.react_native, &self.xcodebuild, &self.zip]
            .into_iter()
            .map(PathBuf::as_path)
    }
}
