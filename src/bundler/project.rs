//! Xcode project container discovery.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::Path;

const WORKSPACE_EXTENSION: &str = "xcworkspace";
const PROJECT_EXTENSION: &str = "xcodeproj";

/// Build container found in the iOS project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    /// Entry name, e.g. `MyApp.xcworkspace`
    pub file_name: String,
    /// File stem, used as the scheme name
    pub name: String,
    /// `true` for `.xcworkspace`, `false` for `.xcodeproj`
    pub is_workspace: bool,
}

impl ProjectDescriptor {
    /// The `xcodebuild` flag selecting this container.
    pub fn xcodebuild_flag(&self) -> &'static str {
        if self.is_workspace {
            "-workspace"
        } else {
            "-project"
        }
    }
}

/// Finds the `.xcworkspace` or `.xcodeproj` entry in `directory`.
///
/// A workspace wins over a project when both exist. Entries are compared in
/// file-name order so repeated lookups return the same descriptor.
pub async fn locate_project_file(directory: &Path) -> Result<ProjectDescriptor> {
    let mut entries = tokio::fs::read_dir(directory)
        .await
        .fs_context("reading project directory", directory)?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading project directory", directory)?
    {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    let find = |extension: &str| {
        names.iter().find(|name| {
            Path::new(name.as_str())
                .extension()
                .is_some_and(|ext| ext == extension)
        })
    };

    let (file_name, is_workspace) = match find(WORKSPACE_EXTENSION) {
        Some(name) => (name, true),
        None => match find(PROJECT_EXTENSION) {
            Some(name) => (name, false),
            None => {
                return Err(Error::ProjectFileNotFound {
                    directory: directory.to_path_buf(),
                });
            }
        },
    };

    let name = Path::new(file_name.as_str())
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    log::debug!(
        "Found {} {} in {}",
        if is_workspace { "workspace" } else { "project" },
        file_name,
        directory.display()
    );

    Ok(ProjectDescriptor {
        file_name: file_name.clone(),
        name,
        is_workspace,
    })
}
