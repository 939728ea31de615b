//! Application name discovery from React Native project manifests.

use crate::error::{BundlerError, CliError, Result};
use serde::Deserialize;
use std::path::Path;

/// Manifests consulted for the app name, in order.
const MANIFESTS: [&str; 2] = ["app.json", "package.json"];

/// The subset of `app.json` / `package.json` we read.
#[derive(Debug, Deserialize)]
struct Manifest {
    name: Option<String>,
}

/// Reads the application name from `app.json`, falling back to `package.json`.
///
/// A manifest that exists but cannot be parsed is an error rather than a
/// reason to fall through, so a typo does not silently pick another name.
pub fn discover_app_name(root: &Path) -> Result<String> {
    for manifest_name in MANIFESTS {
        let path = root.join(manifest_name);
        if !path.is_file() {
            continue;
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            BundlerError::Cli(CliError::ExecutionFailed {
                command: format!("read_{manifest_name}"),
                reason: format!("Failed to read {}: {}", path.display(), e),
            })
        })?;

        let manifest: Manifest = serde_json::from_str(&content).map_err(|e| {
            BundlerError::Cli(CliError::InvalidArguments {
                reason: format!("Failed to parse {}: {}", path.display(), e),
            })
        })?;

        if let Some(name) = manifest.name.filter(|n| !n.trim().is_empty()) {
            log::debug!("App name {} from {}", name, path.display());
            return Ok(name);
        }
    }

    Err(BundlerError::Cli(CliError::MissingArgument {
        argument: format!(
            "--name (no \"name\" in {} under {})",
            MANIFESTS.join(" or "),
            root.display()
        ),
    }))
}
