//! AppDelegate rewriting and restoration.
//!
//! The debug AppDelegate asks the Metro dev server for its JS bundle. For an
//! uploadable simulator build the bundle-root URL line is swapped for one that
//! loads `main.jsbundle` from the app resources, and swapped back once the build
//! is done.

use crate::bundler::{
    Settings,
    error::{Error, ErrorExt, Result},
};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Marker identifying the line that configures the bundle-root URL.
const BUNDLE_URL_MARKER: &str = "jsBundleURLForBundleRoot";

/// Loads the offline bundle shipped inside the `.app`.
const OFFLINE_BUNDLE_URL: &str =
    r#"[[NSBundle mainBundle] URLForResource:@"main" withExtension:@"jsbundle"]"#;

/// Known layouts of the bundle-root URL line, first match wins.
///
/// Older templates assign `jsCodeLocation`, newer ones return the URL from
/// `sourceURLForBridge:` / `bundleURL`.
static BUNDLE_URL_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"^(?P<indent>\s*)jsCodeLocation\s*=", "jsCodeLocation = "),
        (r"^(?P<indent>\s*)return\s", "return "),
    ]
    .into_iter()
    .filter_map(|(pattern, lead)| Regex::new(pattern).ok().map(|re| (re, lead)))
    .collect()
});

/// Rewrites every bundle-root URL line in `source` to load the offline bundle.
///
/// Unmatched lines pass through untouched, along with their line endings.
/// Returns `None` when no line matched.
pub fn rewrite_bundle_url(source: &str) -> Option<String> {
    let mut rewritten = String::with_capacity(source.len());
    let mut matched = false;

    for line in source.split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);
        match replacement_for(body) {
            Some(replacement) => {
                log::debug!("Rewriting bundle URL line: {}", body.trim());
                rewritten.push_str(&replacement);
                rewritten.push_str(ending);
                matched = true;
            }
            None => rewritten.push_str(line),
        }
    }

    matched.then_some(rewritten)
}

fn replacement_for(line: &str) -> Option<String> {
    if !line.contains(BUNDLE_URL_MARKER) {
        return None;
    }

    BUNDLE_URL_PATTERNS.iter().find_map(|(pattern, lead)| {
        pattern
            .captures(line)
            .map(|caps| format!("{}{}{};", &caps["indent"], lead, OFFLINE_BUNDLE_URL))
    })
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// A rewritten AppDelegate holding the bytes needed to put it back.
///
/// Call [`restore`](Self::restore) once the pipeline is done. If the value is
/// dropped without being restored, the original content is written back
/// synchronously.
#[derive(Debug)]
#[must_use = "the delegate stays rewritten until restore() is called"]
pub struct DelegateRewrite {
    path: PathBuf,
    original: Vec<u8>,
    written: bool,
    restored: bool,
}

impl DelegateRewrite {
    /// Path of the rewritten delegate source.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Content of the delegate before the rewrite.
    pub fn original(&self) -> &[u8] {
        &self.original
    }

    /// Writes the original content back and forwards `prior`.
    ///
    /// A failed write is returned as [`Error::RestoreFailed`] carrying the error
    /// from `prior`, if there was one.
    pub async fn restore<T>(mut self, prior: Result<T>) -> Result<T> {
        self.restored = true;

        if !self.written {
            return prior;
        }

        log::info!("Restoring {}", self.path.display());
        match tokio::fs::write(&self.path, &self.original).await {
            Ok(()) => prior,
            Err(error) => Err(Error::RestoreFailed {
                path: self.path.clone(),
                error,
                upstream: prior.err().map(Box::new),
            }),
        }
    }
}

impl DelegateRewrite {
    /// Marks the delegate as rewritten and awaits `write`.
    ///
    /// The file may already be truncated when `write` fails, so the original
    /// content is written back before the error is returned.
    async fn commit<F>(mut self, write: F) -> Result<Self>
    where
        F: Future<Output = std::io::Result<()>>,
    {
        self.written = true;

        match write.await {
            Ok(()) => Ok(self),
            Err(error) => {
                let failure = Error::Fs {
                    context: "writing rewritten delegate",
                    path: self.path.clone(),
                    error,
                };
                self.restore(Err(failure)).await
            }
        }
    }
}

impl Drop for DelegateRewrite {
    fn drop(&mut self) {
        if self.written && !self.restored {
            log::warn!(
                "Delegate {} dropped without restore, writing original content back",
                self.path.display()
            );
            if let Err(e) = std::fs::write(&self.path, &self.original) {
                log::error!("Failed to restore {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Rewrites the AppDelegate of the configured app to use the offline bundle.
///
/// Looks for `ios/<name>/AppDelegate.m`, then `AppDelegate.mm`. Fails without
/// touching the file if no bundle-root URL line is recognized. In dry-run mode
/// the rewrite is computed but not written.
pub async fn rewrite_delegate(settings: &Settings) -> Result<DelegateRewrite> {
    let candidates = settings.delegate_candidates();
    let mut found = None;
    for candidate in &candidates {
        if tokio::fs::try_exists(candidate)
            .await
            .fs_context("checking for delegate source", candidate)?
        {
            found = Some(candidate.clone());
            break;
        }
    }
    let path = found.ok_or_else(|| Error::DelegateNotFound {
        candidates: candidates.clone(),
    })?;

    let original = tokio::fs::read(&path)
        .await
        .fs_context("reading delegate source", &path)?;
    let source = std::str::from_utf8(&original).map_err(|e| {
        Error::GenericError(format!("{} is not valid UTF-8: {e}", path.display()))
    })?;

    let rewritten = rewrite_bundle_url(source)
        .ok_or_else(|| Error::BundleUrlLineNotFound { path: path.clone() })?;

    let rewrite = DelegateRewrite {
        path: path.clone(),
        original,
        written: false,
        restored: false,
    };

    if settings.dry_run() {
        log::info!("[dry-run] would rewrite {}", path.display());
        return Ok(rewrite);
    }

    let rewrite = rewrite.commit(tokio::fs::write(&path, rewritten)).await?;
    log::info!("Rewrote bundle URL in {}", path.display());

    Ok(rewrite)
}
