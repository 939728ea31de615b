//! Command line interface for the simulator bundler.
//!
//! Parses arguments, builds [`Settings`](crate::bundler::Settings), preflights
//! the toolchain and runs the requested pipeline step.

mod args;
mod output;

pub use args::{Args, RuntimeConfig, Step};
pub use output::OutputManager;

use crate::bundler::{BundledArtifact, Bundler, SettingsBuilder, builder::tool_detection};
use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Executes already parsed arguments and returns the process exit code.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(args);

    let app_name = match &args.name {
        Some(name) => name.clone(),
        None => crate::metadata::discover_app_name(&args.root)?,
    };

    let mut builder = SettingsBuilder::new()
        .app_name(app_name)
        .root_dir(&args.root)
        .dry_run(args.dry_run);
    if let Some(path) = &args.react_native {
        builder = builder.react_native(path);
    }
    if let Some(path) = &args.xcodebuild {
        builder = builder.xcodebuild(path);
    }
    if let Some(path) = &args.zip {
        builder = builder.zip(path);
    }
    let settings = builder.build()?;

    if settings.dry_run() {
        config.warn("Dry run: no commands will be executed and no files written")?;
    } else {
        tool_detection::check_programs(args.step.programs(settings.toolchain()))?;
    }

    let bundler = Bundler::new(settings);
    config.progress(&format!(
        "Packaging {} from {}",
        bundler.settings().app_name(),
        bundler.settings().root_dir().display()
    ))?;

    match execute_step(args, &bundler, &config).await {
        Ok(()) => Ok(0),
        Err(e) => {
            config.output().error(&e.to_string())?;
            for suggestion in e.recovery_suggestions() {
                config.indent(&suggestion)?;
            }
            Ok(1)
        }
    }
}

async fn execute_step(args: &Args, bundler: &Bundler, config: &RuntimeConfig) -> Result<()> {
    match args.step {
        Step::All => {
            let archive = bundler.run().await?;
            if bundler.settings().dry_run() {
                config.success(&format!("Would create {}", archive.display()))?;
            } else {
                let artifact = BundledArtifact::from_path(archive).await?;
                config.success(&format!("Created {}", artifact.path.display()))?;
                config.indent(&format!("size:   {} bytes", artifact.size))?;
                config.indent(&format!("sha256: {}", artifact.checksum))?;
            }
        }
        Step::Rewrite => {
            let rewrite = bundler.rewrite_delegate().await?;
            let path = rewrite.path().to_path_buf();
            if bundler.settings().dry_run() {
                config.success(&format!("Would rewrite {}", path.display()))?;
            } else {
                config.success(&format!("Rewrote {}", path.display()))?;
            }
            rewrite.restore(Ok(())).await?;
            config.indent(&format!("restored {}", path.display()))?;
        }
        Step::Build => {
            let output = bundler.build().await?;
            config.output().verbose(output.trim_end())?;
            config.success(&format!(
                "Built {}",
                bundler.settings().app_bundle_path().display()
            ))?;
        }
        Step::Bundle => {
            let output_dir = args
                .output_dir
                .clone()
                .unwrap_or_else(|| bundler.settings().app_bundle_path());
            bundler.generate_offline_bundle(&output_dir).await?;
            config.success(&format!("Bundled into {}", output_dir.display()))?;
        }
        Step::Archive => {
            let archive = bundler.archive().await?;
            config.success(&format!("Archived {}", archive.display()))?;
        }
    }
    Ok(())
}
