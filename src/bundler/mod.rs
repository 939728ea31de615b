//! Simulator build packaging for React Native iOS projects.
//!
//! The [`Bundler`] drives a fixed pipeline over external tools:
//!
//! 1. Rewrite the AppDelegate so it loads the offline `main.jsbundle`
//! 2. Build the app for the simulator with `xcodebuild`
//! 3. Generate the offline JS bundle and assets into the built `.app`
//! 4. Zip the `.app` beside itself
//! 5. Restore the AppDelegate, whatever happened in steps 2-4
//!
//! # Example
//!
//! ```no_run
//! use sim_bundler::bundler::{Bundler, SettingsBuilder};
//!
//! # async fn example() -> sim_bundler::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .app_name("MyApp")
//!     .root_dir("./my-app")
//!     .build()?;
//!
//! let archive = Bundler::new(settings).run().await?;
//! println!("Created {}", archive.display());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod delegate;
pub mod error;
pub mod process;
pub mod project;
pub mod settings;
pub mod utils;

pub use builder::{BundledArtifact, Bundler, Stage};
pub use delegate::DelegateRewrite;
pub use error::{Error, Result};
pub use process::{ProcessOptions, invoke_process};
pub use project::{ProjectDescriptor, locate_project_file};
pub use settings::{Settings, SettingsBuilder, Toolchain};
