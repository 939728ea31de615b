//! Configuration for a bundling run.
//!
//! [`Settings`] holds the application name, project root and the paths derived
//! from it. [`Toolchain`] names the external programs the pipeline invokes.

mod builder;
mod core;
mod toolchain;

pub use builder::SettingsBuilder;
pub(crate) use self::core::DERIVED_DATA_DIR;
pub use self::core::Settings;
pub use toolchain::Toolchain;
