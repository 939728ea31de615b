//! Pipeline orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that turns a React
//! Native project into a zipped simulator `.app`.
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for the archive
//! - [`orchestrator`] - Main [`Bundler`] struct and pipeline steps
//! - [`tool_detection`] - External tool availability checking

pub mod checksum;
mod orchestrator;
pub mod tool_detection;

pub use orchestrator::{BundledArtifact, Bundler, OFFLINE_BUNDLE_NAME, Stage, entry_file};
