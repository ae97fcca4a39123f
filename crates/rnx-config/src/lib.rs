//! Configuration for rn-externals
//!
//! This crate handles everything the pipeline needs to know before it touches
//! the framework: the framework's package.json, where the framework is
//! installed, and the configuration handed to the dependency-graph builder.

pub mod graph;
pub mod json;
pub mod locate;

// Re-export main types
pub use graph::{Blacklist, GraphConfig, Platform};
pub use json::PackageJson;
pub use locate::{FrameworkInstall, DEFAULT_FRAMEWORK_PACKAGE};

use rnx_core::error::RnxError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, RnxError>;
