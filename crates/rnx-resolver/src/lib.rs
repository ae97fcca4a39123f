//! Externals resolution for rn-externals
//!
//! This crate drives the three-stage pipeline: link the framework's hoisted
//! peers, ask a dependency-graph builder for every module reachable from the
//! framework's entry point, and project the non-polyfill modules into a
//! bundler externals map.

pub mod externals;
pub mod graph;
pub mod pipeline;

// Re-export main types
pub use externals::project_externals;
pub use graph::{
    DependencyDescriptor, DependencyGraphBuilder, NodePackagerBuilder, SnapshotGraphBuilder,
    StaticDescriptor,
};
pub use pipeline::{ExternalsResolver, Resolution, ResolverOptions};

use rnx_core::error::RnxError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, RnxError>;
