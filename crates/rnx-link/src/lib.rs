//! Peer dependency linking for rn-externals
//!
//! A flattened install hoists the framework's dependencies next to it
//! instead of into its own `node_modules`. This crate puts symlinks back so
//! the framework's packager can resolve them from inside the framework root.

pub mod link;

// Re-export main types
pub use link::{LinkReport, LinkedPeer, PeerLinker, SkipReason, SkippedPeer};

use rnx_core::error::RnxError;

/// Result type for link operations
pub type LinkResult<T> = Result<T, RnxError>;
