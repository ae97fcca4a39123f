//! Symlinking of hoisted peer dependencies
//!
//! Reads the framework's module directory once, then probes and links every
//! missing dependency concurrently.

pub mod linker;
pub mod report;

// Re-export main types
pub use linker::PeerLinker;
pub use report::{LinkReport, LinkedPeer, SkipReason, SkippedPeer};
