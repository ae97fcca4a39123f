//! Utility functions and helpers.
//!
//! Common functionality used across multiple rn-externals crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{absolute_path, is_safe_path, normalize_path, peer_source_path, to_utf8_path};
