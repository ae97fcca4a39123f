//! Core data types for rn-externals.
//!
//! This module provides the fundamental types used throughout the workspace:
//! - Module-system references handed to the bundler
//! - The externals map itself

pub mod externals;
pub mod reference;

// Re-export all public types
pub use externals::ExternalsMap;
pub use reference::ModuleReference;
