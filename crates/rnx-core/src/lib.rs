//! # rnx-core
//!
//! Core types and utilities shared across all rn-externals crates.
//!
//! This crate provides:
//! - `ExternalsMap`, the bundler-facing mapping from module id to module reference
//! - `RnxError` enum for unified error handling
//! - Path helpers for resolving peer dependency locations
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (ExternalsMap, ModuleReference)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{RnxError, RnxResult};
pub use types::{ExternalsMap, ModuleReference};
