//! Dependency-graph builder seam
//!
//! Graph traversal belongs to the framework's packager. The pipeline only
//! needs two answers about each module the packager reports: is it a
//! polyfill, and what is its module name. Everything behind those two
//! questions sits behind [`DependencyGraphBuilder`].

use async_trait::async_trait;
use rnx_config::GraphConfig;
use rnx_core::error::RnxError;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ResolverResult;

pub mod packager;
pub mod snapshot;

pub use packager::NodePackagerBuilder;
pub use snapshot::SnapshotGraphBuilder;

/// One module discovered while traversing from the entry point
#[async_trait]
pub trait DependencyDescriptor: Send + Sync + fmt::Debug {
    /// Whether the module is a polyfill the runtime already provides
    fn is_polyfill(&self) -> bool;

    /// Canonical module name, as the runtime `require`s it
    async fn name(&self) -> ResolverResult<String>;
}

/// Enumerates every module reachable from an entry point
#[async_trait]
pub trait DependencyGraphBuilder: Send + Sync {
    /// Descriptors in traversal order
    async fn get_dependencies(
        &self,
        config: &GraphConfig,
        entry: &str,
    ) -> ResolverResult<Vec<Box<dyn DependencyDescriptor>>>;
}

/// Descriptor whose answers are already known
///
/// The wire format is the packager's own: `{"name": ..., "isPolyfill": ...}`.
/// Polyfills may omit the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "isPolyfill")]
    pub is_polyfill: bool,
}

impl StaticDescriptor {
    pub fn module(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            is_polyfill: false,
        }
    }

    pub fn polyfill(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            is_polyfill: true,
        }
    }

    pub(crate) fn boxed(descriptors: Vec<Self>) -> Vec<Box<dyn DependencyDescriptor>> {
        descriptors
            .into_iter()
            .map(|d| Box::new(d) as Box<dyn DependencyDescriptor>)
            .collect()
    }
}

#[async_trait]
impl DependencyDescriptor for StaticDescriptor {
    fn is_polyfill(&self) -> bool {
        self.is_polyfill
    }

    async fn name(&self) -> ResolverResult<String> {
        self.name.clone().ok_or_else(|| RnxError::DescriptorName {
            message: "descriptor carries no module name".to_string(),
        })
    }
}
