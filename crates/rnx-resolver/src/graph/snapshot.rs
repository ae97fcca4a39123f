//! Graph builder backed by a captured descriptor list

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use rnx_config::GraphConfig;
use rnx_core::error::RnxError;
use tracing::debug;

use super::{DependencyDescriptor, DependencyGraphBuilder, StaticDescriptor};
use crate::ResolverResult;

/// Replays a JSON array of `{"name", "isPolyfill"}` records
///
/// The file is re-read on every call. Roots, blacklist and entry are ignored:
/// the snapshot already is the traversal result.
#[derive(Debug, Clone)]
pub struct SnapshotGraphBuilder {
    path: Utf8PathBuf,
}

impl SnapshotGraphBuilder {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

#[async_trait]
impl DependencyGraphBuilder for SnapshotGraphBuilder {
    async fn get_dependencies(
        &self,
        _config: &GraphConfig,
        entry: &str,
    ) -> ResolverResult<Vec<Box<dyn DependencyDescriptor>>> {
        debug!("Replaying dependency snapshot {} for entry {}", self.path, entry);

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| RnxError::graph_with_source(format!("cannot read snapshot {}", self.path), e))?;

        let descriptors: Vec<StaticDescriptor> = serde_json::from_str(&content)
            .map_err(|e| RnxError::graph_with_source(format!("malformed snapshot {}", self.path), e))?;

        Ok(StaticDescriptor::boxed(descriptors))
    }
}
