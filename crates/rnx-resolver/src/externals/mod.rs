//! Projection of graph descriptors into a bundler externals map

use rnx_core::error::RnxError;
use rnx_core::{ExternalsMap, ModuleReference};
use std::io;
use tracing::debug;

use crate::graph::DependencyDescriptor;
use crate::ResolverResult;

/// Drop polyfills, resolve the remaining names concurrently and fold them
/// into `name -> "commonjs <name>"` in traversal order.
///
/// Fails if any name fails to resolve; all resolutions settle first.
pub async fn project_externals(
    descriptors: Vec<Box<dyn DependencyDescriptor>>,
) -> ResolverResult<ExternalsMap> {
    let total = descriptors.len();
    let pending: Vec<_> = descriptors
        .into_iter()
        .filter(|descriptor| !descriptor.is_polyfill())
        .map(|descriptor| tokio::spawn(async move { descriptor.name().await }))
        .collect();

    debug!("Resolving {} module names ({} polyfills dropped)", pending.len(), total - pending.len());

    let mut module_ids = Vec::with_capacity(pending.len());
    let mut first_error = None;
    for task in pending {
        let resolved = task.await.map_err(|e| {
            RnxError::io(
                "Name resolution task did not complete".to_string(),
                io::Error::new(io::ErrorKind::Other, e.to_string()),
            )
        });

        match resolved.and_then(|name| name) {
            Ok(name) => module_ids.push(name),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            },
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    Ok(ExternalsMap::from_module_ids(module_ids, ModuleReference::CommonJs))
}
