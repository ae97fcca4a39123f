//! Graph builder that runs the framework's own packager under Node

use async_trait::async_trait;
use camino::Utf8PathBuf;
use rnx_config::{FrameworkInstall, GraphConfig};
use rnx_core::error::RnxError;
use std::io;
use tokio::process::Command;
use tracing::{debug, info};

use super::{DependencyDescriptor, DependencyGraphBuilder, StaticDescriptor};
use crate::ResolverResult;

/// Loads the packager, asks it for the graph and prints one JSON array of
/// `{name, isPolyfill}` on stdout. Names of polyfills are not resolved.
/// Anything else written to stdout, including the packager's progress
/// logging, is moved to stderr before the packager is loaded.
/// Exits explicitly because the packager may leave file watchers running.
const DRIVER_SCRIPT: &str = r#"
const [packagerPath, optionsJson, entry] = process.argv.slice(1);
const emit = process.stdout.write.bind(process.stdout);
process.stdout.write = process.stderr.write.bind(process.stderr);
const ReactPackager = require(packagerPath);
const options = JSON.parse(optionsJson);
options.blacklistRE = new RegExp(options.blacklistRE);
Promise.resolve(ReactPackager.getDependencies(options, entry))
  .then((deps) => Promise.all(deps.map((dep) => {
    const isPolyfill = Boolean(dep.isPolyfill());
    return Promise.resolve(isPolyfill ? null : dep.getName())
      .then((name) => ({ name, isPolyfill }));
  })))
  .then((descriptors) => {
    emit(JSON.stringify(descriptors), () => process.exit(0));
  })
  .catch((err) => {
    process.stderr.write(String((err && err.stack) || err), () => process.exit(1));
  });
"#;

/// Delegates traversal to `packager/react-packager` of an installed framework
#[derive(Debug, Clone)]
pub struct NodePackagerBuilder {
    node: String,
    packager_module: Utf8PathBuf,
}

impl NodePackagerBuilder {
    pub fn new(node: impl Into<String>, packager_module: impl Into<Utf8PathBuf>) -> Self {
        Self {
            node: node.into(),
            packager_module: packager_module.into(),
        }
    }

    /// Use the packager shipped inside `install`, run with `node` from PATH
    pub fn for_install(install: &FrameworkInstall) -> Self {
        Self::new("node", install.packager_module("react-packager"))
    }

    /// Run with a different Node executable
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = node.into();
        self
    }
}

#[async_trait]
impl DependencyGraphBuilder for NodePackagerBuilder {
    async fn get_dependencies(
        &self,
        config: &GraphConfig,
        entry: &str,
    ) -> ResolverResult<Vec<Box<dyn DependencyDescriptor>>> {
        let options = config.to_packager_options().to_string();
        debug!("Running {} with packager {}", self.node, self.packager_module);

        let output = Command::new(&self.node)
            .arg("-e")
            .arg(DRIVER_SCRIPT)
            .arg(self.packager_module.as_str())
            .arg(&options)
            .arg(entry)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| RnxError::graph_with_source(format!("failed to start {}", self.node), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RnxError::graph_with_source(
                format!("packager exited with {}", output.status),
                io::Error::new(io::ErrorKind::Other, stderr),
            ));
        }

        let log = String::from_utf8_lossy(&output.stderr);
        if !log.trim().is_empty() {
            debug!("Packager output:\n{}", log.trim_end());
        }

        let descriptors = parse_driver_output(&output.stdout)?;
        info!("Packager reported {} modules reachable from {}", descriptors.len(), entry);
        Ok(StaticDescriptor::boxed(descriptors))
    }
}

/// Decode the driver's stdout
fn parse_driver_output(stdout: &[u8]) -> ResolverResult<Vec<StaticDescriptor>> {
    serde_json::from_slice(stdout).map_err(|e| RnxError::graph_with_source("packager printed malformed output", e))
}
