//! Framework installation discovery
//!
//! Finds an installed package the way Node resolves `<package>/package.json`:
//! starting at a directory and walking up through each ancestor's
//! `node_modules`.

use camino::{Utf8Path, Utf8PathBuf};
use rnx_core::error::RnxError;
use rnx_core::utils::absolute_path;
use tracing::debug;

use crate::{json::PackageJson, ConfigResult};

/// Package whose natively provided modules become externals
pub const DEFAULT_FRAMEWORK_PACKAGE: &str = "react-native";

/// A located framework package
#[derive(Debug, Clone, PartialEq)]
pub struct FrameworkInstall {
    /// Directory containing the framework's package.json
    root: Utf8PathBuf,
    /// Parsed framework manifest
    manifest: PackageJson,
}

impl FrameworkInstall {
    /// Locate `package` by walking up from `start_dir`
    ///
    /// A relative `start_dir` is taken from the current directory, so the
    /// located root is always absolute.
    pub async fn locate(start_dir: &Utf8Path, package: &str) -> ConfigResult<Self> {
        let manifest_path = resolve_package_manifest(start_dir, package).await?;
        let root = manifest_path
            .parent()
            .map(Utf8Path::to_path_buf)
            .unwrap_or_default();

        debug!("Resolved {} at {}", package, root);
        Self::from_root(root).await
    }

    /// Load an installation whose root directory is already known
    pub async fn from_root(root: Utf8PathBuf) -> ConfigResult<Self> {
        let root = absolute_path(&root)?;
        let manifest = crate::json::load_from_file(&root.join("package.json")).await?;
        Ok(Self { root, manifest })
    }

    /// Build an installation from parts without touching the filesystem
    pub fn new(root: Utf8PathBuf, manifest: PackageJson) -> Self {
        Self { root, manifest }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn manifest(&self) -> &PackageJson {
        &self.manifest
    }

    /// The framework's own module directory, `<root>/node_modules`
    pub fn module_dir(&self) -> Utf8PathBuf {
        self.root.join("node_modules")
    }

    /// Entry module as declared in the manifest, relative to the root
    pub fn entry_module(&self) -> &str {
        self.manifest.main_entry()
    }

    /// Absolute path of a module under the framework's `packager` directory
    pub fn packager_module(&self, relative: &str) -> Utf8PathBuf {
        self.root.join("packager").join(relative)
    }

    /// Source transform module the packager loads for every file
    pub fn transform_module_path(&self) -> Utf8PathBuf {
        self.packager_module("transformer.js")
    }
}

/// Node-style lookup of `<package>/package.json` starting at `start_dir`
pub async fn resolve_package_manifest(start_dir: &Utf8Path, package: &str) -> ConfigResult<Utf8PathBuf> {
    let start_dir = absolute_path(start_dir)?;
    let mut current = Some(start_dir.as_path());

    while let Some(dir) = current {
        // Node never looks inside node_modules/node_modules
        if dir.file_name() != Some("node_modules") {
            let candidate = dir.join("node_modules").join(package).join("package.json");
            if matches!(tokio::fs::metadata(&candidate).await, Ok(meta) if meta.is_file()) {
                return Ok(candidate);
            }
        }
        current = dir.parent();
    }

    Err(RnxError::FrameworkNotFound {
        package: package.to_string(),
        searched_from: start_dir,
    })
}
