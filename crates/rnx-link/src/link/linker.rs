//! Linker implementation for hoisted peer dependencies

use camino::{Utf8Path, Utf8PathBuf};
use rnx_core::error::RnxError;
use rnx_core::utils::{absolute_path, peer_source_path};
use std::collections::HashSet;
use std::io;
use tokio::fs;
use tracing::{debug, info, warn};

use super::report::{LinkReport, LinkedPeer, SkipReason};
use crate::LinkResult;

/// Links a framework's hoisted dependencies back into its `node_modules`
#[derive(Debug, Clone)]
pub struct PeerLinker {
    /// Framework installation root
    root: Utf8PathBuf,
}

/// Result of probing one hoisted dependency
enum Probe {
    Linked(LinkedPeer),
    Skipped(SkipReason),
}

impl PeerLinker {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<root>/node_modules`
    pub fn module_dir(&self) -> Utf8PathBuf {
        self.root.join("node_modules")
    }

    /// Link every name in `dependencies` that the module directory lacks and
    /// that exists as a directory at `<root>/../<name>`.
    ///
    /// All probes run concurrently. Every one of them settles before this
    /// returns; if any link failed, the first failure in input order is
    /// returned and links already made stay in place.
    ///
    /// Link targets are absolute even when the root was given relative.
    pub async fn link_missing<I, S>(&self, dependencies: I) -> LinkResult<LinkReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = absolute_path(&self.root)?;
        let module_dir = root.join("node_modules");
        let present = list_modules(&module_dir).await?;
        let mut report = LinkReport::default();
        let mut pending = Vec::new();

        for dependency in dependencies {
            let name = dependency.as_ref();
            if present.contains(name) {
                report.skip(name, SkipReason::AlreadyPresent);
                continue;
            }

            let source = match peer_source_path(&root, name) {
                Ok(source) => source,
                Err(e) => {
                    warn!("Skipping dependency '{}': {}", name, e);
                    report.skip(name, SkipReason::InvalidName);
                    continue;
                },
            };
            let destination = module_dir.join(name);
            let task = tokio::spawn(link_peer(name.to_string(), source, destination));
            pending.push((name.to_string(), task));
        }

        let mut first_error = None;
        for (name, task) in pending {
            let outcome = task.await.map_err(|e| {
                RnxError::io(
                    format!("Link task for '{}' did not complete", name),
                    io::Error::new(io::ErrorKind::Other, e.to_string()),
                )
            });

            match outcome.and_then(|result| result) {
                Ok(Probe::Linked(peer)) => report.linked.push(peer),
                Ok(Probe::Skipped(reason)) => report.skip(&name, reason),
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

        info!(
            "Linked {} peer dependencies into {} ({} skipped)",
            report.linked.len(),
            module_dir,
            report.skipped.len()
        );
        Ok(report)
    }
}

/// Names already resolvable from `module_dir`, including `@scope/name` entries
async fn list_modules(module_dir: &Utf8Path) -> LinkResult<HashSet<String>> {
    let unreadable = |path: &Utf8Path, source: io::Error| RnxError::ModuleDirUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut names = HashSet::new();
    let mut entries = fs::read_dir(module_dir)
        .await
        .map_err(|e| unreadable(module_dir, e))?;

    while let Some(entry) = entries.next_entry().await.map_err(|e| unreadable(module_dir, e))? {
        let name = entry.file_name().to_string_lossy().into_owned();

        if name.starts_with('@') {
            let scope_dir = module_dir.join(&name);
            if let Ok(mut scoped) = fs::read_dir(&scope_dir).await {
                while let Some(child) = scoped.next_entry().await.map_err(|e| unreadable(&scope_dir, e))? {
                    names.insert(format!("{}/{}", name, child.file_name().to_string_lossy()));
                }
            }
        }

        names.insert(name);
    }

    Ok(names)
}

async fn link_peer(name: String, source: Utf8PathBuf, destination: Utf8PathBuf) -> LinkResult<Probe> {
    // Any probe failure counts as "not installed here"
    let metadata = match fs::metadata(&source).await {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!("No hoisted copy of '{}' at {}: {}", name, source, e);
            return Ok(Probe::Skipped(SkipReason::Unavailable));
        },
    };

    if !metadata.is_dir() {
        debug!("Hoisted '{}' at {} is not a directory", name, source);
        return Ok(Probe::Skipped(SkipReason::NotADirectory));
    }

    let link_error = |source_err: io::Error| RnxError::Link {
        name: name.clone(),
        destination: destination.clone(),
        source: source_err,
    };

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).await.map_err(link_error)?;
    }
    symlink_dir(&source, &destination).await.map_err(link_error)?;

    debug!("Linked {} -> {}", destination, source);
    Ok(Probe::Linked(LinkedPeer {
        name,
        source,
        destination,
    }))
}

#[cfg(unix)]
async fn symlink_dir(source: &Utf8Path, destination: &Utf8Path) -> io::Result<()> {
    fs::symlink(source, destination).await
}

#[cfg(windows)]
async fn symlink_dir(source: &Utf8Path, destination: &Utf8Path) -> io::Result<()> {
    fs::symlink_dir(source, destination).await
}
