//! The externals pipeline: link peers, resolve the graph, project.
//!
//! Each stage starts only after the previous one settled. Nothing is cached
//! between calls, and nothing done by an earlier stage is undone when a later
//! one fails.

use camino::Utf8PathBuf;
use rnx_config::{Blacklist, FrameworkInstall, GraphConfig, Platform, DEFAULT_FRAMEWORK_PACKAGE};
use rnx_core::ExternalsMap;
use rnx_link::{LinkReport, PeerLinker};
use tracing::info;

use crate::externals::project_externals;
use crate::graph::DependencyGraphBuilder;
use crate::ResolverResult;

/// Knobs for a resolver run
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverOptions {
    /// Directory Node-style package lookup starts from
    pub start_dir: Utf8PathBuf,
    /// Framework package name
    pub package: String,
    /// Whether stage 1 runs at all
    pub link_peers: bool,
    /// Platform whose counterparts get blacklisted; `None` blacklists none
    pub platform: Option<Platform>,
    /// Extra blacklisted path suffixes
    pub additional_blacklist: Vec<String>,
}

impl ResolverOptions {
    pub fn new(start_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
            package: DEFAULT_FRAMEWORK_PACKAGE.to_string(),
            link_peers: true,
            platform: None,
            additional_blacklist: Vec::new(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_platform(mut self, platform: Option<Platform>) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_additional_blacklist(mut self, suffixes: Vec<String>) -> Self {
        self.additional_blacklist = suffixes;
        self
    }

    pub fn without_peer_links(mut self) -> Self {
        self.link_peers = false;
        self
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct Resolution {
    pub externals: ExternalsMap,
    /// `None` when peer linking was turned off
    pub links: Option<LinkReport>,
}

/// Computes the modules a framework runtime provides natively
pub struct ExternalsResolver {
    options: ResolverOptions,
    builder: Box<dyn DependencyGraphBuilder>,
}

impl ExternalsResolver {
    pub fn new(options: ResolverOptions, builder: Box<dyn DependencyGraphBuilder>) -> Self {
        Self { options, builder }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Locate the framework and run the whole pipeline
    pub async fn compute_externals(&self) -> ResolverResult<ExternalsMap> {
        let install = self.locate().await?;
        Ok(self.resolve(&install).await?.externals)
    }

    /// Find the framework installation these options point at
    pub async fn locate(&self) -> ResolverResult<FrameworkInstall> {
        FrameworkInstall::locate(&self.options.start_dir, &self.options.package).await
    }

    /// Run the pipeline against a known installation
    pub async fn resolve(&self, install: &FrameworkInstall) -> ResolverResult<Resolution> {
        let links = if self.options.link_peers {
            Some(self.link_peers(install).await?)
        } else {
            None
        };

        let blacklist = Blacklist::with_additional(self.options.platform, &self.options.additional_blacklist)?;
        let config = GraphConfig::for_framework(install, blacklist);
        let descriptors = self.builder.get_dependencies(&config, install.entry_module()).await?;
        let externals = project_externals(descriptors).await?;

        info!("Computed {} externals for {}", externals.len(), install.manifest().name);
        Ok(Resolution { externals, links })
    }

    /// Stage 1 only
    pub async fn link_peers(&self, install: &FrameworkInstall) -> ResolverResult<LinkReport> {
        PeerLinker::new(install.root())
            .link_missing(install.manifest().dependency_names())
            .await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::graph::{DependencyDescriptor, StaticDescriptor};
    use async_trait::async_trait;
    use camino::Utf8Path;
    use rnx_core::error::RnxError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Builder returning a fixed graph and remembering what it was asked
    struct StubBuilder {
        descriptors: Vec<StaticDescriptor>,
        calls: Arc<AtomicUsize>,
        expected_entry: &'static str,
    }

    #[async_trait]
    impl DependencyGraphBuilder for StubBuilder {
        async fn get_dependencies(
            &self,
            config: &GraphConfig,
            entry: &str,
        ) -> ResolverResult<Vec<Box<dyn DependencyDescriptor>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(entry, self.expected_entry);
            assert_eq!(config.project_roots.len(), 1);
            Ok(StaticDescriptor::boxed(self.descriptors.clone()))
        }
    }

    struct FailingBuilder;

    #[async_trait]
    impl DependencyGraphBuilder for FailingBuilder {
        async fn get_dependencies(
            &self,
            _config: &GraphConfig,
            _entry: &str,
        ) -> ResolverResult<Vec<Box<dyn DependencyDescriptor>>> {
            Err(RnxError::graph("entry point does not exist"))
        }
    }

    fn stub(calls: Arc<AtomicUsize>) -> Box<dyn DependencyGraphBuilder> {
        Box::new(StubBuilder {
            descriptors: vec![
                StaticDescriptor::module("index"),
                StaticDescriptor::polyfill("polyfill-1"),
            ],
            calls,
            expected_entry: "index.js",
        })
    }

    /// Project at `<tmp>` with react-native declaring `a` and `b`
    async fn fake_project(temp_dir: &TempDir, with_module_dir: bool) -> (Utf8PathBuf, Utf8PathBuf) {
        let project = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let root = project.join("node_modules/react-native");
        tokio::fs::create_dir_all(&root).await.unwrap();
        if with_module_dir {
            tokio::fs::create_dir_all(root.join("node_modules")).await.unwrap();
        }
        tokio::fs::write(
            root.join("package.json"),
            r#"{ "name": "react-native", "version": "0.14.2", "dependencies": { "a": "1.0.0", "b": "1.0.0" } }"#,
        )
        .await
        .unwrap();
        tokio::fs::create_dir_all(project.join("node_modules/a")).await.unwrap();
        (project, root)
    }

    async fn exists(path: &Utf8Path) -> bool {
        tokio::fs::symlink_metadata(path).await.is_ok()
    }

    #[tokio::test]
    async fn test_end_to_end_with_stub_builder() {
        let temp_dir = TempDir::new().unwrap();
        let (project, root) = fake_project(&temp_dir, true).await;
        let calls = Arc::new(AtomicUsize::new(0));

        let resolver = ExternalsResolver::new(ResolverOptions::new(project.clone()), stub(calls.clone()));
        let externals = resolver.compute_externals().await.unwrap();

        assert_eq!(externals.to_json(false).unwrap(), r#"{"index":"commonjs index"}"#);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let link = tokio::fs::read_link(root.join("node_modules/a")).await.unwrap();
        assert_eq!(link, project.join("node_modules/a").into_std_path_buf());
        assert!(!exists(&root.join("node_modules/b")).await);
    }

    #[tokio::test]
    async fn test_running_twice_does_not_relink() {
        let temp_dir = TempDir::new().unwrap();
        let (project, _root) = fake_project(&temp_dir, true).await;
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = ExternalsResolver::new(ResolverOptions::new(project), stub(calls.clone()));
        let install = resolver.locate().await.unwrap();

        let first = resolver.resolve(&install).await.unwrap();
        let second = resolver.resolve(&install).await.unwrap();

        assert_eq!(first.externals, second.externals);
        assert_eq!(first.links.unwrap().linked_names().collect::<Vec<_>>(), vec!["a"]);
        assert!(second.links.unwrap().linked.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_module_dir_rejects_before_graph() {
        let temp_dir = TempDir::new().unwrap();
        let (project, root) = fake_project(&temp_dir, false).await;
        let calls = Arc::new(AtomicUsize::new(0));

        let resolver = ExternalsResolver::new(ResolverOptions::new(project), stub(calls.clone()));
        let err = resolver.compute_externals().await.unwrap_err();

        assert!(matches!(err, RnxError::ModuleDirUnreadable { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!exists(&root.join("node_modules")).await);
    }

    #[tokio::test]
    async fn test_graph_failure_surfaces_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let (project, _root) = fake_project(&temp_dir, true).await;

        let resolver = ExternalsResolver::new(ResolverOptions::new(project), Box::new(FailingBuilder));
        let err = resolver.compute_externals().await.unwrap_err();

        match err {
            RnxError::GraphResolution { message, .. } => assert_eq!(message, "entry point does not exist"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_peer_linking_can_be_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let (project, root) = fake_project(&temp_dir, true).await;
        let calls = Arc::new(AtomicUsize::new(0));

        let options = ResolverOptions::new(project).without_peer_links();
        let resolver = ExternalsResolver::new(options, stub(calls));
        let install = resolver.locate().await.unwrap();
        let resolution = resolver.resolve(&install).await.unwrap();

        assert!(resolution.links.is_none());
        assert!(!exists(&root.join("node_modules/a")).await);
        assert_eq!(resolution.externals.get("index"), Some("commonjs index"));
    }
}
