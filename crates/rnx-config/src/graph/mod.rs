//! Dependency-graph builder configuration
//!
//! The graph builder is an external collaborator; this module only assembles
//! the options it is called with: which roots to scan, which files to ignore,
//! and which transform module to load.

use camino::Utf8PathBuf;
use regex::Regex;
use rnx_core::error::RnxError;
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use crate::{locate::FrameworkInstall, ConfigResult};

/// Files the packager must never pick up, regardless of platform
const SHARED_BLACKLIST: &[&str] = &[
    "node_modules/react-haste/renderers/react.js",
    "node_modules/react-haste/React.js",
    "node_modules/react-haste/renderers/shared/event/EventPropagators.js",
    "node_modules/react-haste/renderers/shared/event/eventPlugins/ResponderEventPlugin.js",
    "node_modules/react-haste/renderers/shared/event/eventPlugins/ResponderSyntheticEvent.js",
    "node_modules/react-haste/renderers/shared/event/eventPlugins/ResponderTouchHistoryStore.js",
    "node_modules/react-haste/renderers/shared/reconciler/ReactInstanceHandles.js",
    "node_modules/react-haste/renderers/shared/event/EventPluginHub.js",
    "node_modules/react-haste/renderers/shared/event/EventPluginRegistry.js",
    "node_modules/react-haste/renderers/shared/event/EventPluginUtils.js",
    "node_modules/react-haste/renderers/shared/event/EventConstants.js",
    "downstream/core/invariant.js",
];

/// Target platform of a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    Android,
    Web,
}

impl Platform {
    /// File suffixes belonging to the other platforms
    fn excluded_suffixes(&self) -> &'static [&'static str] {
        match self {
            Platform::Web => &[".ios.js"],
            Platform::Ios => &[".web.js", ".android.js"],
            Platform::Android => &[".web.js", ".ios.js"],
        }
    }
}

impl FromStr for Platform {
    type Err = RnxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "web" => Ok(Platform::Web),
            other => Err(RnxError::ConfigValidation {
                field: "platform".to_string(),
                reason: format!("unknown platform '{}', expected ios, android or web", other),
            }),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Web => "web",
        };
        f.write_str(name)
    }
}

/// Path matcher for files the graph builder should ignore
///
/// Matches any path ending in one of the blacklisted suffixes.
#[derive(Debug, Clone)]
pub struct Blacklist {
    pattern: Regex,
}

impl Blacklist {
    /// Shared entries plus, for a platform, the other platforms' sources.
    /// `None` blacklists no platform.
    pub fn for_platform(platform: Option<Platform>) -> ConfigResult<Self> {
        Self::with_additional(platform, &[])
    }

    /// Like `for_platform` with extra path suffixes in front
    pub fn with_additional(platform: Option<Platform>, additional: &[String]) -> ConfigResult<Self> {
        let suffixes = additional
            .iter()
            .map(String::as_str)
            .chain(SHARED_BLACKLIST.iter().copied())
            .chain(platform.map(|p| p.excluded_suffixes()).unwrap_or(&[]).iter().copied())
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!("({})$", suffixes)).map_err(|e| RnxError::ConfigValidation {
            field: "blacklist".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { pattern })
    }

    /// Whether the builder should skip `path`
    pub fn is_match(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    /// Regex source, usable as a JavaScript `RegExp` body
    pub fn to_pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl PartialEq for Blacklist {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.as_str() == other.pattern.as_str()
    }
}

/// Options passed to the dependency-graph builder
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    pub asset_roots: Vec<Utf8PathBuf>,
    pub project_roots: Vec<Utf8PathBuf>,
    pub blacklist: Blacklist,
    pub transform_module_path: Utf8PathBuf,
}

impl GraphConfig {
    /// Scan only the framework itself, with its own transformer
    pub fn for_framework(install: &FrameworkInstall, blacklist: Blacklist) -> Self {
        Self {
            asset_roots: vec![install.root().to_path_buf()],
            project_roots: vec![install.root().to_path_buf()],
            blacklist,
            transform_module_path: install.transform_module_path(),
        }
    }

    /// Options object in the packager's own field names
    pub fn to_packager_options(&self) -> serde_json::Value {
        json!({
            "assetRoots": self.asset_roots.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            "projectRoots": self.project_roots.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            "blacklistRE": self.blacklist.to_pattern(),
            "transformModulePath": self.transform_module_path.as_str(),
        })
    }
}
