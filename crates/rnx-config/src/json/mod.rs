//! package.json parsing for the framework manifest

use camino::Utf8Path;
use indexmap::IndexMap;
use rnx_core::error::RnxError;
use serde::{Deserialize, Serialize};

use crate::ConfigResult;

/// Subset of package.json the externals pipeline reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageJson {
    /// Package name (required)
    pub name: String,

    /// Package version (required)
    pub version: String,

    /// Main entry point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    /// Runtime dependencies, in manifest order
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,

    /// Development dependencies
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: IndexMap<String, String>,

    /// Peer dependencies
    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: IndexMap<String, String>,
}

impl PackageJson {
    /// Get the main entry point (defaults to "index.js")
    pub fn main_entry(&self) -> &str {
        self.main.as_deref().unwrap_or("index.js")
    }

    /// Names of runtime dependencies in manifest order
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }
}

/// Parse JSON string to PackageJson
pub fn parse_package_json(content: &str) -> ConfigResult<PackageJson> {
    serde_json::from_str(content).map_err(|e| RnxError::JsonParse {
        message: format!("JSON parsing error: {}", e),
    })
}

/// Load and parse package.json from file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<PackageJson> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RnxError::io(format!("Failed to read {}", path), e))?;

    parse_package_json(&content).map_err(|e| match e {
        RnxError::JsonParse { message } => RnxError::JsonParse {
            message: format!("In file {}: {}", path, message),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_parse_minimal_package_json() {
        let json = r#"
{
  "name": "react-native",
  "version": "0.14.2"
}
"#;

        let config = parse_package_json(json).unwrap();
        assert_eq!(config.name, "react-native");
        assert_eq!(config.version, "0.14.2");
        assert_eq!(config.main_entry(), "index.js");
        assert!(config.dependencies.is_empty());
    }

    #[test]
    fn test_dependency_order_is_preserved() {
        let json = r#"
{
  "name": "react-native",
  "version": "0.14.2",
  "main": "Libraries/react-native/react-native.js",
  "dependencies": {
    "stacktrace-parser": "0.1.3",
    "absolute-path": "0.0.0",
    "fbjs": "0.3.2"
  },
  "peerDependencies": {
    "react": "^0.14.0"
  }
}
"#;

        let config = parse_package_json(json).unwrap();
        let names: Vec<&str> = config.dependency_names().collect();

        assert_eq!(names, vec!["stacktrace-parser", "absolute-path", "fbjs"]);
        assert_eq!(config.main_entry(), "Libraries/react-native/react-native.js");
        assert_eq!(config.peer_dependencies.get("react").unwrap(), "^0.14.0");
    }

    #[test]
    fn test_parse_rejects_missing_name() {
        let result = parse_package_json(r#"{ "version": "1.0.0" }"#);
        assert!(matches!(result, Err(RnxError::JsonParse { .. })));
    }

    #[tokio::test]
    async fn test_load_from_file_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("package.json")).unwrap();
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = load_from_file(&path).await.unwrap_err();
        match err {
            RnxError::JsonParse { message } => assert!(message.contains(path.as_str())),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("package.json")).unwrap();

        let err = load_from_file(&path).await.unwrap_err();
        assert!(matches!(err, RnxError::Io { .. }));
    }
}
