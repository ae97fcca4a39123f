//! Error types and result aliases for rn-externals operations.
//!
//! Provides a unified error type that covers every failure the externals
//! pipeline can surface, with actionable messages where one exists.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Unified error type for all rn-externals operations
#[derive(Error, Debug)]
pub enum RnxError {
    // Installation errors
    #[error("Package '{package}' could not be resolved from {searched_from}")]
    FrameworkNotFound {
        package: String,
        searched_from: Utf8PathBuf,
    },

    #[error("Failed to list module directory {path}")]
    ModuleDirUnreadable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config errors
    #[error("Failed to parse package.json: {message}")]
    JsonParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Link errors
    #[error("Failed to link peer dependency '{name}' into {destination}")]
    Link {
        name: String,
        destination: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Graph errors
    #[error("Dependency graph resolution failed: {message}")]
    GraphResolution {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to resolve module name: {message}")]
    DescriptorName { message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for rn-externals operations
pub type RnxResult<T> = Result<T, RnxError>;

impl RnxError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a graph resolution error without an underlying cause
    pub fn graph(message: impl Into<String>) -> Self {
        Self::GraphResolution {
            message: message.into(),
            source: None,
        }
    }

    /// Create a graph resolution error wrapping any error type
    pub fn graph_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::GraphResolution {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True for errors caused by a missing or broken framework installation
    pub fn is_missing_installation(&self) -> bool {
        matches!(
            self,
            RnxError::FrameworkNotFound { .. } | RnxError::ModuleDirUnreadable { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            RnxError::FrameworkNotFound { .. } => {
                Some("Install react-native in this project or pass --from pointing at the project")
            },
            RnxError::ModuleDirUnreadable { .. } => {
                Some("Reinstall the framework package so its node_modules directory exists")
            },
            RnxError::Link { .. } => {
                Some("Remove the conflicting entry from the framework's node_modules and retry")
            },
            RnxError::GraphResolution { .. } => {
                Some("Check that node is on PATH (or set RNX_NODE) and the packager entry point is valid")
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_missing_installation_classification() {
        let not_found = RnxError::FrameworkNotFound {
            package: "react-native".to_string(),
            searched_from: Utf8PathBuf::from("/project"),
        };
        let unreadable = RnxError::ModuleDirUnreadable {
            path: Utf8PathBuf::from("/project/node_modules/react-native/node_modules"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert!(not_found.is_missing_installation());
        assert!(unreadable.is_missing_installation());
        assert!(!RnxError::graph("boom").is_missing_installation());
    }

    #[test]
    fn test_source_chain_is_preserved() {
        let err = RnxError::graph_with_source(
            "packager exited",
            std::io::Error::new(std::io::ErrorKind::Other, "exit status 1"),
        );

        let source = err.source().expect("graph error should carry its cause");
        assert_eq!(source.to_string(), "exit status 1");
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_link_error_message() {
        let err = RnxError::Link {
            name: "fbjs".to_string(),
            destination: Utf8PathBuf::from("/rn/node_modules/fbjs"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };

        assert_eq!(
            err.to_string(),
            "Failed to link peer dependency 'fbjs' into /rn/node_modules/fbjs"
        );
    }
}
