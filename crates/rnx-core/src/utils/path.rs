//! Path utilities for peer dependency linking.
//!
//! Provides lexical path normalization and the checks that keep a dependency
//! name from escaping the directory it is joined onto.

use crate::error::{RnxError, RnxResult};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::path::PathBuf;

/// Normalize a path by resolving . and .. components lexically
pub fn normalize_path(path: &Utf8Path) -> Utf8PathBuf {
    let mut components: Vec<Utf8Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Utf8Component::CurDir => {
                // Skip current directory
            },
            Utf8Component::ParentDir => match components.last() {
                Some(Utf8Component::Normal(_)) => {
                    components.pop();
                },
                // `/..` is still `/`
                Some(Utf8Component::RootDir) | Some(Utf8Component::Prefix(_)) => {},
                _ => components.push(component),
            },
            other => {
                components.push(other);
            },
        }
    }

    components.iter().collect()
}

/// Check if a relative path stays below the directory it is joined onto
pub fn is_safe_path(path: &Utf8Path) -> bool {
    if path.is_absolute() {
        return false;
    }

    let mut depth = 0i32;

    for component in path.components() {
        match component {
            Utf8Component::CurDir => {},
            Utf8Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            },
            Utf8Component::Normal(_) => {
                depth += 1;
            },
            _ => {
                return false;
            },
        }
    }

    depth > 0
}

/// Where a flattened install puts the framework's dependency `name`:
/// `<framework_root>/../<name>`
pub fn peer_source_path(framework_root: &Utf8Path, name: &str) -> RnxResult<Utf8PathBuf> {
    if !is_safe_path(Utf8Path::new(name)) {
        return Err(RnxError::ConfigValidation {
            field: format!("dependencies.{}", name),
            reason: "dependency name must be a relative package path".to_string(),
        });
    }

    Ok(normalize_path(&framework_root.join("..").join(name)))
}

/// Anchor `path` at the current directory when relative, then normalize
pub fn absolute_path(path: &Utf8Path) -> RnxResult<Utf8PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_path(path));
    }

    let cwd = std::env::current_dir()
        .map_err(|e| RnxError::io("Failed to read current directory".to_string(), e))?;
    Ok(normalize_path(&to_utf8_path(cwd)?.join(path)))
}

/// Convert an OS path into a UTF-8 path
pub fn to_utf8_path(path: PathBuf) -> RnxResult<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| RnxError::ConfigValidation {
        field: "path".to_string(),
        reason: format!("{} is not valid UTF-8", path.display()),
    })
}
