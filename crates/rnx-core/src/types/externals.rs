//! Bundler externals map.
//!
//! Maps a module identifier to the string the bundler uses to load it from
//! the host module system instead of bundling it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ModuleReference;
use crate::error::{RnxError, RnxResult};

/// Mapping from module identifier to module-system reference string
///
/// Insertion order is kept so serialized output is stable between runs.
/// Inserting an existing id overwrites the earlier reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalsMap {
    entries: IndexMap<String, String>,
}

impl ExternalsMap {
    /// Create an empty externals map
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold module ids into a map, later ids overwriting earlier duplicates
    pub fn from_module_ids<I, S>(module_ids: I, reference: ModuleReference) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        module_ids
            .into_iter()
            .fold(Self::new(), |mut externals, module_id| {
                externals.insert(module_id.into(), reference);
                externals
            })
    }

    /// Record a module id, returning the reference it replaced if any
    pub fn insert(&mut self, module_id: String, reference: ModuleReference) -> Option<String> {
        let rendered = reference.render(&module_id);
        self.entries.insert(module_id, rendered)
    }

    pub fn get(&self, module_id: &str) -> Option<&str> {
        self.entries.get(module_id).map(String::as_str)
    }

    pub fn contains(&self, module_id: &str) -> bool {
        self.entries.contains_key(module_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as a JSON object suitable for a bundler `externals` field
    pub fn to_json(&self, pretty: bool) -> RnxResult<String> {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };

        result.map_err(|e| RnxError::JsonParse {
            message: format!("JSON serialization error: {}", e),
        })
    }
}

impl IntoIterator for ExternalsMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
