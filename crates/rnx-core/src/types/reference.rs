//! Module-system reference strings.
//!
//! A reference tells the bundler how to load an external at runtime, e.g.
//! `commonjs invariant`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Module system the bundler should use to load an external
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleReference {
    /// Resolve through the host `require`
    CommonJs,
}

impl ModuleReference {
    /// Keyword the bundler expects in front of the module id
    pub fn keyword(&self) -> &'static str {
        match self {
            ModuleReference::CommonJs => "commonjs",
        }
    }

    /// Render the reference for a module id
    pub fn render(&self, module_id: &str) -> String {
        format!("{} {}", self.keyword(), module_id)
    }
}

impl Default for ModuleReference {
    fn default() -> Self {
        ModuleReference::CommonJs
    }
}

impl fmt::Display for ModuleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_commonjs() {
        assert_eq!(ModuleReference::CommonJs.render("index"), "commonjs index");
        assert_eq!(
            ModuleReference::default().render("react-native/Libraries/Text/Text"),
            "commonjs react-native/Libraries/Text/Text"
        );
    }
}
