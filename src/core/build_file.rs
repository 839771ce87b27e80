//! BuildFile - one parsed document.

use std::path::{Path, PathBuf};

use crate::core::module::Module;
use crate::util::Symbol;

/// The output of parsing a single document: its top-level modules, its
/// metadata, and the optional default alias naming which module represents
/// this document to external referrers.
#[derive(Debug, Clone, Default)]
pub struct BuildFile {
    /// Identity of the document this was parsed from.
    pub path: PathBuf,

    /// Top-level modules, in declaration order.
    pub modules: Vec<Module>,

    /// Document-level metadata.
    pub metadata: Vec<(Symbol, String)>,

    /// The module this document nominates to represent itself.
    pub default: Option<Symbol>,
}

impl BuildFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BuildFile {
            path: path.into(),
            ..BuildFile::default()
        }
    }

    /// The document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a metadata value by key.
    pub fn metadata_get(&self, key: &str) -> Option<&str> {
        let key = Symbol::intern(key);
        self.metadata
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_lookup() {
        let mut file = BuildFile::new("root.toml");
        file.metadata.push((Symbol::intern("project"), "demo".into()));

        assert_eq!(file.metadata_get("project"), Some("demo"));
        assert_eq!(file.metadata_get("missing"), None);
    }
}
