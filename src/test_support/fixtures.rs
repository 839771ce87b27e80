//! In-memory document fixtures.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::build_file::BuildFile;
use crate::manifest::parse_str;
use crate::resolver::load::DocumentParser;

/// A `DocumentParser` serving TOML text from memory, keyed by path.
pub struct MemoryParser {
    docs: HashMap<PathBuf, String>,
}

impl MemoryParser {
    pub fn new(docs: &[(&str, &str)]) -> Self {
        MemoryParser {
            docs: docs
                .iter()
                .map(|(path, text)| (PathBuf::from(path), text.to_string()))
                .collect(),
        }
    }
}

impl DocumentParser for MemoryParser {
    fn parse(&self, path: &Path) -> Result<BuildFile> {
        match self.docs.get(path) {
            Some(text) => parse_str(path, text),
            None => bail!("no such document: {}", path.display()),
        }
    }
}
