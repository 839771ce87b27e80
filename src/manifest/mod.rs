//! The TOML front end: documents and plan files.

pub mod document;
pub mod plan;

use std::path::Path;

use anyhow::Result;

use crate::core::build_file::BuildFile;
use crate::resolver::load::DocumentParser;
use crate::util::fs::read_to_string;

pub use document::parse_str;
pub use plan::{load_plan, parse_plan_str};

/// Parses documents from TOML files on disk.
#[derive(Debug, Default)]
pub struct TomlParser;

impl DocumentParser for TomlParser {
    fn parse(&self, path: &Path) -> Result<BuildFile> {
        let text = read_to_string(path)?;
        parse_str(path, &text)
    }
}
