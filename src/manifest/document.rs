//! Deserialization of Slipway documents.
//!
//! The raw serde structs mirror the on-disk TOML shape; conversion into
//! `BuildFile` interns names and classifies requirements as resolved or
//! pending.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::core::build_file::BuildFile;
use crate::core::group::{Group, HeaderPath, Requirement, Source};
use crate::core::module::Module;
use crate::core::reference::ModuleRef;
use crate::util::Symbol;

/// Deserialize a string table into pairs in declaration order. `info` and
/// `meta` are ordered mappings, so a sorted map type would lose the order
/// the document wrote them in.
fn ordered_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Pairs;

    impl<'de> Visitor<'de> for Pairs {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a table of string values")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::new();
            while let Some(entry) = map.next_entry::<String, String>()? {
                pairs.push(entry);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(Pairs)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    default: Option<String>,
    #[serde(default, deserialize_with = "ordered_pairs")]
    meta: Vec<(String, String)>,
    #[serde(default, rename = "module")]
    modules: Vec<RawModule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModule {
    name: Option<String>,
    #[serde(rename = "type")]
    type_tag: Option<String>,
    #[serde(default, deserialize_with = "ordered_pairs")]
    info: Vec<(String, String)>,
    #[serde(default)]
    group: RawGroup,
    #[serde(default, rename = "submodule")]
    submodules: Vec<RawModule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGroup {
    #[serde(default)]
    sources: Vec<RawSource>,
    #[serde(default)]
    requires: Vec<RawRequirement>,
    #[serde(default, rename = "header-paths")]
    header_paths: Vec<RawHeaderPath>,
    #[serde(default, rename = "group")]
    subgroups: Vec<RawGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSource {
    path: PathBuf,
    #[serde(rename = "type", default = "default_source_kind")]
    kind: String,
}

fn default_source_kind() -> String {
    "c".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRequirement {
    /// Reference to a module by name (same or any loaded document).
    module: Option<String>,
    /// Reference to another document; resolved after that document loads.
    doc: Option<PathBuf>,
    /// Symbol local to the referenced document. Only valid with `doc`.
    symbol: Option<String>,
    #[serde(default)]
    public: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHeaderPath {
    path: PathBuf,
    #[serde(default)]
    public: bool,
}

impl RawRequirement {
    fn into_requirement(self) -> Result<Requirement> {
        let target = match (self.module, self.doc) {
            (Some(name), None) => {
                if self.symbol.is_some() {
                    bail!("`symbol` is only valid together with `doc`");
                }
                ModuleRef::resolved(name)
            }
            (None, Some(doc)) => {
                ModuleRef::pending(doc, self.symbol.map(Symbol::intern))
            }
            (Some(_), Some(_)) => bail!("a requirement names either `module` or `doc`, not both"),
            (None, None) => bail!("a requirement must name `module` or `doc`"),
        };
        Ok(Requirement::new(target, self.public))
    }
}

impl RawGroup {
    fn into_group(self) -> Result<Group> {
        let mut group = Group::new();
        for source in self.sources {
            group.sources.push(Source::new(source.path, source.kind));
        }
        for req in self.requires {
            group.requirements.push(req.into_requirement()?);
        }
        for hp in self.header_paths {
            group.header_paths.push(HeaderPath {
                path: hp.path,
                public: hp.public,
            });
        }
        for sub in self.subgroups {
            group.subgroups.push(sub.into_group()?);
        }
        Ok(group)
    }
}

impl RawModule {
    fn into_module(self) -> Result<Module> {
        let mut module = Module {
            name: self.name.map(Symbol::intern),
            type_tag: self.type_tag.map(Symbol::intern),
            group: self.group.into_group()?,
            info: self
                .info
                .into_iter()
                .map(|(k, v)| (Symbol::intern(k), v))
                .collect(),
            submodules: Vec::new(),
        };
        for sub in self.submodules {
            module.submodules.push(sub.into_module()?);
        }
        Ok(module)
    }
}

/// Parse a document from TOML text.
pub fn parse_str(path: &Path, text: &str) -> Result<BuildFile> {
    let raw: RawDocument = toml::from_str(text)
        .with_context(|| format!("invalid document syntax in {}", path.display()))?;

    let mut file = BuildFile::new(path);
    file.default = raw.default.map(Symbol::intern);
    file.metadata = raw
        .meta
        .into_iter()
        .map(|(k, v)| (Symbol::intern(k), v))
        .collect();
    for module in raw.modules {
        file.modules.push(
            module
                .into_module()
                .with_context(|| format!("invalid module in {}", path.display()))?,
        );
    }
    Ok(file)
}
