//! Wiring for the standard load pipeline: TOML front end, built-in
//! templates, loader.

use std::path::Path;

use crate::core::project::Project;
use crate::expand::{register_builtins, TemplateRegistry};
use crate::manifest::TomlParser;
use crate::resolver::load::ProjectLoader;
use crate::resolver::ValidationErrors;

/// Build the default template registry (built-ins registered).
pub fn default_registry() -> TemplateRegistry {
    let mut registry = TemplateRegistry::new();
    register_builtins(&mut registry);
    registry
}

/// Load and validate a project from a root document on disk.
///
/// `probe` answers optional feature-flag queries from templates.
pub fn load_project(
    root: &Path,
    probe: &(dyn Fn(&str) -> bool + Sync),
) -> Result<Project, ValidationErrors> {
    let parser = TomlParser;
    let registry = default_registry();
    ProjectLoader::new(&parser, &registry, probe).load(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_linked_documents_from_disk() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("root.toml"),
            r#"
                [[module]]
                name = "APP"
                [[module.group.requires]]
                doc = "lib.toml"
            "#,
        )
        .unwrap();
        std::fs::write(
            tmp.path().join("lib.toml"),
            r#"
                default = "LIB"
                [[module]]
                name = "LIB"
            "#,
        )
        .unwrap();

        let project = load_project(&tmp.path().join("root.toml"), &|_| true).unwrap();
        assert_eq!(project.len(), 2);
        assert_eq!(project.documents().len(), 2);
    }

    #[test]
    fn validation_failure_surfaces_batched_errors() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("root.toml"),
            r#"
                [[module]]
                name = "A"
                [[module]]
                name = "A"
                [[module]]
                name = "B"
                [[module.group.requires]]
                module = "MISSING"
            "#,
        )
        .unwrap();

        let err = load_project(&tmp.path().join("root.toml"), &|_| true).unwrap_err();
        assert_eq!(err.len(), 2);
    }
}
