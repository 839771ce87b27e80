//! Multi-document project loading.
//!
//! The loader walks documents breadth-first from the root: each popped
//! document is parsed, its modules template-expanded, its default alias
//! recorded, and every document its requirements point at is enqueued.
//! Loading is deliberately sequential; the rewrite pass needs every
//! document's default alias before it can run.

use std::collections::{HashSet, VecDeque};
use std::path::Path;

use anyhow::Result;

use crate::core::build_file::BuildFile;
use crate::core::project::Project;
use crate::core::reference::ModuleRef;
use crate::expand::{expand_modules, ExpandContext, TemplateRegistry};
use crate::resolver::errors::{ConfigError, ValidationErrors};
use crate::resolver::validate::{resolve_references, validate};
use crate::util::fs::{normalize_path, resolve_relative};

/// The parser collaborator: yields one BuildFile per document identity.
pub trait DocumentParser {
    fn parse(&self, path: &Path) -> Result<BuildFile>;
}

/// Loads a root document and everything it transitively references into one
/// validated `Project`.
pub struct ProjectLoader<'a> {
    parser: &'a dyn DocumentParser,
    registry: &'a TemplateRegistry,
    probe: &'a (dyn Fn(&str) -> bool + Sync),
}

impl<'a> ProjectLoader<'a> {
    pub fn new(
        parser: &'a dyn DocumentParser,
        registry: &'a TemplateRegistry,
        probe: &'a (dyn Fn(&str) -> bool + Sync),
    ) -> Self {
        ProjectLoader {
            parser,
            registry,
            probe,
        }
    }

    /// Load, expand, resolve, and validate. On any configuration error the
    /// whole accumulated batch is returned.
    pub fn load(&self, root: &Path) -> Result<Project, ValidationErrors> {
        let mut project = Project::new();
        let mut ctx = ExpandContext::new(self.probe, project.name_gen());
        let mut errors: Vec<ConfigError> = Vec::new();

        let mut queue = VecDeque::from([normalize_path(root)]);
        let mut visited: HashSet<std::path::PathBuf> = HashSet::new();

        while let Some(path) = queue.pop_front() {
            if !visited.insert(path.clone()) {
                continue;
            }
            tracing::debug!(document = %path.display(), "loading document");

            let file = match self.parser.parse(&path) {
                Ok(file) => file,
                Err(err) => {
                    errors.push(ConfigError::DocumentLoad {
                        path: path.clone(),
                        reason: format!("{:#}", err),
                    });
                    continue;
                }
            };

            if let Some(default) = file.default {
                project.set_default_alias(path.clone(), default);
            }
            ctx.add_metadata(&file.metadata);

            let mut modules = match expand_modules(self.registry, file.modules, &ctx) {
                Ok(modules) => modules,
                Err(err) => {
                    errors.push(ConfigError::Expansion {
                        path: path.clone(),
                        source: err,
                    });
                    continue;
                }
            };

            // Normalize pending document references against the referring
            // document and enqueue anything not yet seen.
            for module in &mut modules {
                module.for_each_requirement_mut(&mut |req| {
                    if let ModuleRef::Pending { document, .. } = &mut req.target {
                        let absolute = resolve_relative(&path, document);
                        if !visited.contains(&absolute) {
                            queue.push_back(absolute.clone());
                        }
                        *document = absolute;
                    }
                });
            }

            project.add_document(path, modules);
        }

        errors.extend(resolve_references(&mut project));
        errors.extend(validate(&mut project));

        if errors.is_empty() {
            tracing::info!(
                modules = project.len(),
                documents = project.documents().len(),
                "project resolved"
            );
            Ok(project)
        } else {
            Err(ValidationErrors::new(errors))
        }
    }
}
