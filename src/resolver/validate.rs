//! Reference rewriting and project integrity validation.
//!
//! Validation is batched: every duplicate name, undefined reference, and
//! requirement cycle found in one pass is reported together.

use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::project::Project;
use crate::core::reference::ModuleRef;
use crate::resolver::errors::ConfigError;
use crate::util::Symbol;

fn requirer_label(name: Option<Symbol>) -> String {
    name.map(|n| n.to_string())
        .unwrap_or_else(|| "<anonymous>".to_string())
}

/// Rewrite every pending reference in the project to a resolved one.
///
/// A pending reference carrying a local symbol resolves to that symbol; one
/// without a symbol resolves through the referenced document's default
/// alias. After this pass, any surviving `Pending` value is reported as an
/// internal error (the defensive check turns a silent bug into a loud one).
pub fn resolve_references(project: &mut Project) -> Vec<ConfigError> {
    let aliases = project.default_aliases().clone();
    let mut errors = Vec::new();

    project.for_each_requirement_mut(|requirer, req| {
        if let ModuleRef::Pending { document, symbol } = &req.target {
            let name = symbol.or_else(|| aliases.get(document.as_path()).copied());
            match name {
                Some(name) => req.target = ModuleRef::Resolved(name),
                None => errors.push(ConfigError::NoDefaultAlias {
                    document: document.clone(),
                    requirer: requirer_label(requirer),
                }),
            }
        }
    });

    // Defensive post-pass: with no missing-default errors, nothing may
    // remain pending. Skipped when the pass above already reported, so a
    // missing default is not double-counted.
    if errors.is_empty() {
        for (id, req) in project.requirements() {
            if req.target.is_pending() {
                errors.push(ConfigError::PendingSurvived {
                    reference: req.target.to_string(),
                    requirer: project.module(id).label().to_string(),
                });
            }
        }
    }

    errors
}

/// Validate name uniqueness, referential integrity, and acyclicity.
pub fn validate(project: &mut Project) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    for (name, first, dup) in project.build_name_index() {
        errors.push(ConfigError::DuplicateModule {
            name: name.to_string(),
            documents: vec![
                project.document_of(first).to_path_buf(),
                project.document_of(dup).to_path_buf(),
            ],
        });
    }

    let duplicates = !errors.is_empty();

    // Pending references are the resolve pass's concern: it either rewrote
    // them or already reported them, so only resolved names are checked
    // here.
    let known: HashSet<Symbol> = project.modules().filter_map(|(_, m)| m.name).collect();
    for (id, req) in project.requirements() {
        if let ModuleRef::Resolved(name) = &req.target {
            if !known.contains(name) {
                errors.push(ConfigError::UndefinedReference {
                    reference: name.to_string(),
                    requirer: project.module(id).label().to_string(),
                });
            }
        }
    }

    // The cycle graph keys nodes by name, which is ambiguous while two
    // modules share one; duplicates must be fixed before cycles can be
    // judged.
    if !duplicates {
        errors.extend(detect_cycles(project));
    }
    errors
}

/// Reject cycles in the requirement graph.
///
/// A cyclic requirement set would otherwise resolve without error and then
/// deadlock downstream, with every derived action permanently blocked.
fn detect_cycles(project: &Project) -> Vec<ConfigError> {
    let mut graph: DiGraph<Symbol, ()> = DiGraph::new();
    let mut nodes: HashMap<Symbol, NodeIndex> = HashMap::new();

    for (_, module) in project.modules() {
        if let Some(name) = module.name {
            nodes.entry(name).or_insert_with(|| graph.add_node(name));
        }
    }
    for (id, req) in project.requirements() {
        let from = project.module(id).name;
        let to = req.target.name();
        if let (Some(from), Some(to)) = (from, to) {
            if let (Some(&a), Some(&b)) = (nodes.get(&from), nodes.get(&to)) {
                graph.add_edge(a, b, ());
            }
        }
    }

    let mut errors = Vec::new();
    for scc in tarjan_scc(&graph) {
        let cyclic = scc.len() > 1 || (scc.len() == 1 && graph.contains_edge(scc[0], scc[0]));
        if cyclic {
            let mut names: Vec<String> = scc.iter().map(|&n| graph[n].to_string()).collect();
            names.sort();
            names.push(names[0].clone());
            errors.push(ConfigError::RequirementCycle { cycle: names });
        }
    }
    errors
}
