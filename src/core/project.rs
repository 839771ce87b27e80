//! Project - the aggregated, multi-document module registry.
//!
//! Modules are stored in an arena: every module (top-level or submodule)
//! gets a stable `ModuleId` at insertion, and parent/child relationships
//! are id lists. Whole-project traversal is a plain iteration over the
//! arena, so it cannot recurse deeply and cannot loop on a malformed
//! parent/child relationship.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::core::group::Requirement;
use crate::core::module::Module;
use crate::util::Symbol;

/// Stable identity of a module within a `Project`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(u32);

impl ModuleId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// Monotonic counter handing out unique generated module names.
#[derive(Debug, Default)]
pub struct NameGenerator {
    counter: AtomicU32,
}

impl NameGenerator {
    /// Produce a fresh name with the given prefix, e.g. `__tmpl_3`.
    pub fn fresh(&self, prefix: &str) -> Symbol {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        Symbol::intern(format!("__{}_{}", prefix, n))
    }
}

#[derive(Debug)]
struct Slot {
    module: Module,
    parent: Option<ModuleId>,
    children: Vec<ModuleId>,
    document: usize,
}

/// The global registry of all modules reachable from a root document.
#[derive(Debug, Default)]
pub struct Project {
    slots: Vec<Slot>,
    roots: Vec<ModuleId>,
    documents: Vec<PathBuf>,
    default_aliases: HashMap<PathBuf, Symbol>,
    names: HashMap<Symbol, ModuleId>,
    namegen: Arc<NameGenerator>,
}

impl Project {
    pub fn new() -> Self {
        Project::default()
    }

    /// Register one loaded document's (already expanded) modules.
    ///
    /// The module trees are flattened into the arena; submodule lists are
    /// drained into parent/child id links.
    pub fn add_document(&mut self, path: PathBuf, modules: Vec<Module>) {
        let doc = self.documents.len();
        self.documents.push(path);

        // Pre-order insertion with an explicit stack; children are linked
        // onto their parent in declaration order.
        let mut stack: Vec<(Module, Option<ModuleId>)> = Vec::new();
        for module in modules.into_iter().rev() {
            stack.push((module, None));
        }
        while let Some((mut module, parent)) = stack.pop() {
            let submodules = std::mem::take(&mut module.submodules);
            let id = ModuleId(self.slots.len() as u32);
            self.slots.push(Slot {
                module,
                parent,
                children: Vec::new(),
                document: doc,
            });
            match parent {
                Some(p) => self.slots[p.index()].children.push(id),
                None => self.roots.push(id),
            }
            for sub in submodules.into_iter().rev() {
                stack.push((sub, Some(id)));
            }
        }
    }

    /// Record a document's default alias.
    pub fn set_default_alias(&mut self, document: PathBuf, name: Symbol) {
        self.default_aliases.insert(document, name);
    }

    /// The default alias a document nominated, if any.
    pub fn default_alias(&self, document: &Path) -> Option<Symbol> {
        self.default_aliases.get(document).copied()
    }

    /// The full document path -> default alias map.
    pub fn default_aliases(&self) -> &HashMap<PathBuf, Symbol> {
        &self.default_aliases
    }

    /// Every document registered, in load order.
    pub fn documents(&self) -> &[PathBuf] {
        &self.documents
    }

    /// Number of modules in the project, submodules included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Top-level modules, in declaration order across documents.
    pub fn roots(&self) -> &[ModuleId] {
        &self.roots
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.slots[id.index()].module
    }

    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.slots[id.index()].module
    }

    pub fn parent(&self, id: ModuleId) -> Option<ModuleId> {
        self.slots[id.index()].parent
    }

    pub fn children(&self, id: ModuleId) -> &[ModuleId] {
        &self.slots[id.index()].children
    }

    /// The document a module came from.
    pub fn document_of(&self, id: ModuleId) -> &Path {
        &self.documents[self.slots[id.index()].document]
    }

    /// Iterate every module in the arena, submodules included.
    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (ModuleId(i as u32), &slot.module))
    }

    /// Iterate every requirement across every module and group.
    pub fn requirements(&self) -> impl Iterator<Item = (ModuleId, &Requirement)> {
        self.modules()
            .flat_map(|(id, m)| m.group.all_requirements().map(move |r| (id, r)))
    }

    /// Apply `f` to every requirement in the project. The first argument is
    /// the name of the requiring module, if it has one.
    pub fn for_each_requirement_mut(&mut self, mut f: impl FnMut(Option<Symbol>, &mut Requirement)) {
        for slot in &mut self.slots {
            let requirer = slot.module.name;
            slot.module
                .group
                .for_each_requirement_mut(&mut |req| f(requirer, req));
        }
    }

    /// Rewrite resolved requirement references through a name remapping.
    /// Names absent from the map are left untouched.
    pub fn remap_requirements(&mut self, remap: &HashMap<Symbol, Symbol>) {
        use crate::core::reference::ModuleRef;
        self.for_each_requirement_mut(|_, req| {
            if let ModuleRef::Resolved(name) = &req.target {
                if let Some(&new) = remap.get(name) {
                    req.target = ModuleRef::Resolved(new);
                }
            }
        });
    }

    /// Build the name -> module index, returning every duplicate found as
    /// `(name, first_occurrence, duplicate)`. First occurrence wins the
    /// index entry. Anonymous modules are excluded.
    pub fn build_name_index(&mut self) -> Vec<(Symbol, ModuleId, ModuleId)> {
        self.names.clear();
        let mut duplicates = Vec::new();
        for (i, slot) in self.slots.iter().enumerate() {
            let id = ModuleId(i as u32);
            if let Some(name) = slot.module.name {
                if let Some(&first) = self.names.get(&name) {
                    duplicates.push((name, first, id));
                } else {
                    self.names.insert(name, id);
                }
            }
        }
        duplicates
    }

    /// Look up a module by name. Only meaningful after
    /// [`build_name_index`](Self::build_name_index) has run.
    pub fn lookup(&self, name: Symbol) -> Option<ModuleId> {
        self.names.get(&name).copied()
    }

    /// Handle to the project's anonymous-name counter.
    pub fn name_gen(&self) -> Arc<NameGenerator> {
        Arc::clone(&self.namegen)
    }

    /// Generate a fresh unique module name.
    pub fn fresh_name(&self, prefix: &str) -> Symbol {
        self.namegen.fresh(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::ModuleRef;

    fn tree() -> Vec<Module> {
        let mut root = Module::named("ROOT");
        let mut child = Module::named("CHILD");
        child.submodules.push(Module::anonymous());
        root.submodules.push(child);
        vec![root, Module::named("OTHER")]
    }

    #[test]
    fn add_document_flattens_in_preorder() {
        let mut project = Project::new();
        project.add_document(PathBuf::from("root.toml"), tree());

        let labels: Vec<&str> = project.modules().map(|(_, m)| m.label()).collect();
        assert_eq!(labels, vec!["ROOT", "CHILD", "<anonymous>", "OTHER"]);
        assert_eq!(project.roots().len(), 2);

        let root = project.roots()[0];
        let child = project.children(root)[0];
        assert_eq!(project.module(child).label(), "CHILD");
        assert_eq!(project.parent(child), Some(root));
        assert_eq!(project.children(child).len(), 1);
    }

    #[test]
    fn name_index_reports_duplicates() {
        let mut project = Project::new();
        project.add_document(
            PathBuf::from("a.toml"),
            vec![Module::named("CORE"), Module::anonymous()],
        );
        project.add_document(PathBuf::from("b.toml"), vec![Module::named("CORE")]);

        let dups = project.build_name_index();
        assert_eq!(dups.len(), 1);
        let (name, first, dup) = dups[0];
        assert_eq!(name.as_str(), "CORE");
        assert_eq!(project.document_of(first), Path::new("a.toml"));
        assert_eq!(project.document_of(dup), Path::new("b.toml"));

        // First occurrence wins the lookup.
        assert_eq!(project.lookup(name), Some(first));
    }

    #[test]
    fn fresh_names_are_unique() {
        let project = Project::new();
        let a = project.fresh_name("anon");
        let b = project.fresh_name("anon");
        assert_ne!(a, b);
    }

    #[test]
    fn remap_rewrites_resolved_references() {
        let mut module = Module::named("APP");
        module.group.requirements.push(Requirement::new(
            ModuleRef::resolved("OLD"),
            true,
        ));

        let mut project = Project::new();
        project.add_document(PathBuf::from("root.toml"), vec![module]);

        let mut remap = HashMap::new();
        remap.insert(Symbol::intern("OLD"), Symbol::intern("NEW"));
        project.remap_requirements(&remap);

        let (_, req) = project.requirements().next().unwrap();
        assert_eq!(req.target, ModuleRef::resolved("NEW"));
    }
}
