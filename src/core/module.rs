//! Modules - named units of the project graph.
//!
//! A module exclusively owns its group and its submodules. Modules created
//! by the front end may carry a `type_tag` naming a template; the expansion
//! engine rewrites such modules into concrete subtrees before the module
//! ever reaches a `Project`.

use crate::core::group::{Group, Requirement};
use crate::util::Symbol;

/// A unit of the project graph, e.g. a library or executable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    /// Module identity. Anonymous modules are legal and simply cannot be
    /// the target of a requirement.
    pub name: Option<Symbol>,

    /// Template tag selecting expansion behavior; absent for concrete
    /// leaves.
    pub type_tag: Option<Symbol>,

    /// The module's owned group of sources, requirements, and header paths.
    pub group: Group,

    /// Free-form metadata, in declaration order.
    pub info: Vec<(Symbol, String)>,

    /// Owned submodules. Expanded before the parent.
    pub submodules: Vec<Module>,
}

impl Module {
    /// Create a named concrete module.
    pub fn named(name: impl Into<Symbol>) -> Self {
        Module {
            name: Some(name.into()),
            ..Module::default()
        }
    }

    /// Create an anonymous concrete module.
    pub fn anonymous() -> Self {
        Module::default()
    }

    /// Set the template type tag.
    pub fn with_type(mut self, tag: impl Into<Symbol>) -> Self {
        self.type_tag = Some(tag.into());
        self
    }

    /// Look up an info value by key. Later entries shadow earlier ones.
    pub fn info_get(&self, key: &str) -> Option<&str> {
        let key = Symbol::intern(key);
        self.info
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append an info entry.
    pub fn info_set(&mut self, key: impl Into<Symbol>, value: impl Into<String>) {
        self.info.push((key.into(), value.into()));
    }

    /// A printable label: the module's name, or a placeholder.
    pub fn label(&self) -> &str {
        self.name.map(Symbol::as_str).unwrap_or("<anonymous>")
    }

    /// Iterate this module and every submodule, depth-first in declaration
    /// order.
    pub fn walk(&self) -> impl Iterator<Item = &Module> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let module = stack.pop()?;
            stack.extend(module.submodules.iter().rev());
            Some(module)
        })
    }

    /// Apply `f` to every requirement of this module and its submodules,
    /// including those in nested groups.
    pub fn for_each_requirement_mut(&mut self, f: &mut dyn FnMut(&mut Requirement)) {
        let mut stack: Vec<&mut Module> = vec![self];
        while let Some(module) = stack.pop() {
            module.group.for_each_requirement_mut(f);
            stack.extend(module.submodules.iter_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::ModuleRef;

    #[test]
    fn info_lookup_prefers_latest() {
        let mut m = Module::named("CORE");
        m.info_set("flag", "a");
        m.info_set("flag", "b");

        assert_eq!(m.info_get("flag"), Some("b"));
        assert_eq!(m.info_get("missing"), None);
    }

    #[test]
    fn walk_visits_submodules_in_order() {
        let mut root = Module::named("ROOT");
        let mut child = Module::named("CHILD");
        child.submodules.push(Module::named("GRANDCHILD"));
        root.submodules.push(child);
        root.submodules.push(Module::named("SIBLING"));

        let names: Vec<&str> = root.walk().map(Module::label).collect();
        assert_eq!(names, vec!["ROOT", "CHILD", "GRANDCHILD", "SIBLING"]);
    }

    #[test]
    fn requirement_rewrite_reaches_submodules() {
        let mut root = Module::named("ROOT");
        root.group
            .requirements
            .push(Requirement::new(ModuleRef::resolved("A"), false));

        let mut child = Module::anonymous();
        child
            .group
            .requirements
            .push(Requirement::new(ModuleRef::resolved("B"), false));
        root.submodules.push(child);

        let mut count = 0;
        root.for_each_requirement_mut(&mut |_| count += 1);
        assert_eq!(count, 2);
    }

    #[test]
    fn anonymous_label() {
        assert_eq!(Module::anonymous().label(), "<anonymous>");
    }
}
