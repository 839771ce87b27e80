//! Groups - composable bundles of sources, requirements, and header paths.
//!
//! Groups nest: a subgroup scopes its contents, which is how
//! platform-conditional source sets are expressed. Most consumers want the
//! flattened view, so the traversal helpers walk the whole subtree with an
//! explicit stack rather than recursion.

use std::path::PathBuf;

use crate::core::reference::ModuleRef;
use crate::util::Symbol;

/// A source file with a type tag (e.g. `c`, `header`, `resource`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub kind: Symbol,
}

impl Source {
    pub fn new(path: impl Into<PathBuf>, kind: impl Into<Symbol>) -> Self {
        Source {
            path: path.into(),
            kind: kind.into(),
        }
    }
}

/// A header search path, optionally exposed to dependents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPath {
    pub path: PathBuf,
    pub public: bool,
}

/// A directed edge to another module.
///
/// `public` marks the requirement as transitively exposed to modules that
/// require the referencing module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub target: ModuleRef,
    pub public: bool,
}

impl Requirement {
    pub fn new(target: ModuleRef, public: bool) -> Self {
        Requirement { target, public }
    }
}

/// A bundle of sources, requirements, and header paths, with nested
/// subgroups for scoped composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub sources: Vec<Source>,
    pub requirements: Vec<Requirement>,
    pub header_paths: Vec<HeaderPath>,
    pub subgroups: Vec<Group>,
}

impl Group {
    pub fn new() -> Self {
        Group::default()
    }

    /// Iterate this group and every subgroup, depth-first in declaration
    /// order.
    pub fn iter_groups(&self) -> impl Iterator<Item = &Group> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let group = stack.pop()?;
            stack.extend(group.subgroups.iter().rev());
            Some(group)
        })
    }

    /// All requirements of this group and its subgroups, flattened.
    pub fn all_requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.iter_groups().flat_map(|g| g.requirements.iter())
    }

    /// All sources of this group and its subgroups, flattened.
    pub fn all_sources(&self) -> impl Iterator<Item = &Source> {
        self.iter_groups().flat_map(|g| g.sources.iter())
    }

    /// All header paths of this group and its subgroups, flattened.
    pub fn all_header_paths(&self) -> impl Iterator<Item = &HeaderPath> {
        self.iter_groups().flat_map(|g| g.header_paths.iter())
    }

    /// Apply `f` to every requirement in this group and its subgroups.
    pub fn for_each_requirement_mut(&mut self, f: &mut dyn FnMut(&mut Requirement)) {
        let mut stack: Vec<&mut Group> = vec![self];
        while let Some(group) = stack.pop() {
            for req in &mut group.requirements {
                f(req);
            }
            stack.extend(group.subgroups.iter_mut());
        }
    }

    /// Whether the group carries nothing at any depth.
    pub fn is_empty(&self) -> bool {
        self.iter_groups().all(|g| {
            g.sources.is_empty() && g.requirements.is_empty() && g.header_paths.is_empty()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(name: &str) -> Requirement {
        Requirement::new(ModuleRef::resolved(name), false)
    }

    #[test]
    fn all_requirements_flattens_subgroups() {
        let mut group = Group::new();
        group.requirements.push(req("A"));

        let mut sub = Group::new();
        sub.requirements.push(req("B"));

        let mut subsub = Group::new();
        subsub.requirements.push(req("C"));
        sub.subgroups.push(subsub);

        group.subgroups.push(sub);

        let names: Vec<String> = group
            .all_requirements()
            .map(|r| r.target.to_string())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn for_each_requirement_mut_reaches_subgroups() {
        let mut group = Group::new();
        group.requirements.push(req("A"));
        let mut sub = Group::new();
        sub.requirements.push(req("B"));
        group.subgroups.push(sub);

        let mut seen = 0;
        group.for_each_requirement_mut(&mut |r| {
            r.public = true;
            seen += 1;
        });

        assert_eq!(seen, 2);
        assert!(group.all_requirements().all(|r| r.public));
    }

    #[test]
    fn empty_group_reports_empty() {
        let mut group = Group::new();
        group.subgroups.push(Group::new());
        assert!(group.is_empty());

        group.sources.push(Source::new("a.c", "c"));
        assert!(!group.is_empty());
    }
}
