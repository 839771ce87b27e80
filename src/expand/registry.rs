//! The template registry: type tags mapped to expansion functions.
//!
//! The registry is an explicit object constructed once at startup and
//! passed by reference into the expansion engine. Independent template
//! providers register their tags before the first expansion runs.

use std::collections::HashMap;

use thiserror::Error;

use crate::core::module::Module;
use crate::expand::context::ExpandContext;
use crate::util::Symbol;

/// Error surfaced from a template expansion function.
#[derive(Debug, Error)]
#[error("template `{template}` failed on module `{module}`: {message}")]
pub struct ExpandError {
    pub template: String,
    pub module: String,
    pub message: String,
}

impl ExpandError {
    pub fn new(
        template: impl Into<String>,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ExpandError {
            template: template.into(),
            module: module.into(),
            message: message.into(),
        }
    }
}

/// An expansion function: consumes a template-typed module and produces its
/// replacements. Replacements may themselves be template-typed, enabling
/// multi-stage expansion.
pub type TemplateFn =
    Box<dyn Fn(Module, &ExpandContext<'_>) -> Result<Vec<Module>, ExpandError> + Send + Sync>;

/// Mapping from template type tags to their expansion functions.
#[derive(Default)]
pub struct TemplateRegistry {
    templates: HashMap<Symbol, TemplateFn>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        TemplateRegistry::default()
    }

    /// Register an expansion function for a type tag. A later registration
    /// for the same tag replaces the earlier one.
    pub fn register<F>(&mut self, tag: impl Into<Symbol>, f: F)
    where
        F: Fn(Module, &ExpandContext<'_>) -> Result<Vec<Module>, ExpandError>
            + Send
            + Sync
            + 'static,
    {
        self.templates.insert(tag.into(), Box::new(f));
    }

    /// The expansion function for a tag, if registered.
    pub fn get(&self, tag: Symbol) -> Option<&TemplateFn> {
        self.templates.get(&tag)
    }

    /// Whether a tag is registered.
    pub fn contains(&self, tag: Symbol) -> bool {
        self.templates.contains_key(&tag)
    }

    /// Every registered tag, sorted.
    pub fn tags(&self) -> Vec<Symbol> {
        let mut tags: Vec<Symbol> = self.templates.keys().copied().collect();
        tags.sort();
        tags
    }
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = TemplateRegistry::new();
        registry.register("noop", |m, _ctx| Ok(vec![m]));

        assert!(registry.contains(Symbol::intern("noop")));
        assert!(!registry.contains(Symbol::intern("other")));
        assert_eq!(registry.tags(), vec![Symbol::intern("noop")]);
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = TemplateRegistry::new();
        registry.register("t", |_m, _ctx| Ok(vec![]));
        registry.register("t", |m, _ctx| Ok(vec![m]));

        assert_eq!(registry.tags().len(), 1);
    }
}
