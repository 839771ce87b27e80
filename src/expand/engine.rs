//! The template expansion engine.
//!
//! Rewrites template-typed modules into concrete subtrees until no module's
//! type tag matches a registered template. A module whose tag is not in the
//! registry is a fixed point and is never re-expanded, which is what makes
//! the worklist terminate. An expansion function that returns itself
//! unchanged will loop forever; that is the provider's responsibility, not
//! guarded here.

use std::collections::VecDeque;

use crate::core::module::Module;
use crate::expand::context::ExpandContext;
use crate::expand::registry::{ExpandError, TemplateRegistry};

/// Expand a module list until every module is concrete.
///
/// Submodules are expanded before their parent (post-order). Replacements
/// returned by an expansion function re-enter the worklist at the position
/// of the module they replaced, so declaration order is preserved in the
/// output.
pub fn expand_modules(
    registry: &TemplateRegistry,
    modules: Vec<Module>,
    ctx: &ExpandContext<'_>,
) -> Result<Vec<Module>, ExpandError> {
    let mut work: VecDeque<Module> = modules.into();
    let mut out = Vec::new();

    while let Some(mut module) = work.pop_front() {
        // Children before parents. Replacements produced later may carry
        // template-typed submodules of their own, so this runs on every
        // module popped, not only the initial list.
        module.submodules =
            expand_modules(registry, std::mem::take(&mut module.submodules), ctx)?;

        let template = module
            .type_tag
            .and_then(|tag| registry.get(tag).map(|f| (tag, f)));
        match template {
            Some((tag, f)) => {
                tracing::debug!(
                    module = module.label(),
                    template = %tag,
                    "expanding template module"
                );
                let replacements = f(module, ctx)?;
                for replacement in replacements.into_iter().rev() {
                    work.push_front(replacement);
                }
            }
            None => out.push(module),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::NameGenerator;
    use std::sync::Arc;

    fn always(_: &str) -> bool {
        true
    }

    fn ctx_parts() -> (&'static (dyn Fn(&str) -> bool + Sync), Arc<NameGenerator>) {
        (&always, Arc::new(NameGenerator::default()))
    }

    #[test]
    fn concrete_modules_pass_through_unchanged() {
        let registry = TemplateRegistry::new();
        let (probe, names) = ctx_parts();
        let ctx = ExpandContext::new(probe, names);

        let modules = vec![Module::named("A"), Module::named("B")];
        let out = expand_modules(&registry, modules.clone(), &ctx).unwrap();
        assert_eq!(out, modules);
    }

    #[test]
    fn expansion_is_idempotent() {
        let mut registry = TemplateRegistry::new();
        registry.register("pair", |_m, _ctx| {
            Ok(vec![Module::named("a"), Module::named("b")])
        });
        let (probe, names) = ctx_parts();
        let ctx = ExpandContext::new(probe, names);

        let first = expand_modules(
            &registry,
            vec![Module::named("x").with_type("pair")],
            &ctx,
        )
        .unwrap();
        let second = expand_modules(&registry, first.clone(), &ctx).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn replacements_keep_declaration_order() {
        let mut registry = TemplateRegistry::new();
        registry.register("pair", |_m, _ctx| {
            Ok(vec![Module::named("a"), Module::named("b")])
        });
        let (probe, names) = ctx_parts();
        let ctx = ExpandContext::new(probe, names);

        let modules = vec![Module::named("x").with_type("pair"), Module::named("y")];
        let out = expand_modules(&registry, modules, &ctx).unwrap();

        let names: Vec<&str> = out.iter().map(Module::label).collect();
        assert_eq!(names, vec!["a", "b", "y"]);
    }

    #[test]
    fn templates_may_expand_into_templates() {
        let mut registry = TemplateRegistry::new();
        registry.register("outer", |_m, _ctx| {
            Ok(vec![Module::named("mid").with_type("inner")])
        });
        registry.register("inner", |_m, _ctx| Ok(vec![Module::named("leaf")]));
        let (probe, names) = ctx_parts();
        let ctx = ExpandContext::new(probe, names);

        let out = expand_modules(
            &registry,
            vec![Module::named("x").with_type("outer")],
            &ctx,
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label(), "leaf");
    }

    #[test]
    fn submodules_expand_before_parent() {
        let mut registry = TemplateRegistry::new();
        // The parent template asserts its submodules are already concrete.
        registry.register("check-children", |m, _ctx| {
            if m.submodules.iter().any(|s| s.type_tag.is_some()) {
                return Err(ExpandError::new(
                    "check-children",
                    m.label(),
                    "submodule not yet expanded",
                ));
            }
            Ok(m.submodules.clone())
        });
        registry.register("leafify", |_m, _ctx| Ok(vec![Module::named("leaf")]));
        let (probe, names) = ctx_parts();
        let ctx = ExpandContext::new(probe, names);

        let mut parent = Module::named("p").with_type("check-children");
        parent
            .submodules
            .push(Module::named("c").with_type("leafify"));

        let out = expand_modules(&registry, vec![parent], &ctx).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label(), "leaf");
    }

    #[test]
    fn unregistered_tag_is_a_fixed_point() {
        let registry = TemplateRegistry::new();
        let (probe, names) = ctx_parts();
        let ctx = ExpandContext::new(probe, names);

        let modules = vec![Module::named("x").with_type("unknown")];
        let out = expand_modules(&registry, modules, &ctx).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].type_tag, Some(crate::util::Symbol::intern("unknown")));
    }

    #[test]
    fn provider_errors_propagate() {
        let mut registry = TemplateRegistry::new();
        registry.register("boom", |m, _ctx| {
            Err(ExpandError::new("boom", m.label(), "provider exploded"))
        });
        let (probe, names) = ctx_parts();
        let ctx = ExpandContext::new(probe, names);

        let err = expand_modules(
            &registry,
            vec![Module::named("x").with_type("boom")],
            &ctx,
        )
        .unwrap_err();
        assert!(err.to_string().contains("provider exploded"));
    }
}
