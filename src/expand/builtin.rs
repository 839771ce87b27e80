//! Built-in template providers.
//!
//! Two templates ship with the engine:
//! - `optional`: keeps or drops a module based on a feature-flag probe.
//! - `variants`: fans a module out into one concrete copy per variant.

use crate::core::module::Module;
use crate::expand::registry::{ExpandError, TemplateRegistry};

/// Register the built-in templates on a registry.
pub fn register_builtins(registry: &mut TemplateRegistry) {
    registry.register("optional", |mut module, ctx| {
        let flag = module
            .info_get("flag")
            .ok_or_else(|| {
                ExpandError::new("optional", module.label(), "missing `flag` info key")
            })?
            .to_owned();

        if ctx.probe(&flag) {
            module.type_tag = None;
            Ok(vec![module])
        } else {
            tracing::debug!(module = module.label(), %flag, "optional module dropped");
            Ok(vec![])
        }
    });

    registry.register("variants", |module, ctx| {
        let list = module
            .info_get("variants")
            .ok_or_else(|| {
                ExpandError::new("variants", module.label(), "missing `variants` info key")
            })?
            .to_owned();

        let base = module
            .name
            .unwrap_or_else(|| ctx.fresh_name("variants"));

        let mut out = Vec::new();
        for variant in list.split(',').map(str::trim).filter(|v| !v.is_empty()) {
            let mut copy = module.clone();
            copy.name = Some(crate::util::Symbol::intern(format!("{}_{}", base, variant)));
            copy.type_tag = None;
            copy.info_set("variant", variant);
            out.push(copy);
        }

        if out.is_empty() {
            return Err(ExpandError::new(
                "variants",
                module.label(),
                "`variants` info key names no variants",
            ));
        }
        Ok(out)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::NameGenerator;
    use crate::expand::context::ExpandContext;
    use crate::expand::engine::expand_modules;
    use std::sync::Arc;

    fn registry() -> TemplateRegistry {
        let mut r = TemplateRegistry::new();
        register_builtins(&mut r);
        r
    }

    #[test]
    fn optional_keeps_module_when_probe_passes() {
        let registry = registry();
        let probe = |flag: &str| flag == "have_zlib";
        let ctx = ExpandContext::new(&probe, Arc::new(NameGenerator::default()));

        let mut m = Module::named("ZLIB_SHIM").with_type("optional");
        m.info_set("flag", "have_zlib");

        let out = expand_modules(&registry, vec![m], &ctx).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label(), "ZLIB_SHIM");
        assert_eq!(out[0].type_tag, None);
    }

    #[test]
    fn optional_drops_module_when_probe_fails() {
        let registry = registry();
        let probe = |_: &str| false;
        let ctx = ExpandContext::new(&probe, Arc::new(NameGenerator::default()));

        let mut m = Module::named("ZLIB_SHIM").with_type("optional");
        m.info_set("flag", "have_zlib");

        let out = expand_modules(&registry, vec![m], &ctx).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn optional_without_flag_errors() {
        let registry = registry();
        let probe = |_: &str| true;
        let ctx = ExpandContext::new(&probe, Arc::new(NameGenerator::default()));

        let m = Module::named("X").with_type("optional");
        let err = expand_modules(&registry, vec![m], &ctx).unwrap_err();
        assert!(err.to_string().contains("missing `flag`"));
    }

    #[test]
    fn variants_fans_out_named_copies() {
        let registry = registry();
        let probe = |_: &str| true;
        let ctx = ExpandContext::new(&probe, Arc::new(NameGenerator::default()));

        let mut m = Module::named("libfoo").with_type("variants");
        m.info_set("variants", "static, shared");

        let out = expand_modules(&registry, vec![m], &ctx).unwrap();
        let names: Vec<&str> = out.iter().map(Module::label).collect();
        assert_eq!(names, vec!["libfoo_static", "libfoo_shared"]);
        assert_eq!(out[0].info_get("variant"), Some("static"));
        assert_eq!(out[1].info_get("variant"), Some("shared"));
    }

    #[test]
    fn variants_names_anonymous_modules_via_generator() {
        let registry = registry();
        let probe = |_: &str| true;
        let ctx = ExpandContext::new(&probe, Arc::new(NameGenerator::default()));

        let mut m = Module::anonymous().with_type("variants");
        m.info_set("variants", "debug");

        let out = expand_modules(&registry, vec![m], &ctx).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].label().starts_with("__variants_"));
    }
}
