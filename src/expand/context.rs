//! Project-wide context handed to template expansion functions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::project::NameGenerator;
use crate::util::Symbol;

/// What a template function may ask of its surroundings: feature-flag
/// probes, document metadata, and fresh module names.
///
/// The probe is injected by the caller; the engine never decides on its own
/// whether a feature flag holds.
pub struct ExpandContext<'a> {
    probe: &'a (dyn Fn(&str) -> bool + Sync),
    metadata: HashMap<Symbol, String>,
    names: Arc<NameGenerator>,
}

impl<'a> ExpandContext<'a> {
    pub fn new(probe: &'a (dyn Fn(&str) -> bool + Sync), names: Arc<NameGenerator>) -> Self {
        ExpandContext {
            probe,
            metadata: HashMap::new(),
            names,
        }
    }

    /// Merge document metadata into the context.
    pub fn add_metadata(&mut self, entries: &[(Symbol, String)]) {
        for (k, v) in entries {
            self.metadata.insert(*k, v.clone());
        }
    }

    /// Ask whether an optional feature flag is available.
    pub fn probe(&self, flag: &str) -> bool {
        (self.probe)(flag)
    }

    /// Look up a metadata value.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(&Symbol::intern(key)).map(String::as_str)
    }

    /// Generate a fresh unique module name.
    pub fn fresh_name(&self, prefix: &str) -> Symbol {
        self.names.fresh(prefix)
    }
}
