//! Module references, resolved or pending.
//!
//! A requirement written against a module in the same document carries the
//! module's name from the start. A requirement written against another
//! document can only carry the document's identity (plus, optionally, a
//! symbol local to that document) until that document has been loaded. The
//! resolver's rewrite pass converts every `Pending` reference into a
//! `Resolved` one; after that pass, a surviving `Pending` value is an
//! internal error.

use std::fmt;
use std::path::PathBuf;

use crate::util::Symbol;

/// A reference to a module, by name or by document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleRef {
    /// A concrete module name.
    Resolved(Symbol),

    /// A forward reference into another document.
    ///
    /// `symbol` names a module local to that document; when absent, the
    /// reference targets whatever module the document nominates as its
    /// default alias.
    Pending {
        document: PathBuf,
        symbol: Option<Symbol>,
    },
}

impl ModuleRef {
    /// Build a resolved reference to a named module.
    pub fn resolved(name: impl Into<Symbol>) -> Self {
        ModuleRef::Resolved(name.into())
    }

    /// Build a pending reference into another document.
    pub fn pending(document: impl Into<PathBuf>, symbol: Option<Symbol>) -> Self {
        ModuleRef::Pending {
            document: document.into(),
            symbol,
        }
    }

    /// The resolved module name, if this reference is resolved.
    pub fn name(&self) -> Option<Symbol> {
        match self {
            ModuleRef::Resolved(name) => Some(*name),
            ModuleRef::Pending { .. } => None,
        }
    }

    /// Whether this reference still awaits resolution.
    pub fn is_pending(&self) -> bool {
        matches!(self, ModuleRef::Pending { .. })
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleRef::Resolved(name) => write!(f, "{}", name),
            ModuleRef::Pending {
                document,
                symbol: Some(symbol),
            } => write!(f, "{}:{}", document.display(), symbol),
            ModuleRef::Pending {
                document,
                symbol: None,
            } => write!(f, "{}:<default>", document.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_reference_exposes_name() {
        let r = ModuleRef::resolved("CORE");
        assert!(!r.is_pending());
        assert_eq!(r.name(), Some(Symbol::intern("CORE")));
    }

    #[test]
    fn pending_reference_has_no_name() {
        let r = ModuleRef::pending("libs/zlib.toml", None);
        assert!(r.is_pending());
        assert_eq!(r.name(), None);
    }

    #[test]
    fn display_shows_document_and_symbol() {
        let r = ModuleRef::pending("b.toml", Some(Symbol::intern("BLIB")));
        assert_eq!(r.to_string(), "b.toml:BLIB");

        let d = ModuleRef::pending("b.toml", None);
        assert_eq!(d.to_string(), "b.toml:<default>");
    }
}
