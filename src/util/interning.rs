//! Interned symbols for module names, type tags, and info keys.
//!
//! A `Symbol` is a 32-bit index into a global table, so equality is an
//! integer comparison and copies are free. Module names are compared
//! constantly during resolution and validation, which makes interning
//! worthwhile.

use std::collections::HashMap;
use std::fmt;
use std::sync::{LazyLock, Mutex};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

static TABLE: LazyLock<Mutex<SymbolTable>> = LazyLock::new(|| Mutex::new(SymbolTable::default()));

#[derive(Default)]
struct SymbolTable {
    strings: Vec<&'static str>,
    lookup: HashMap<&'static str, u32>,
}

impl SymbolTable {
    fn intern(&mut self, s: &str) -> u32 {
        if let Some(&idx) = self.lookup.get(s) {
            return idx;
        }
        // Interned strings live for the life of the process.
        let owned: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = self.strings.len() as u32;
        self.strings.push(owned);
        self.lookup.insert(owned, idx);
        idx
    }
}

/// An interned string identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern a string, returning its symbol.
    pub fn intern(s: impl AsRef<str>) -> Self {
        let mut table = TABLE.lock().unwrap();
        Symbol(table.intern(s.as_ref()))
    }

    /// Resolve the symbol back to its string.
    pub fn as_str(self) -> &'static str {
        let table = TABLE.lock().unwrap();
        table.strings[self.0 as usize]
    }

    /// Whether the interned string is empty.
    pub fn is_empty(self) -> bool {
        self.as_str().is_empty()
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Order by content, not by interning order.
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::intern(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Symbol::intern(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_same_symbol() {
        let a = Symbol::intern("CORE");
        let b = Symbol::intern("CORE");
        let c = Symbol::intern("UTILS");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "CORE");
    }

    #[test]
    fn ordering_is_by_content() {
        let z = Symbol::intern("zzz");
        let a = Symbol::intern("aaa");

        // "aaa" was interned after "zzz" but still sorts first.
        assert!(a < z);
    }

    #[test]
    fn usable_as_map_key() {
        let mut map = HashMap::new();
        map.insert(Symbol::intern("key"), 7);
        assert_eq!(map.get(&Symbol::intern("key")), Some(&7));
    }
}
