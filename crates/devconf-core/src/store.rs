// ── Configuration store contract ──
//
// Values are addressed by (namespace, key). Reads never fail: a miss
// returns the caller-supplied default. Persistence is the implementor's
// business; `MemoryStore` is the reference implementation and the backing
// map of the file store in `devconf-config`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Read/write access to per-device configuration values.
pub trait ConfigStore {
    fn get_int(&self, namespace: &str, key: &str, default: i64) -> i64;

    fn get_string(&self, namespace: &str, key: &str, default: &str) -> String;

    fn set_int(&mut self, namespace: &str, key: &str, value: i64);

    fn set_string(&mut self, namespace: &str, key: &str, value: &str);

    /// Whether any value is stored under `namespace`.
    fn has_section(&self, namespace: &str) -> bool;
}

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreValue {
    Int(i64),
    Str(String),
}

impl StoreValue {
    /// Integer view. Strings holding a decimal integer qualify.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Str(s) => s.trim().parse().ok(),
        }
    }

    /// String view. Integers render in decimal.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Str(s) => s.clone(),
        }
    }
}

impl From<i64> for StoreValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for StoreValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

/// Namespace → (key → value), both levels ordered.
pub type Sections = BTreeMap<String, BTreeMap<String, StoreValue>>;

/// In-memory store. Equality compares every section, which is what the
/// "cancel leaves the store untouched" checks rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    sections: Sections,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn get(&self, namespace: &str, key: &str) -> Option<&StoreValue> {
        self.sections.get(namespace)?.get(key)
    }

    pub fn insert(&mut self, namespace: &str, key: &str, value: impl Into<StoreValue>) {
        self.sections
            .entry(namespace.to_owned())
            .or_default()
            .insert(key.to_owned(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.sections.values().all(BTreeMap::is_empty)
    }
}

impl ConfigStore for MemoryStore {
    fn get_int(&self, namespace: &str, key: &str, default: i64) -> i64 {
        self.get(namespace, key)
            .and_then(StoreValue::as_int)
            .unwrap_or(default)
    }

    fn get_string(&self, namespace: &str, key: &str, default: &str) -> String {
        self.get(namespace, key)
            .map_or_else(|| default.to_owned(), StoreValue::to_display_string)
    }

    fn set_int(&mut self, namespace: &str, key: &str, value: i64) {
        self.insert(namespace, key, value);
    }

    fn set_string(&mut self, namespace: &str, key: &str, value: &str) {
        self.insert(namespace, key, value);
    }

    fn has_section(&self, namespace: &str) -> bool {
        self.sections.get(namespace).is_some_and(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_returns_default() {
        let store = MemoryStore::new();
        assert_eq!(store.get_int("Sound Blaster 16", "irq", 5), 5);
        assert_eq!(
            store.get_string("Sound Blaster 16", "rom", "sb.rom"),
            "sb.rom"
        );
    }

    #[test]
    fn set_then_get() {
        let mut store = MemoryStore::new();
        store.set_int("dev", "irq", 7);
        store.set_string("dev", "rom", "a.bin");
        assert_eq!(store.get_int("dev", "irq", 5), 7);
        assert_eq!(store.get_string("dev", "rom", ""), "a.bin");
    }

    #[test]
    fn namespaces_are_isolated() {
        let mut store = MemoryStore::new();
        store.set_int("dev #1", "irq", 7);
        assert_eq!(store.get_int("dev #2", "irq", 5), 5);
        assert!(store.has_section("dev #1"));
        assert!(!store.has_section("dev #2"));
    }

    #[test]
    fn numeric_string_reads_as_int() {
        let mut store = MemoryStore::new();
        store.set_string("dev", "base", " 544 ");
        store.set_string("dev", "name", "abc");
        assert_eq!(store.get_int("dev", "base", 0), 544);
        assert_eq!(store.get_int("dev", "name", 3), 3);
    }

    #[test]
    fn int_reads_as_string() {
        let mut store = MemoryStore::new();
        store.set_int("dev", "irq", 7);
        assert_eq!(store.get_string("dev", "irq", ""), "7");
    }

    #[test]
    fn empty_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.set_int("dev", "irq", 7);
        assert!(!store.is_empty());
    }
}
