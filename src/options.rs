//! Label dictionaries for enumerated fields.
//!
//! The form layer shows enumerated values as named choices. A decoded value
//! without a label is not an error: [`OptionLookup::Unrecognized`] hands the
//! raw number back so the caller can show it as-is.

use rustc_hash::FxHasher;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smol_str::SmolStr;
use std::fmt;
use std::hash::BuildHasherDefault;

pub type FastMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FxHasher>>;

// ─── Lookup ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionLookup<'a> {
    Known(&'a str),
    Unrecognized(u64),
}

impl OptionLookup<'_> {
    #[inline]
    pub fn is_known(&self) -> bool {
        matches!(self, OptionLookup::Known(_))
    }

    /// Label, or the raw value in hex.
    pub fn display(&self) -> String {
        match self {
            OptionLookup::Known(label) => (*label).to_string(),
            OptionLookup::Unrecognized(raw) => format!("{raw:#x}"),
        }
    }
}

// ─── OptionTable ────────────────────────────────────────────────────────────

/// Ordered label → value dictionary with reverse lookup.
///
/// When two labels share a value, lookup reports the first one inserted.
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    entries: Vec<(SmolStr, u64)>,
    by_value: FastMap<u64, usize>,
    by_label: FastMap<SmolStr, usize>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a label. Overwriting keeps the label's position.
    pub fn insert(&mut self, label: impl Into<SmolStr>, value: u64) {
        let label = label.into();
        if let Some(&idx) = self.by_label.get(&label) {
            self.entries[idx].1 = value;
            self.reindex_values();
            return;
        }
        let idx = self.entries.len();
        self.by_value.entry(value).or_insert(idx);
        self.by_label.insert(label.clone(), idx);
        self.entries.push((label, value));
    }

    fn reindex_values(&mut self) {
        self.by_value.clear();
        for (idx, (_, value)) in self.entries.iter().enumerate() {
            self.by_value.entry(*value).or_insert(idx);
        }
    }

    pub fn lookup(&self, raw: u64) -> OptionLookup<'_> {
        match self.by_value.get(&raw) {
            Some(&idx) => OptionLookup::Known(self.entries[idx].0.as_str()),
            None => OptionLookup::Unrecognized(raw),
        }
    }

    /// Position of the matching choice, for selecting it in a list widget.
    pub fn position(&self, raw: u64) -> Option<usize> {
        self.by_value.get(&raw).copied()
    }

    pub fn value_of(&self, label: &str) -> Option<u64> {
        self.by_label.get(label).map(|&idx| self.entries[idx].1)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), *value))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: Into<SmolStr>> FromIterator<(L, u64)> for OptionTable {
    fn from_iter<I: IntoIterator<Item = (L, u64)>>(iter: I) -> Self {
        let mut table = OptionTable::new();
        for (label, value) in iter {
            table.insert(label, value);
        }
        table
    }
}

// ─── Serde (JSON object, order preserved) ──────────────────────────────────

impl Serialize for OptionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

struct OptionTableVisitor;

impl<'de> Visitor<'de> for OptionTableVisitor {
    type Value = OptionTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of option labels to unsigned integers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = OptionTable::new();
        while let Some((label, value)) = access.next_entry::<SmolStr, u64>()? {
            table.insert(label, value);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for OptionTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OptionTableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_difficulty() -> OptionTable {
        [("Amateur", 0), ("Normal", 1), ("Veteran", 2), ("Professional", 3)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_lookup_known_and_unrecognized() {
        let table = make_difficulty();
        assert_eq!(table.lookup(2), OptionLookup::Known("Veteran"));
        assert_eq!(table.lookup(9), OptionLookup::Unrecognized(9));
        assert!(!table.lookup(9).is_known());
        assert_eq!(table.lookup(0x1F).display(), "0x1f");
        assert_eq!(table.lookup(3).display(), "Professional");
    }

    #[test]
    fn test_value_of_and_position() {
        let table = make_difficulty();
        assert_eq!(table.value_of("Normal"), Some(1));
        assert_eq!(table.value_of("Nightmare"), None);
        assert_eq!(table.position(3), Some(3));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_duplicate_value_reports_first_label() {
        let table: OptionTable = [("Default", 0), ("None", 0), ("Retro", 2)].into_iter().collect();
        assert_eq!(table.lookup(0), OptionLookup::Known("Default"));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut table = make_difficulty();
        table.insert("Normal", 7);
        assert_eq!(table.labels().collect::<Vec<_>>()[1], "Normal");
        assert_eq!(table.lookup(7), OptionLookup::Known("Normal"));
        assert_eq!(table.lookup(1), OptionLookup::Unrecognized(1));
    }

    #[test]
    fn test_json_preserves_order() {
        let json = r#"{"BSAA": 0, "Warrior": 12884901888, "Clubbin'": 1}"#;
        let table: OptionTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.labels().collect::<Vec<_>>(), ["BSAA", "Warrior", "Clubbin'"]);
        assert_eq!(table.value_of("Warrior"), Some(0x3_0000_0000));

        let back = serde_json::to_string(&table).unwrap();
        assert_eq!(back, r#"{"BSAA":0,"Warrior":12884901888,"Clubbin'":1}"#);
    }

    #[test]
    fn test_json_rejects_negative() {
        assert!(serde_json::from_str::<OptionTable>(r#"{"x": -1}"#).is_err());
    }
}
