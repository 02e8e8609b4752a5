//! Insertion-ordered session entries
//!
//! Host session stores behave like ordered associative arrays: iteration
//! follows insertion order, overwriting a key keeps its position, and a key
//! that is removed and re-inserted moves to the end.
//!
//! # Design
//!
//! - FxHashMap: O(1) key lookups, fast non-crypto hash
//! - BTreeMap<seq, key>: insertion order, resumable range scans
//! - Monotonic sequence counter: one slot per insert of a new key

use rustc_hash::FxHashMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sessionview_core::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

/// A stored value and its insertion sequence number.
#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    value: Value,
}

/// Ordered map of session keys to values.
///
/// # Example
///
/// ```
/// use sessionview_storage::SessionData;
///
/// let mut data = SessionData::new();
/// data.insert("b", 1i64);
/// data.insert("a", 2i64);
/// let keys: Vec<_> = data.keys().collect();
/// assert_eq!(keys, ["b", "a"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    slots: FxHashMap<String, Slot>,
    order: BTreeMap<u64, String>,
    next_seq: u64,
}

impl SessionData {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, internal keys included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get a value by key
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.slots.get(key).map(|slot| &slot.value)
    }

    /// Get a mutable reference to a value by key
    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.slots.get_mut(key).map(|slot| &mut slot.value)
    }

    /// Check if a key is present (a stored `Null` counts as present)
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Insert a value, returning the previous one.
    ///
    /// An existing key keeps its position in iteration order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.slots.get_mut(&key) {
            return Some(std::mem::replace(&mut slot.value, value));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, key.clone());
        self.slots.insert(key, Slot { seq, value });
        None
    }

    /// Get the value at `key`, inserting the result of `default` first if absent.
    pub fn entry_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> Value,
    ) -> &mut Value {
        let order = &mut self.order;
        let next_seq = &mut self.next_seq;
        let slot = self.slots.entry(key.to_string()).or_insert_with(|| {
            let seq = *next_seq;
            *next_seq += 1;
            order.insert(seq, key.to_string());
            Slot {
                seq,
                value: default(),
            }
        });
        &mut slot.value
    }

    /// Remove a key, returning its value if it existed
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let slot = self.slots.remove(key)?;
        self.order.remove(&slot.seq);
        Some(slot.value)
    }

    /// Keep only the entries for which `keep` returns true.
    ///
    /// Returns the number of removed entries.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Value) -> bool) -> usize {
        let doomed: Vec<String> = self
            .iter()
            .filter(|(k, v)| !keep(*k, *v))
            .map(|(k, _)| k.to_string())
            .collect();
        for key in &doomed {
            self.remove(key);
        }
        doomed.len()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.order.values().filter_map(move |key| {
            self.slots
                .get(key)
                .map(|slot| (key.as_str(), &slot.value))
        })
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.values().map(String::as_str)
    }

    /// Position one past the newest entry.
    ///
    /// Entries inserted later (including a removed key inserted again) land
    /// at or beyond it.
    pub fn end(&self) -> Position {
        Position(self.next_seq)
    }

    /// Find the first entry after `cursor` (exclusive) and before `end`
    /// (exclusive) that satisfies `pred`.
    ///
    /// Returns the entry's position together with the entry so a caller can
    /// resume the scan later, even if the map was modified in between.
    pub fn next_after(
        &self,
        cursor: Option<Position>,
        end: Position,
        mut pred: impl FnMut(&str) -> bool,
    ) -> Option<(Position, &str, &Value)> {
        let lower = match cursor {
            Some(Position(seq)) => Bound::Excluded(seq),
            None => Bound::Unbounded,
        };
        if matches!(cursor, Some(pos) if pos >= end) {
            return None;
        }
        self.order
            .range((lower, Bound::Excluded(end.0)))
            .filter(|(_, key)| pred(key.as_str()))
            .find_map(|(seq, key)| {
                self.slots
                    .get(key)
                    .map(|slot| (Position(*seq), key.as_str(), &slot.value))
            })
    }
}

/// Opaque iteration position inside a [`SessionData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position(u64);

impl PartialEq for SessionData {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SessionData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = SessionData::new();
        data.extend(iter);
        data
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for SessionData {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

// ============================================================================
// Serialization (ordered map)
// ============================================================================

impl Serialize for SessionData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SessionData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DataVisitor;

        impl<'de> Visitor<'de> for DataVisitor {
            type Value = SessionData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of session keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SessionData, A::Error> {
                let mut data = SessionData::new();
                while let Some((k, v)) = access.next_entry::<String, Value>()? {
                    data.insert(k, v);
                }
                Ok(data)
            }
        }

        deserializer.deserialize_map(DataVisitor)
    }
}
