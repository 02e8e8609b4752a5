//! Read-once values.
//!
//! Once values live in a single bookkeeping entry (`prefix + "once"`) holding
//! an object. They are invisible to `get`, `count` and iteration and are
//! reached only through the accessors below. Reading with removal deletes the
//! entry, so a flash message set on one request is shown exactly once.
//!
//! A `Null` once value reads as absent and is never removed by a read. The
//! bucket keeps values in the order they were set.

use crate::view::SessionView;
use sessionview_core::{Map, Value};

fn empty_bucket() -> Value {
    Value::Object(Map::new())
}

impl SessionView {
    /// Store `value` under `key` until it is read once.
    ///
    /// Creates the once-bucket if needed. A bucket entry holding anything
    /// other than an object is replaced.
    pub fn once(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        self.store.write(|data| {
            let slot = data.entry_or_insert_with(&self.once_key, empty_bucket);
            if slot.as_object().is_none() {
                tracing::warn!(
                    found = slot.type_name(),
                    "once-bucket held a non-object value, replacing it"
                );
                *slot = empty_bucket();
            }
            if let Some(bucket) = slot.as_object_mut() {
                bucket.insert(key, value);
            }
        });
    }

    /// Read a once value, removing it if `remove` is set.
    ///
    /// Returns `default` when the key is absent or holds `Null`.
    pub fn take_once(&self, key: &str, default: impl Into<Value>, remove: bool) -> Value {
        let found = self.store.write(|data| {
            let bucket = data.get_mut(&self.once_key)?.as_object_mut()?;
            let value = bucket.get(key).filter(|v| !v.is_null())?.clone();
            if remove {
                bucket.shift_remove(key);
            }
            Some(value)
        });
        found.unwrap_or_else(|| default.into())
    }

    /// Read and remove a once value.
    pub fn get_once(&self, key: &str) -> Option<Value> {
        Some(self.take_once(key, Value::Null, true)).filter(|v| !v.is_null())
    }

    /// Read and remove a once value, or return `default`.
    pub fn get_once_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.take_once(key, default, true)
    }

    /// Read a once value without removing it.
    pub fn peek_once(&self, key: &str) -> Option<Value> {
        Some(self.take_once(key, Value::Null, false)).filter(|v| !v.is_null())
    }

    /// Copy of every once value, removing the bucket if `remove` is set.
    ///
    /// Returns an empty map when there is no bucket or the bucket entry is
    /// not an object; such an entry is left in place.
    pub fn take_all_once(&self, remove: bool) -> Map {
        self.store.write(|data| {
            if data.get(&self.once_key).and_then(Value::as_object).is_none() {
                return Map::new();
            }
            let bucket = if remove {
                data.remove(&self.once_key)
            } else {
                data.get(&self.once_key).cloned()
            };
            match bucket {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            }
        })
    }

    /// Read and remove every once value.
    pub fn get_all_once(&self) -> Map {
        self.take_all_once(true)
    }

    /// Read every once value without removing any.
    pub fn peek_all_once(&self) -> Map {
        self.take_all_once(false)
    }
}
