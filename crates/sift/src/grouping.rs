//! Insertion-ordered map from field values to aggregates.
//!
//! [`Groups`] is what `groupby` and `count_values` return: keys come out in
//! the order their value first appeared in the source.

use std::collections::HashMap;
use std::ops::Index;

use crate::value::Value;

/// Ordered `Value -> V` map.
///
/// Entries live in a vector in first-insertion order; a hash index maps
/// each key to its slot.
#[derive(Debug, Clone)]
pub struct Groups<V> {
    entries: Vec<(Value, V)>,
    index: HashMap<Value, usize>,
}

impl<V> Groups<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Groups {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the slot for `key`, inserting `default()` at the end if the
    /// key is new.
    pub fn get_or_insert_with(&mut self, key: Value, default: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    /// Looks up the aggregate for a key.
    pub fn get(&self, key: impl Into<Value>) -> Option<&V> {
        let key = key.into();
        self.index.get(&key).map(|&slot| &self.entries[slot].1)
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, key: impl Into<Value>) -> bool {
        self.index.contains_key(&key.into())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Aggregates in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Key/aggregate pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }
}

impl<V> Default for Groups<V> {
    fn default() -> Self {
        Groups::new()
    }
}

/// Equal when the same keys map to equal aggregates in the same order.
impl<V: PartialEq> PartialEq for Groups<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V> Index<&Value> for Groups<V> {
    type Output = V;

    /// Panics if the key is absent, like `HashMap`'s index.
    fn index(&self, key: &Value) -> &V {
        match self.index.get(key) {
            Some(&slot) => &self.entries[slot].1,
            None => panic!("no group for key {key}"),
        }
    }
}

impl<V> IntoIterator for Groups<V> {
    type Item = (Value, V);
    type IntoIter = std::vec::IntoIter<(Value, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V> FromIterator<(Value, V)> for Groups<V> {
    /// Later duplicates of a key overwrite the aggregate but keep its slot.
    fn from_iter<T: IntoIterator<Item = (Value, V)>>(iter: T) -> Self {
        let mut groups = Groups::new();
        for (key, value) in iter {
            match groups.index.get(&key) {
                Some(&slot) => groups.entries[slot].1 = value,
                None => {
                    groups.index.insert(key.clone(), groups.entries.len());
                    groups.entries.push((key, value));
                }
            }
        }
        groups
    }
}
