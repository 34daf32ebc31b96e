use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NestedMapError {
    #[error("Key '{0}' not found")]
    KeyNotFound(String),

    #[error("Entry '{0}' holds a leaf value and cannot be descended into")]
    NotAMap(String),
}

/// A single entry of a [`NestedMap`]: either a leaf value or a subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NestedValue<V> {
    Leaf(V),
    Map(NestedMap<V>),
}

impl<V> NestedValue<V> {
    pub fn as_leaf(&self) -> Option<&V> {
        match self {
            NestedValue::Leaf(value) => Some(value),
            NestedValue::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&NestedMap<V>> {
        match self {
            NestedValue::Leaf(_) => None,
            NestedValue::Map(map) => Some(map),
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, NestedValue::Map(_))
    }
}

/// A tree of mappings addressed by dot-delimited compound keys.
///
/// Each node owns a mapping from path segment to either a leaf value or a
/// child node, so a compound key like `"sampler.proposal.tau"` descends one
/// segment per level. Intermediate nodes are created on demand: looking up a
/// missing key through [`NestedMap::get`] stores and returns an empty
/// subtree rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NestedMap<V> {
    entries: HashMap<String, NestedValue<V>>,
}

fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (key, None),
    }
}

impl<V> NestedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Resolves `key`, creating an empty subtree at the addressed slot (and
    /// at any missing intermediate level) if nothing is stored there yet.
    ///
    /// Descending through an existing leaf is an error: a compound key
    /// requires every prefix segment to resolve to a map node.
    pub fn get(&mut self, key: &str) -> Result<&mut NestedValue<V>, NestedMapError> {
        let (head, rest) = split_key(key);
        let entry = self
            .entries
            .entry(head.to_string())
            .or_insert_with(|| NestedValue::Map(NestedMap::new()));
        match rest {
            None => Ok(entry),
            Some(rest) => match entry {
                NestedValue::Map(map) => map.get(rest),
                NestedValue::Leaf(_) => Err(NestedMapError::NotAMap(head.to_string())),
            },
        }
    }

    /// Non-creating traversal. Returns `None` if any segment of `key` is
    /// absent.
    pub fn lookup(&self, key: &str) -> Option<&NestedValue<V>> {
        let (head, rest) = split_key(key);
        let entry = self.entries.get(head)?;
        match rest {
            None => Some(entry),
            Some(rest) => entry.as_map()?.lookup(rest),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Stores a leaf value at `key`, overwriting whatever was there before,
    /// including an entire subtree. Missing intermediate levels are created.
    pub fn set(&mut self, key: &str, value: V) -> Result<(), NestedMapError> {
        let (head, rest) = split_key(key);
        match rest {
            None => {
                self.entries
                    .insert(head.to_string(), NestedValue::Leaf(value));
                Ok(())
            }
            Some(rest) => {
                let entry = self
                    .entries
                    .entry(head.to_string())
                    .or_insert_with(|| NestedValue::Map(NestedMap::new()));
                match entry {
                    NestedValue::Map(map) => map.set(rest, value),
                    NestedValue::Leaf(_) => Err(NestedMapError::NotAMap(head.to_string())),
                }
            }
        }
    }

    /// Removes and returns the entry at `key`.
    ///
    /// Resolution is non-creating: a missing segment anywhere along the path
    /// is [`NestedMapError::KeyNotFound`].
    pub fn remove(&mut self, key: &str) -> Result<NestedValue<V>, NestedMapError> {
        let (head, rest) = split_key(key);
        match rest {
            None => self
                .entries
                .remove(head)
                .ok_or_else(|| NestedMapError::KeyNotFound(head.to_string())),
            Some(rest) => match self.entries.get_mut(head) {
                None => Err(NestedMapError::KeyNotFound(head.to_string())),
                Some(NestedValue::Map(map)) => map.remove(rest),
                Some(NestedValue::Leaf(_)) => Err(NestedMapError::NotAMap(head.to_string())),
            },
        }
    }

    /// Merges `other` into `self`, one top-level segment at a time.
    ///
    /// Subtree values merge recursively into the existing node under the
    /// same segment (a leaf in the way is replaced by an empty node first);
    /// leaf values overwrite directly. Sibling entries of a merged subtree
    /// are left untouched.
    pub fn update(&mut self, other: NestedMap<V>) {
        for (key, value) in other.entries {
            match value {
                NestedValue::Map(child) => {
                    let slot = self
                        .entries
                        .entry(key)
                        .or_insert_with(|| NestedValue::Map(NestedMap::new()));
                    if let NestedValue::Leaf(_) = slot {
                        *slot = NestedValue::Map(NestedMap::new());
                    }
                    if let NestedValue::Map(existing) = slot {
                        existing.update(child);
                    }
                }
                NestedValue::Leaf(value) => {
                    self.entries.insert(key, NestedValue::Leaf(value));
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NestedValue<V>)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<V> Default for NestedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(String, NestedValue<V>)> for NestedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, NestedValue<V>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<V> FromIterator<(String, V)> for NestedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key, NestedValue::Leaf(value)))
                .collect(),
        }
    }
}
