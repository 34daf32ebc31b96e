use super::sink::{DebugSink, LocalKey, ScopeError, ScopeToken};
use super::snapshot::Snapshot;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// A fully resolved key in the backing map.
///
/// Integer keys survive unchanged only when recorded at the top level with
/// an empty scope stack; everything else is a dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Index(usize),
    Path(String),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Index(index) => write!(f, "{}", index),
            RecordKey::Path(path) => f.write_str(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry<V> {
    Value(V),
    Node(DebugRecorder<V>),
}

impl<V> Entry<V> {
    pub fn as_value(&self) -> Option<&V> {
        match self {
            Entry::Value(value) => Some(value),
            Entry::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&DebugRecorder<V>> {
        match self {
            Entry::Value(_) => None,
            Entry::Node(node) => Some(node),
        }
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            Entry::Value(value) => Some(value),
            Entry::Node(_) => None,
        }
    }
}

/// A path-scoped recording sink.
///
/// Values are stored in a single backing map under keys composed from the
/// currently active scope labels, so a recorder threaded through a nested
/// computation accumulates a flat, dotted-path view of everything recorded.
/// A recorder lives for one introspected call: create it, thread it through,
/// read the entries of interest, drop it.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugRecorder<V> {
    entries: HashMap<RecordKey, Entry<V>>,
    scope: Vec<String>,
}

impl<V> DebugRecorder<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            scope: Vec::new(),
        }
    }

    /// Number of active scope levels.
    pub fn depth(&self) -> usize {
        self.scope.len()
    }

    /// Number of entries in the backing map, nested nodes counted as one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &Entry<V>)> {
        self.entries.iter()
    }

    fn resolve(&self, key: &LocalKey) -> RecordKey {
        match key {
            LocalKey::Index(index) if self.scope.is_empty() => RecordKey::Index(*index),
            key => {
                let mut path = self.scope.join(".");
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(&key.to_string());
                RecordKey::Path(path)
            }
        }
    }

    /// Non-vivifying lookup of `key` resolved against the current scope.
    pub fn get(&self, key: impl Into<LocalKey>) -> Option<&Entry<V>> {
        self.entries.get(&self.resolve(&key.into()))
    }

    /// Removes and returns the entry at `key`, typically to extract the
    /// final result once the instrumented call has finished.
    pub fn take(&mut self, key: impl Into<LocalKey>) -> Option<Entry<V>> {
        let key = self.resolve(&key.into());
        self.entries.remove(&key)
    }
}

impl<V> Default for DebugRecorder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Snapshot> DebugSink<V> for DebugRecorder<V> {
    fn enter_scope(&mut self, label: &str) -> ScopeToken {
        self.scope.push(label.to_string());
        ScopeToken::new(label.to_string(), self.scope.len())
    }

    fn exit_scope(&mut self, token: ScopeToken) -> Result<(), ScopeError> {
        let depth = self.scope.len();
        match self.scope.pop() {
            None => Err(ScopeError::Empty(token.label().to_string())),
            Some(found) if found == token.label() && depth == token.depth() => Ok(()),
            Some(found) => Err(ScopeError::Mismatch {
                expected: token.label().to_string(),
                found,
            }),
        }
    }

    fn record(&mut self, key: impl Into<LocalKey>, value: &V) {
        let key = self.resolve(&key.into());
        trace!(key = %key, "recorded debug value");
        self.entries.insert(key, Entry::Value(value.snapshot()));
    }

    fn result(&mut self, value: V) -> V {
        let key = RecordKey::Path(self.scope.join("."));
        self.entries.insert(key, Entry::Value(value.snapshot()));
        value
    }

    fn child(&mut self, key: impl Into<LocalKey>) -> &mut Self {
        let key = self.resolve(&key.into());
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Entry::Node(DebugRecorder::new()));
        match entry {
            Entry::Node(node) => node,
            Entry::Value(_) => panic!("a leaf value is already recorded under '{}'", key),
        }
    }
}

/// Runs `f` against a fresh recorder and extracts the entry it recorded
/// under `label`.
///
/// This is the one-shot introspection pattern: instrument a function to
/// accept a sink, then capture a single labeled quantity from one call
/// without keeping the recorder around.
pub fn capture<V, R>(label: &str, f: impl FnOnce(&mut DebugRecorder<V>) -> R) -> Option<Entry<V>>
where
    V: Snapshot,
{
    let mut recorder = DebugRecorder::new();
    f(&mut recorder);
    recorder.take(label)
}
