use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ScopeError {
    #[error("Scope exit for '{expected}' does not match the innermost scope '{found}'")]
    Mismatch { expected: String, found: String },

    #[error("Scope exit for '{0}' without a matching enter")]
    Empty(String),
}

/// A key local to the current scope.
///
/// Integer keys exist so a recorder can be indexed like a plain sequence at
/// the top level; inside a scope they are stringified and joined into the
/// dotted path like any other key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalKey {
    Index(usize),
    Name(String),
}

impl fmt::Display for LocalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalKey::Index(index) => write!(f, "{}", index),
            LocalKey::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for LocalKey {
    fn from(index: usize) -> Self {
        LocalKey::Index(index)
    }
}

impl From<&str> for LocalKey {
    fn from(name: &str) -> Self {
        LocalKey::Name(name.to_string())
    }
}

impl From<String> for LocalKey {
    fn from(name: String) -> Self {
        LocalKey::Name(name)
    }
}

/// Proof that a scope was entered, to be surrendered on exit.
///
/// Tokens are move-only, so a scope cannot be exited twice; exiting with the
/// wrong token is reported as [`ScopeError::Mismatch`].
#[must_use = "a scope stays open until its token is passed back to exit_scope"]
#[derive(Debug)]
pub struct ScopeToken {
    label: String,
    depth: usize,
}

impl ScopeToken {
    pub(crate) fn new(label: String, depth: usize) -> Self {
        Self { label, depth }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }
}

/// The capability set instrumented code writes against: scoping, recording,
/// and vivifying reads.
///
/// Call sites take `&mut impl DebugSink<V>` and stay oblivious to whether
/// anything is listening; pass a
/// [`DebugRecorder`](super::recorder::DebugRecorder) to capture values or a
/// [`NullSink`] to discard them.
pub trait DebugSink<V>: Sized {
    /// Pushes `label` onto the scope stack.
    fn enter_scope(&mut self, label: &str) -> ScopeToken;

    /// Pops the innermost scope. The pop happens unconditionally; the token
    /// check runs afterwards so a mismatch still leaves the stack one level
    /// shorter.
    fn exit_scope(&mut self, token: ScopeToken) -> Result<(), ScopeError>;

    /// Records a detached copy of `value` under `key` resolved against the
    /// current scope.
    fn record(&mut self, key: impl Into<LocalKey>, value: &V);

    /// Records `value` under the current scope path itself (no extra key)
    /// and hands it back unchanged.
    fn result(&mut self, value: V) -> V;

    /// Returns the nested sink stored under `key`, creating an empty one if
    /// nothing is recorded there yet.
    fn child(&mut self, key: impl Into<LocalKey>) -> &mut Self;

    /// Runs `f` inside scope `label`, restoring the surrounding scope
    /// afterwards.
    fn scoped<R>(&mut self, label: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        let token = self.enter_scope(label);
        let out = f(self);
        self.exit_scope(token)
            .expect("scoped closure left the scope stack unbalanced");
        out
    }
}

/// A sink that accepts every write and records nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullSink;

impl NullSink {
    pub fn new() -> Self {
        Self
    }
}

impl<V> DebugSink<V> for NullSink {
    fn enter_scope(&mut self, label: &str) -> ScopeToken {
        ScopeToken::new(label.to_string(), 0)
    }

    fn exit_scope(&mut self, _token: ScopeToken) -> Result<(), ScopeError> {
        Ok(())
    }

    fn record(&mut self, _key: impl Into<LocalKey>, _value: &V) {}

    fn result(&mut self, value: V) -> V {
        value
    }

    fn child(&mut self, _key: impl Into<LocalKey>) -> &mut Self {
        self
    }
}
