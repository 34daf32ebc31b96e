//! # Debug Module
//!
//! This module provides scoped recording of intermediate values for
//! introspecting sampling and optimization runs.
//!
//! ## Overview
//!
//! An algorithm under study records the quantities it computes along the way
//! (local energies, per-subnet activations, acceptance ratios) under
//! hierarchical dotted paths such as `"step.proposal.local_energy"`. The
//! path prefix is managed by a scope stack, so deeply nested code only ever
//! names its local keys and the surrounding scopes compose the full path.
//!
//! ## Architecture
//!
//! Recording is an injected capability rather than a global switch:
//!
//! - **Boundary Contract** ([`snapshot`]) - The `Snapshot` trait produces a
//!   detached, host-resident copy of a value before it is stored.
//! - **Capability Interface** ([`sink`]) - The `DebugSink` trait covers
//!   scoping, writes, and vivifying reads; `NullSink` discards every write
//!   so instrumented code runs unchanged when recording is disabled.
//! - **Recording Store** ([`recorder`]) - `DebugRecorder` accumulates
//!   entries in a backing map keyed by resolved paths, guarded by move-only
//!   scope tokens.

pub mod recorder;
pub mod sink;
pub mod snapshot;
