//! Hierarchical mapping types for configuration and parameter trees.
//!
//! Research configurations are trees: an optimizer section, a sampler
//! section, per-subnet hyperparameters. This module provides [`NestedMap`],
//! a mapping addressed by dot-delimited compound keys (`"sampler.tau"`)
//! that owns its nesting structure explicitly, auto-creates intermediate
//! levels on access, and merges overlays recursively without destroying
//! sibling entries.

pub mod nested;
