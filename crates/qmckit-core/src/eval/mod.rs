//! Batched evaluation of numerical functions over walker ensembles.
//!
//! Memory-bound quantities (wavefunction values over a large sample of
//! configurations) are evaluated in batches or axis-0 chunks and stitched
//! back together here. The module also carries the masked ensemble update
//! used by accept/reject steps and weighted statistics of sampled
//! quantities.

pub mod batch;
pub mod error;
pub mod stats;
