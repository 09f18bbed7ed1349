//! Core traits for EncStat
//!
//! The aggregation engine talks to histogram storage only through these
//! traits, so the numerically delicate calculation code does not depend
//! on any concrete accumulation backend.

use std::io::Write;

use crate::types::{BinIndex, PairObservables};
use crate::Result;

/// Accumulation sink - abstraction over histogram storage backends.
///
/// A sink owns a set of named, binned, weighted counters addressable by
/// [`BinIndex`]. Out-of-range values are the sink's concern; the engine
/// never inspects its internal representation.
pub trait AccumulationSink {
    /// Record one observation under the given index.
    fn fill(&mut self, index: BinIndex, obs: &PairObservables) -> Result<()>;

    /// Persist the accumulated contents to an opaque destination.
    fn export(&self, dest: &mut dyn Write) -> Result<()>;

    /// Backend name (e.g., "memory").
    fn name(&self) -> &str;
}

/// A sink whose contents can be combined bin-wise with another instance.
///
/// Merging must be commutative and associative so that sharded
/// accumulation is independent of shard count and batch boundaries.
pub trait MergeableSink: AccumulationSink + Sized {
    /// Fold another sink's contents into this one.
    fn merge(&mut self, other: Self) -> Result<()>;
}
