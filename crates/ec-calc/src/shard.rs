//! Sharded accumulation: disjoint observation batches processed into
//! independent sinks, then combined bin-wise.
//!
//! The merge is commutative and associative, so the result is
//! independent of shard count and batch boundaries (up to floating
//! summation order).

use ec_core::traits::MergeableSink;
use ec_core::types::Observation;
use ec_core::Result;
use rayon::prelude::*;

use crate::calculator::EecCalculator;

/// Process `observations` in parallel shards of at most `shard_len`
/// entries, each into its own fresh sink, and merge the results.
///
/// Any per-observation error aborts the whole batch, matching the
/// sequential engine's behavior.
pub fn process_sharded<S, F>(
    calc: &EecCalculator,
    observations: &[Observation],
    shard_len: usize,
    make_sink: F,
) -> Result<S>
where
    S: MergeableSink + Send,
    F: Fn() -> S + Sync,
{
    let shard_len = shard_len.max(1);
    let shards: Vec<S> = observations
        .par_chunks(shard_len)
        .map(|chunk| {
            let mut sink = make_sink();
            calc.process_all(chunk, &mut sink)?;
            Ok(sink)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut merged = make_sink();
    for shard in shards {
        merged.merge(shard)?;
    }
    Ok(merged)
}
