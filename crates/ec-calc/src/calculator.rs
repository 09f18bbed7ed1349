//! Orchestration: per-observation observables, index fan-out, and sink
//! fills.

use ec_core::traits::AccumulationSink;
use ec_core::types::{Constituent, Jet, Observation};
use ec_core::Result;
use serde::{Deserialize, Serialize};

use crate::indices::IndexResolver;
use crate::observables::{PairCalculator, WeightMode};

/// Engine configuration, fixed for the lifetime of a calculator.
///
/// Reconfiguring mid-stream is not supported: build a new calculator
/// (and a fresh sink) instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EecConfig {
    /// Observable entering the energy-sharing weight.
    pub weight_mode: WeightMode,
    /// Exponent applied to the weight ratio.
    pub weight_power: f64,
    /// Half-open jet-pt sub-binning ranges; empty disables the axis.
    pub pt_ranges: Vec<(f64, f64)>,
    /// Half-open charge-fraction ranges; empty disables the axis.
    pub cf_ranges: Vec<(f64, f64)>,
    /// Half-open net-charge ranges; empty disables the axis.
    pub charge_ranges: Vec<(f64, f64)>,
    /// Whether to fan out over realized spin states.
    pub do_spin_bins: bool,
    /// Whether observations are aggregated at all; when false the
    /// engine computes observables but fills nothing.
    pub do_eec: bool,
}

impl Default for EecConfig {
    fn default() -> Self {
        Self {
            weight_mode: WeightMode::default(),
            weight_power: 1.0,
            pt_ranges: Vec::new(),
            cf_ranges: Vec::new(),
            charge_ranges: Vec::new(),
            do_spin_bins: false,
            do_eec: true,
        }
    }
}

/// Two-point correlator aggregation engine.
///
/// Pure orchestration: builds the observable bundle, resolves the
/// index fan-out, and forwards every (index, bundle) pair to the sink.
/// Errors from collaborators propagate unmasked; a silently dropped
/// observation would corrupt the aggregate statistics undetectably.
#[derive(Debug, Clone)]
pub struct EecCalculator {
    pair: PairCalculator,
    resolver: IndexResolver,
    do_eec: bool,
}

impl EecCalculator {
    /// Build an engine from a configuration, consuming it.
    pub fn new(config: EecConfig) -> Self {
        let pair = PairCalculator::new(config.weight_mode, config.weight_power);
        let resolver = IndexResolver::new(
            config.pt_ranges,
            config.cf_ranges,
            config.charge_ranges,
            config.do_spin_bins,
        );
        Self {
            pair,
            resolver,
            do_eec: config.do_eec,
        }
    }

    /// The pair-observable calculator this engine uses.
    pub fn pair_calculator(&self) -> &PairCalculator {
        &self.pair
    }

    /// The index resolver this engine uses.
    pub fn resolver(&self) -> &IndexResolver {
        &self.resolver
    }

    /// Process one observation: compute observables, resolve indices,
    /// and fill the sink once per index.
    pub fn process(
        &self,
        jet: &Jet,
        csts: (&Constituent, &Constituent),
        evt_weight: f64,
        sink: &mut dyn AccumulationSink,
    ) -> Result<()> {
        let obs = self.pair.observables(jet, csts, evt_weight)?;
        if !self.do_eec {
            return Ok(());
        }
        for block in self.resolver.resolve(jet) {
            for index in block.indices {
                sink.fill(index, &obs)?;
            }
        }
        Ok(())
    }

    /// Process a batch of observations strictly in order.
    pub fn process_all(
        &self,
        observations: &[Observation],
        sink: &mut dyn AccumulationSink,
    ) -> Result<()> {
        for obs in observations {
            self.process(&obs.jet, (&obs.csts.0, &obs.csts.1), obs.weight, sink)?;
        }
        Ok(())
    }
}
