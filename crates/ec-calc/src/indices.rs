//! Histogram-index fan-out per jet.
//!
//! One observation updates several aggregation slots at once: the
//! always-present integrated views plus any sub-binned views the jet
//! falls into. The resolver returns the full set as structured blocks,
//! one per realized spin state, so consumers iterate by block instead
//! of by positional offsets.

use ec_core::types::{AxisBin, BinIndex, Jet, SpinBin};

/// One spin state's worth of histogram indices, in the fixed order
/// [fully-integrated, pt-binned, charge-binned, fully-binned]
/// (charge fraction is binned in all four).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinBlock {
    /// The spin state all four indices share.
    pub spin: SpinBin,
    /// The four pt/charge combinations.
    pub indices: [BinIndex; 4],
}

/// Resolves which aggregation slots a jet's observations update.
///
/// An axis with an empty range list is disabled and stays integrated.
/// Ranges are half-open `[low, high)` and scanned in order, first match
/// wins. The charge-fraction axis has no integrated state: a jet whose
/// `cf` matches no configured range is kept in bin 0 (and logged) so
/// that no observation is silently dropped.
#[derive(Debug, Clone, Default)]
pub struct IndexResolver {
    pt_ranges: Vec<(f64, f64)>,
    cf_ranges: Vec<(f64, f64)>,
    charge_ranges: Vec<(f64, f64)>,
    do_spin: bool,
}

impl IndexResolver {
    /// Resolver over the given sub-binning ranges.
    pub fn new(
        pt_ranges: Vec<(f64, f64)>,
        cf_ranges: Vec<(f64, f64)>,
        charge_ranges: Vec<(f64, f64)>,
        do_spin: bool,
    ) -> Self {
        Self {
            pt_ranges,
            cf_ranges,
            charge_ranges,
            do_spin,
        }
    }

    /// First half-open range containing `value`.
    fn find_range(ranges: &[(f64, f64)], value: f64) -> Option<usize> {
        ranges
            .iter()
            .position(|&(low, high)| value >= low && value < high)
    }

    /// Spin states realized by a jet's pattern, in the contractual
    /// order [integrated, blue, yellow, combined].
    fn spin_states(&self, jet: &Jet) -> Vec<SpinBin> {
        let mut states = vec![SpinBin::Integrated];
        if !self.do_spin {
            return states;
        }
        match (jet.pattern.blue(), jet.pattern.yellow()) {
            (Some(blue), Some(yellow)) => {
                states.push(SpinBin::blue(blue));
                states.push(SpinBin::yellow(yellow));
                states.push(SpinBin::combined(blue, yellow));
            }
            (Some(blue), None) => states.push(SpinBin::blue(blue)),
            (None, Some(yellow)) => states.push(SpinBin::yellow(yellow)),
            (None, None) => {}
        }
        states
    }

    /// All aggregation slots this jet updates: one block of four
    /// indices per realized spin state (so 4, 8, or 16 indices total).
    pub fn resolve(&self, jet: &Jet) -> Vec<SpinBlock> {
        let pt = match Self::find_range(&self.pt_ranges, jet.pt) {
            Some(i) => AxisBin::Bin(i),
            None => AxisBin::Integrated,
        };
        let charge = match Self::find_range(&self.charge_ranges, jet.charge) {
            Some(i) => AxisBin::Bin(i),
            None => AxisBin::Integrated,
        };
        let cf = if self.cf_ranges.is_empty() {
            AxisBin::Bin(0)
        } else {
            match Self::find_range(&self.cf_ranges, jet.cf) {
                Some(i) => AxisBin::Bin(i),
                None => {
                    log::warn!(
                        "jet charge fraction {} outside all configured ranges, keeping bin 0",
                        jet.cf
                    );
                    AxisBin::Bin(0)
                }
            }
        };

        self.spin_states(jet)
            .into_iter()
            .map(|spin| SpinBlock {
                spin,
                indices: [
                    BinIndex {
                        pt: AxisBin::Integrated,
                        cf,
                        charge: AxisBin::Integrated,
                        spin,
                    },
                    BinIndex {
                        pt,
                        cf,
                        charge: AxisBin::Integrated,
                        spin,
                    },
                    BinIndex {
                        pt: AxisBin::Integrated,
                        cf,
                        charge,
                        spin,
                    },
                    BinIndex {
                        pt,
                        cf,
                        charge,
                        spin,
                    },
                ],
            })
            .collect()
    }
}
