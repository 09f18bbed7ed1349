//! # ec-calc
//!
//! Pairwise-correlator aggregation engine for EncStat.
//!
//! Takes jet + constituent-pair observations and accumulates
//! energy-weighted pair-distance and spin-relative angle distributions
//! into a multi-dimensional set of bins, with optional sub-binning by
//! jet pt, charge fraction, net charge, and beam spin pattern.
//!
//! ## Example
//!
//! ```no_run
//! use ec_calc::{EecCalculator, EecConfig};
//! use ec_core::types::{Constituent, Jet, SpinPattern};
//! # fn sink() -> ec_hist::HistogramSet { unimplemented!() }
//!
//! let calc = EecCalculator::new(EecConfig {
//!     pt_ranges: vec![(5.0, 10.0), (10.0, 20.0)],
//!     do_spin_bins: true,
//!     ..EecConfig::default()
//! });
//!
//! let jet = Jet { pt: 12.0, eta: 0.2, phi: 1.0, cf: 0.4, charge: 1.0,
//!                 pattern: SpinPattern::from_code(0) };
//! let csts = (
//!     Constituent { z: 0.3, jt: 0.1, eta: 0.25, phi: 1.05 },
//!     Constituent { z: 0.2, jt: 0.1, eta: 0.15, phi: 0.95 },
//! );
//! let mut hists = sink();
//! calc.process(&jet, (&csts.0, &csts.1), 1.0, &mut hists).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod angles;
pub mod bins;
pub mod calculator;
pub mod consts;
pub mod indices;
pub mod kinematics;
pub mod observables;
pub mod shard;

pub use bins::{bin_edges, BinRegistry, Binning, Spacing};
pub use calculator::{EecCalculator, EecConfig};
pub use indices::{IndexResolver, SpinBlock};
pub use kinematics::FourMomentum;
pub use observables::{PairCalculator, WeightMode};
pub use shard::process_sharded;
