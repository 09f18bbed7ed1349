//! # ec-core
//!
//! Shared types, errors, and sink traits for EncStat.
//!
//! This crate carries the data model (jets, constituents, spin
//! patterns, bin coordinates, per-pair observables), the workspace-wide
//! error enum, and the accumulation-sink traits that decouple the
//! aggregation engine from histogram storage.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{AccumulationSink, MergeableSink};
pub use types::{
    AxisBin, BinIndex, Constituent, Jet, Observation, PairObservables, Polarity, SpinBin,
    SpinPattern,
};
