//! # ec-hist
//!
//! In-memory weighted histograms and the accumulation sink for EncStat.
//!
//! The aggregation engine in `ec-calc` addresses storage only through
//! the `ec-core` sink traits; this crate provides the concrete backend:
//! a weighted 1D [`Histogram`] primitive and a [`HistogramSet`] holding
//! one group of histograms per filled bin index, with bin-wise merge
//! for sharded accumulation and JSON export.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod histogram;
pub mod set;

pub use histogram::{variance_from_error, Histogram};
pub use set::{HistGroup, HistogramSet, SetConfig};
