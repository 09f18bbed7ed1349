//! Bin-edge generation and the named-binning registry.

use std::collections::HashMap;

use ec_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::consts::LOG_BASE;

/// Edge spacing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spacing {
    /// Uniform steps in the variable itself.
    Linear,
    /// Uniform steps in `log_base` of the variable.
    Log,
}

/// Logarithm in the configured base ([`LOG_BASE`]).
pub fn log_base(arg: f64) -> f64 {
    arg.log10() / LOG_BASE.log10()
}

/// Inverse of [`log_base`].
pub fn exp_base(arg: f64) -> f64 {
    LOG_BASE.powf(arg)
}

/// Walk `num` equal steps from `start` towards `stop`, collecting the
/// `num + 1` visited edges. The last edge is reached additively, so it
/// matches `stop` only up to accumulated rounding.
fn walk_edges(num: usize, start: f64, stop: f64) -> Vec<f64> {
    let step = (stop - start) / num as f64;
    let mut edges = Vec::with_capacity(num + 1);
    let mut edge = start;
    for _ in 0..num {
        edges.push(edge);
        edge += step;
    }
    edges.push(edge);
    edges
}

/// Divide `[start, stop]` into `num` bins and return the `num + 1`
/// edges, spaced linearly or logarithmically.
///
/// Fails with `InvalidRange` when `num == 0` or `start > stop`, and
/// with `Domain` when logarithmic spacing is requested for a
/// non-positive `start`.
pub fn bin_edges(num: usize, start: f64, stop: f64, spacing: Spacing) -> Result<Vec<f64>> {
    if num == 0 {
        return Err(Error::InvalidRange("bin count must be positive".into()));
    }
    if start > stop {
        return Err(Error::InvalidRange(format!(
            "bin range start {start} exceeds stop {stop}"
        )));
    }
    if spacing == Spacing::Log && start <= 0.0 {
        return Err(Error::Domain(format!(
            "logarithmic spacing requires start > 0, got {start}"
        )));
    }

    let edges = match spacing {
        Spacing::Linear => walk_edges(num, start, stop),
        Spacing::Log => walk_edges(num, log_base(start), log_base(stop))
            .into_iter()
            .map(exp_base)
            .collect(),
    };
    Ok(edges)
}

/// An immutable binning: resolved edges plus the uniform parameters
/// they were derived from (or that were derived from them).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binning {
    start: f64,
    stop: f64,
    num: usize,
    edges: Vec<f64>,
}

impl Binning {
    /// Uniform binning: `num` bins over `[start, stop]` in the given
    /// spacing.
    pub fn uniform(num: usize, start: f64, stop: f64, spacing: Spacing) -> Result<Self> {
        let edges = bin_edges(num, start, stop, spacing)?;
        Ok(Self {
            start,
            stop,
            num,
            edges,
        })
    }

    /// Binning from an explicit edge list; start/stop/count are derived.
    ///
    /// Requires at least two strictly increasing edges.
    pub fn from_edges(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::InvalidRange(format!(
                "explicit binning needs at least 2 edges, got {}",
                edges.len()
            )));
        }
        if !edges.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::InvalidRange(
                "explicit binning edges must be strictly increasing".into(),
            ));
        }
        Ok(Self {
            start: edges[0],
            stop: edges[edges.len() - 1],
            num: edges.len() - 1,
            edges,
        })
    }

    /// Infallible constructor for the statically valid registry seeds.
    fn seeded(num: usize, start: f64, stop: f64, spacing: Spacing) -> Self {
        let edges = match spacing {
            Spacing::Linear => walk_edges(num, start, stop),
            Spacing::Log => walk_edges(num, log_base(start), log_base(stop))
                .into_iter()
                .map(exp_base)
                .collect(),
        };
        Self {
            start,
            stop,
            num,
            edges,
        }
    }

    /// Lower edge of the first bin.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Upper edge of the last bin.
    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Number of bins.
    pub fn num(&self) -> usize {
        self.num
    }

    /// The resolved edge list (length `num + 1`).
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// The bins as half-open `(low, high)` ranges, as consumed by the
    /// index resolver.
    pub fn ranges(&self) -> Vec<(f64, f64)> {
        self.edges.windows(2).map(|w| (w[0], w[1])).collect()
    }
}

/// Named-binning registry.
///
/// Centralizes bin definitions for the quantities an analysis
/// histograms (R_L, energy, ...). An explicit value passed to
/// consumers; there is no process-wide table.
#[derive(Debug, Clone, Default)]
pub struct BinRegistry {
    bins: HashMap<String, Binning>,
}

impl BinRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the default analysis binnings:
    ///
    /// - `"energy"`: 202 linear bins over [-1, 100]
    /// - `"side"`: 75 logarithmic bins over [1e-5, 1]
    /// - `"logside"`: 75 linear bins over [-5, 0]
    pub fn with_defaults() -> Self {
        let mut bins = HashMap::new();
        bins.insert(
            "energy".to_string(),
            Binning::seeded(202, -1.0, 100.0, Spacing::Linear),
        );
        bins.insert(
            "side".to_string(),
            Binning::seeded(75, 1e-5, 1.0, Spacing::Log),
        );
        bins.insert(
            "logside".to_string(),
            Binning::seeded(75, -5.0, 0.0, Spacing::Linear),
        );
        Self { bins }
    }

    /// Insert a new binning; fails with `DuplicateName` if the name is
    /// already registered.
    pub fn add(&mut self, name: impl Into<String>, binning: Binning) -> Result<()> {
        let name = name.into();
        if self.bins.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        self.bins.insert(name, binning);
        Ok(())
    }

    /// Replace an existing binning; fails with `UnknownName` if absent.
    pub fn set(&mut self, name: &str, binning: Binning) -> Result<()> {
        match self.bins.get_mut(name) {
            Some(slot) => {
                *slot = binning;
                Ok(())
            }
            None => Err(Error::UnknownName(name.to_string())),
        }
    }

    /// Look up a binning by name; fails with `UnknownName` if absent.
    ///
    /// Returns a copy so callers cannot mutate the registry's edges.
    pub fn get(&self, name: &str) -> Result<Binning> {
        self.bins
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownName(name.to_string()))
    }

    /// Whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.bins.contains_key(name)
    }

    /// Number of registered binnings.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}
