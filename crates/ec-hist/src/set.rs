//! Per-index histogram groups implementing the accumulation sink.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use ec_core::traits::{AccumulationSink, MergeableSink};
use ec_core::types::{BinIndex, PairObservables};
use ec_core::{Error, Result};

use crate::histogram::Histogram;

/// Axis definitions for the histograms stored per index.
///
/// Edges are plain vectors so the set does not depend on any particular
/// binning registry; callers typically build them from named binnings.
#[derive(Debug, Clone)]
pub struct SetConfig {
    /// Edges for the pair-distance (R_L) axis.
    pub dist_edges: Vec<f64>,
    /// Edges for the base-10 log of the pair distance.
    pub log_dist_edges: Vec<f64>,
    /// Edges for the spin-relative angle axes, usually spanning [0, 2pi).
    pub angle_edges: Vec<f64>,
    /// Whether to book per-beam spin-angle histograms.
    pub do_spin_hists: bool,
}

/// Histograms accumulated for one bin index.
#[derive(Debug, Clone)]
pub struct HistGroup {
    /// Weighted pair-distance distribution.
    pub dist: Histogram,
    /// Weighted log10(pair-distance) distribution.
    pub log_dist: Histogram,
    /// Spin-relative angle against the blue beam, when spin histograms
    /// are booked.
    pub phi_blue: Option<Histogram>,
    /// Spin-relative angle against the yellow beam, when spin
    /// histograms are booked.
    pub phi_yellow: Option<Histogram>,
}

impl HistGroup {
    fn merge(&mut self, other: &HistGroup) -> Result<()> {
        self.dist.merge(&other.dist)?;
        self.log_dist.merge(&other.log_dist)?;
        merge_optional(&mut self.phi_blue, &other.phi_blue)?;
        merge_optional(&mut self.phi_yellow, &other.phi_yellow)?;
        Ok(())
    }
}

fn merge_optional(a: &mut Option<Histogram>, b: &Option<Histogram>) -> Result<()> {
    match (a, b) {
        (Some(ha), Some(hb)) => ha.merge(hb),
        (None, None) => Ok(()),
        _ => Err(Error::InvalidRange(
            "cannot merge histogram sets with different spin booking".into(),
        )),
    }
}

/// In-memory accumulation sink: one [`HistGroup`] per filled
/// [`BinIndex`], created lazily on first fill.
#[derive(Debug, Clone)]
pub struct HistogramSet {
    config: SetConfig,
    groups: HashMap<BinIndex, HistGroup>,
}

impl HistogramSet {
    /// Create an empty set booking histograms per the given config.
    pub fn new(config: SetConfig) -> Self {
        Self {
            config,
            groups: HashMap::new(),
        }
    }

    /// Group accumulated under an index, if it has been filled.
    pub fn group(&self, index: &BinIndex) -> Option<&HistGroup> {
        self.groups.get(index)
    }

    /// Number of distinct indices filled so far.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether nothing has been filled yet.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All histograms keyed by name, in stable (sorted) order.
    pub fn by_name(&self) -> BTreeMap<String, &Histogram> {
        let mut out = BTreeMap::new();
        for group in self.groups.values() {
            out.insert(group.dist.name.clone(), &group.dist);
            out.insert(group.log_dist.name.clone(), &group.log_dist);
            if let Some(h) = &group.phi_blue {
                out.insert(h.name.clone(), h);
            }
            if let Some(h) = &group.phi_yellow {
                out.insert(h.name.clone(), h);
            }
        }
        out
    }

}

fn book_group(config: &SetConfig, index: &BinIndex) -> Result<HistGroup> {
    let dist = Histogram::new(slot_name("Rl", index), config.dist_edges.clone())?;
    let log_dist = Histogram::new(slot_name("LogRl", index), config.log_dist_edges.clone())?;
    let (phi_blue, phi_yellow) = if config.do_spin_hists {
        (
            Some(Histogram::new(slot_name("PhiBlue", index), config.angle_edges.clone())?),
            Some(Histogram::new(slot_name("PhiYellow", index), config.angle_edges.clone())?),
        )
    } else {
        (None, None)
    };
    Ok(HistGroup {
        dist,
        log_dist,
        phi_blue,
        phi_yellow,
    })
}

/// Histogram name for one observable slot of one index.
fn slot_name(kind: &str, index: &BinIndex) -> String {
    format!(
        "hEec{kind}_pt{}_cf{}_ch{}_sp{}",
        index.pt, index.cf, index.charge, index.spin
    )
}

impl AccumulationSink for HistogramSet {
    fn fill(&mut self, index: BinIndex, obs: &PairObservables) -> Result<()> {
        let group = match self.groups.entry(index) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(book_group(&self.config, &index)?),
        };

        group.dist.fill(obs.dist, obs.weight);
        group.log_dist.fill(obs.dist.log10(), obs.weight);
        if let (Some(h), Some(phi)) = (group.phi_blue.as_mut(), obs.phi_blue) {
            h.fill(phi, obs.weight);
        }
        if let (Some(h), Some(phi)) = (group.phi_yellow.as_mut(), obs.phi_yellow) {
            h.fill(phi, obs.weight);
        }
        Ok(())
    }

    fn export(&self, dest: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *dest, &self.by_name())?;
        dest.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

impl MergeableSink for HistogramSet {
    fn merge(&mut self, other: Self) -> Result<()> {
        for (index, group) in other.groups {
            match self.groups.get_mut(&index) {
                Some(existing) => existing.merge(&group)?,
                None => {
                    self.groups.insert(index, group);
                }
            }
        }
        Ok(())
    }
}
