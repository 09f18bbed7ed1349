//! Common data types for EncStat

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reconstructed jet summary used for binning and weighting.
///
/// Immutable per observation; owned by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Jet {
    /// Transverse momentum.
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuth.
    pub phi: f64,
    /// Charge fraction.
    pub cf: f64,
    /// Net charge.
    pub charge: f64,
    /// Beam spin pattern of the event this jet came from.
    pub pattern: SpinPattern,
}

/// One jet constituent, described relative to the jet axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Constituent {
    /// Longitudinal momentum fraction.
    pub z: f64,
    /// Transverse momentum relative to the jet axis.
    pub jt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuth.
    pub phi: f64,
}

/// One unit of work for batch processing: a jet, an unordered
/// constituent pair, and the event weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Observation {
    /// The jet both constituents belong to.
    pub jet: Jet,
    /// The constituent pair.
    pub csts: (Constituent, Constituent),
    /// Event-level weight multiplier.
    pub weight: f64,
}

/// Transverse polarization direction of one beam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// Spin up (+y).
    Up,
    /// Spin down (-y).
    Down,
}

/// Beam polarization configuration for an event.
///
/// Closed over the patterns delivered by the spin database; anything
/// else is collapsed to [`SpinPattern::Unpolarized`] at the decoding
/// boundary ([`SpinPattern::from_code`]), never further downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinPattern {
    /// pp: blue up, yellow up.
    BlueUpYellowUp,
    /// pp: blue down, yellow up.
    BlueDownYellowUp,
    /// pp: blue up, yellow down.
    BlueUpYellowDown,
    /// pp: blue down, yellow down.
    BlueDownYellowDown,
    /// pAu: blue up, yellow unpolarized.
    BlueUp,
    /// pAu: blue down, yellow unpolarized.
    BlueDown,
    /// No recognized polarization.
    Unpolarized,
}

impl SpinPattern {
    /// Decode a raw spin-pattern tag as stored on the input DSTs.
    ///
    /// Codes 0-3 are the pp patterns, 4-5 the blue-only pAu patterns.
    /// Unrecognized codes map to [`SpinPattern::Unpolarized`].
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => SpinPattern::BlueUpYellowUp,
            1 => SpinPattern::BlueDownYellowUp,
            2 => SpinPattern::BlueUpYellowDown,
            3 => SpinPattern::BlueDownYellowDown,
            4 => SpinPattern::BlueUp,
            5 => SpinPattern::BlueDown,
            _ => SpinPattern::Unpolarized,
        }
    }

    /// Blue-beam polarity, `None` when the blue beam is unpolarized.
    pub fn blue(&self) -> Option<Polarity> {
        match self {
            SpinPattern::BlueUpYellowUp
            | SpinPattern::BlueUpYellowDown
            | SpinPattern::BlueUp => Some(Polarity::Up),
            SpinPattern::BlueDownYellowUp
            | SpinPattern::BlueDownYellowDown
            | SpinPattern::BlueDown => Some(Polarity::Down),
            SpinPattern::Unpolarized => None,
        }
    }

    /// Yellow-beam polarity, `None` when the yellow beam is unpolarized.
    pub fn yellow(&self) -> Option<Polarity> {
        match self {
            SpinPattern::BlueUpYellowUp | SpinPattern::BlueDownYellowUp => Some(Polarity::Up),
            SpinPattern::BlueUpYellowDown | SpinPattern::BlueDownYellowDown => {
                Some(Polarity::Down)
            }
            SpinPattern::BlueUp | SpinPattern::BlueDown | SpinPattern::Unpolarized => None,
        }
    }
}

/// Coordinate along one sub-binning axis: a resolved bin ordinal, or
/// the integrated state summing over the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisBin {
    /// A resolved bin ordinal.
    Bin(usize),
    /// Sum over this axis.
    Integrated,
}

impl AxisBin {
    /// Flat ordinal with the integrated state mapped one past the last
    /// real bin.
    pub fn ordinal(&self, n_bins: usize) -> usize {
        match self {
            AxisBin::Bin(i) => *i,
            AxisBin::Integrated => n_bins,
        }
    }

    /// Whether this coordinate is the integrated state.
    pub fn is_integrated(&self) -> bool {
        matches!(self, AxisBin::Integrated)
    }
}

impl fmt::Display for AxisBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisBin::Bin(i) => write!(f, "{i}"),
            AxisBin::Integrated => write!(f, "int"),
        }
    }
}

/// Spin state of one histogram slot.
///
/// The integrated state is always present; single-beam states carry one
/// realized polarity, combined states both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinBin {
    /// Sum over spin states.
    Integrated,
    /// Blue beam up.
    BlueUp,
    /// Blue beam down.
    BlueDown,
    /// Yellow beam up.
    YellowUp,
    /// Yellow beam down.
    YellowDown,
    /// Blue up and yellow up.
    BlueUpYellowUp,
    /// Blue down and yellow up.
    BlueDownYellowUp,
    /// Blue up and yellow down.
    BlueUpYellowDown,
    /// Blue down and yellow down.
    BlueDownYellowDown,
}

impl SpinBin {
    /// Blue-only state for a polarity.
    pub fn blue(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Up => SpinBin::BlueUp,
            Polarity::Down => SpinBin::BlueDown,
        }
    }

    /// Yellow-only state for a polarity.
    pub fn yellow(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Up => SpinBin::YellowUp,
            Polarity::Down => SpinBin::YellowDown,
        }
    }

    /// Combined state for a (blue, yellow) polarity pair.
    pub fn combined(blue: Polarity, yellow: Polarity) -> Self {
        match (blue, yellow) {
            (Polarity::Up, Polarity::Up) => SpinBin::BlueUpYellowUp,
            (Polarity::Down, Polarity::Up) => SpinBin::BlueDownYellowUp,
            (Polarity::Up, Polarity::Down) => SpinBin::BlueUpYellowDown,
            (Polarity::Down, Polarity::Down) => SpinBin::BlueDownYellowDown,
        }
    }

    /// Short tag used in histogram names.
    pub fn label(&self) -> &'static str {
        match self {
            SpinBin::Integrated => "int",
            SpinBin::BlueUp => "bu",
            SpinBin::BlueDown => "bd",
            SpinBin::YellowUp => "yu",
            SpinBin::YellowDown => "yd",
            SpinBin::BlueUpYellowUp => "buyu",
            SpinBin::BlueDownYellowUp => "bdyu",
            SpinBin::BlueUpYellowDown => "buyd",
            SpinBin::BlueDownYellowDown => "bdyd",
        }
    }
}

impl fmt::Display for SpinBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full coordinate of one aggregation slot.
///
/// Computed fresh per observation; `cf` is never emitted as
/// [`AxisBin::Integrated`] (the charge-fraction axis has no integrated
/// state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinIndex {
    /// Jet-pt coordinate.
    pub pt: AxisBin,
    /// Charge-fraction coordinate.
    pub cf: AxisBin,
    /// Net-charge coordinate.
    pub charge: AxisBin,
    /// Spin-state coordinate.
    pub spin: SpinBin,
}

/// Observables computed for one jet + constituent pair, handed to the
/// accumulation sink once per resolved index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PairObservables {
    /// Pair weight: product of both constituent energy-sharing weights
    /// and the event weight.
    pub weight: f64,
    /// Angular separation of the two constituents (R_L).
    pub dist: f64,
    /// Spin-relative azimuthal angle against the blue beam, `None` when
    /// the blue beam is unpolarized.
    pub phi_blue: Option<f64>,
    /// Spin-relative azimuthal angle against the yellow beam, `None`
    /// when the yellow beam is unpolarized.
    pub phi_yellow: Option<f64>,
    /// Transverse component of the blue spin direction (0 when null).
    pub spin_blue: f64,
    /// Transverse component of the yellow spin direction (0 when null).
    pub spin_yellow: f64,
    /// Spin pattern the angles were computed under.
    pub pattern: SpinPattern,
}
