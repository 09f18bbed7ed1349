//! Frame conventions and numeric constants.
//!
//! The blue beam travels along +z and the yellow beam along -z;
//! transverse polarization is vertical (+y up). All angle and index
//! computations in this crate assume these axes.

use ec_core::types::Polarity;
use nalgebra::Vector3;

/// Base of the logarithm used for log-spaced binnings.
pub const LOG_BASE: f64 = 10.0;

/// Cross products with magnitude below this are treated as collinear.
pub const COLLINEAR_EPS: f64 = 1e-12;

/// Blue beam direction (+z).
pub fn blue_beam() -> Vector3<f64> {
    Vector3::new(0.0, 0.0, 1.0)
}

/// Yellow beam direction (-z).
pub fn yellow_beam() -> Vector3<f64> {
    Vector3::new(0.0, 0.0, -1.0)
}

/// Transverse spin-up direction (+y).
pub fn spin_up() -> Vector3<f64> {
    Vector3::new(0.0, 1.0, 0.0)
}

/// Transverse spin-down direction (-y).
pub fn spin_down() -> Vector3<f64> {
    Vector3::new(0.0, -1.0, 0.0)
}

/// Spin direction for one beam; `None` when the beam is unpolarized.
pub fn spin_vector(polarity: Option<Polarity>) -> Option<Vector3<f64>> {
    polarity.map(|p| match p {
        Polarity::Up => spin_up(),
        Polarity::Down => spin_down(),
    })
}
