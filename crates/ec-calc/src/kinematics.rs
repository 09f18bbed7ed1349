//! Detector-frame momentum reconstruction.

use ec_core::types::{Constituent, Jet};
use nalgebra::Vector3;

use crate::angles::periodic_delta_phi;

/// Energy-momentum vector with the energy pinned to the 3-momentum
/// magnitude (massless approximation, not a true invariant mass).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourMomentum {
    momentum: Vector3<f64>,
    energy: f64,
}

impl FourMomentum {
    /// Build from a 3-momentum; the energy is set to its magnitude.
    pub fn from_momentum(momentum: Vector3<f64>) -> Self {
        Self {
            energy: momentum.norm(),
            momentum,
        }
    }

    /// The 3-momentum.
    pub fn momentum(&self) -> Vector3<f64> {
        self.momentum
    }

    /// Energy (equal to |p| by construction).
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.momentum.x.hypot(self.momentum.y)
    }

    /// Transverse energy, `E * pt / |p|`.
    pub fn et(&self) -> f64 {
        let p = self.momentum.norm();
        if p == 0.0 {
            0.0
        } else {
            self.energy * self.pt() / p
        }
    }
}

/// Unit direction for detector coordinates (eta, phi).
fn direction(eta: f64, phi: f64) -> Vector3<f64> {
    let theta = 2.0 * (-eta).exp().atan();
    Vector3::new(
        theta.sin() * phi.cos(),
        theta.sin() * phi.sin(),
        theta.cos(),
    )
}

/// Jet momentum from its (pt, eta, phi) summary.
pub fn jet_momentum(jet: &Jet) -> FourMomentum {
    let p = jet.pt * jet.eta.cosh();
    FourMomentum::from_momentum(direction(jet.eta, jet.phi) * p)
}

/// Constituent momentum from its jet-relative description.
///
/// The total momentum is `hypot(z * jet_pt, jt)`, pointed along the
/// constituent's own (eta, phi).
pub fn constituent_momentum(cst: &Constituent, jet_pt: f64) -> FourMomentum {
    let p = (cst.z * jet_pt).hypot(cst.jt);
    FourMomentum::from_momentum(direction(cst.eta, cst.phi) * p)
}

/// Angular separation between two constituents: the hypot of their
/// eta difference and their periodically folded phi difference.
pub fn pair_distance(a: &Constituent, b: &Constituent) -> f64 {
    (a.eta - b.eta).hypot(periodic_delta_phi(a.phi - b.phi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ec_core::types::SpinPattern;
    use std::f64::consts::PI;

    fn cst(z: f64, jt: f64, eta: f64, phi: f64) -> Constituent {
        Constituent { z, jt, eta, phi }
    }

    #[test]
    fn direction_is_unit() {
        for (eta, phi) in [(0.0, 0.0), (1.3, 2.0), (-2.1, -0.4)] {
            assert_relative_eq!(direction(eta, phi).norm(), 1.0, max_relative = 1e-14);
        }
    }

    #[test]
    fn midrapidity_jet_momentum() {
        let jet = Jet {
            pt: 10.0,
            eta: 0.0,
            phi: 0.0,
            cf: 0.5,
            charge: 0.0,
            pattern: SpinPattern::Unpolarized,
        };
        let p4 = jet_momentum(&jet);
        // eta = 0: momentum is purely transverse
        assert_relative_eq!(p4.pt(), 10.0, max_relative = 1e-12);
        assert_relative_eq!(p4.energy(), 10.0, max_relative = 1e-12);
        assert!(p4.momentum().z.abs() < 1e-12);
    }

    #[test]
    fn forward_jet_momentum() {
        let jet = Jet {
            pt: 5.0,
            eta: 1.0,
            phi: 0.3,
            cf: 0.5,
            charge: 0.0,
            pattern: SpinPattern::Unpolarized,
        };
        let p4 = jet_momentum(&jet);
        assert_relative_eq!(p4.pt(), 5.0, max_relative = 1e-12);
        assert_relative_eq!(p4.momentum().z, 5.0 * 1.0_f64.sinh(), max_relative = 1e-12);
        assert_relative_eq!(p4.energy(), 5.0 * 1.0_f64.cosh(), max_relative = 1e-12);
    }

    #[test]
    fn constituent_momentum_magnitude() {
        let c = cst(0.3, 0.1, 0.0, 0.0);
        let p4 = constituent_momentum(&c, 10.0);
        assert_relative_eq!(p4.energy(), 3.0_f64.hypot(0.1), max_relative = 1e-12);
        // et equals pt under the massless approximation
        assert_relative_eq!(p4.et(), p4.pt(), max_relative = 1e-12);
    }

    #[test]
    fn pair_distance_identical_is_zero() {
        let a = cst(0.3, 0.1, 0.5, 1.0);
        assert_eq!(pair_distance(&a, &a), 0.0);
    }

    #[test]
    fn pair_distance_max_azimuthal() {
        // phi = (0, pi): maximal azimuthal separation, no wrap at exactly pi
        let a = cst(0.3, 0.1, 0.0, 0.0);
        let b = cst(0.2, 0.1, 0.0, PI);
        assert_relative_eq!(pair_distance(&a, &b), PI, max_relative = 1e-15);
    }

    #[test]
    fn pair_distance_wraps_azimuth() {
        // 0.1 and 2pi - 0.1 are 0.2 apart through the boundary
        let a = cst(0.3, 0.1, 0.0, 0.1);
        let b = cst(0.2, 0.1, 0.0, 2.0 * PI - 0.1);
        assert_relative_eq!(pair_distance(&a, &b), 0.2, max_relative = 1e-10);
    }

    #[test]
    fn pair_distance_combines_axes() {
        let a = cst(0.3, 0.1, 0.3, 0.0);
        let b = cst(0.2, 0.1, -0.1, 0.3);
        assert_relative_eq!(pair_distance(&a, &b), 0.4_f64.hypot(0.3), max_relative = 1e-12);
    }

    #[test]
    fn zero_momentum_et() {
        let p4 = FourMomentum::from_momentum(Vector3::zeros());
        assert_eq!(p4.et(), 0.0);
        assert_eq!(p4.pt(), 0.0);
    }
}
