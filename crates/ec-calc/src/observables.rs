//! Per-pair observable computation: energy-sharing weights, pair
//! distance, and spin-relative azimuthal angles.
//!
//! The spin-relative angles follow the dihadron fragmentation-function
//! convention: the pair axis `PC = p1 + p2` and opening vector
//! `RC = (p1 - p2) / 2` define, together with each beam, the planes
//! whose signed opening angles are measured. Each beam's angle is
//! reported relative to the reference dihadron angle built from the
//! yellow beam and `RC`.

use ec_core::types::{Constituent, Jet, PairObservables};
use ec_core::{Error, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::angles::fold_two_pi;
use crate::consts::{self, COLLINEAR_EPS};
use crate::kinematics::{constituent_momentum, jet_momentum, pair_distance, FourMomentum};

/// Observable entering the energy-sharing weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightMode {
    /// Full energy.
    Energy,
    /// Transverse energy.
    TransverseEnergy,
    /// Transverse momentum.
    #[default]
    TransverseMomentum,
}

/// Computes per-pair observables. Purely computational; no side
/// effects and no state beyond the weight policy.
#[derive(Debug, Clone, Copy)]
pub struct PairCalculator {
    weight_mode: WeightMode,
    weight_power: f64,
}

impl Default for PairCalculator {
    fn default() -> Self {
        Self::new(WeightMode::default(), 1.0)
    }
}

impl PairCalculator {
    /// Calculator with the given weight policy.
    pub fn new(weight_mode: WeightMode, weight_power: f64) -> Self {
        Self {
            weight_mode,
            weight_power,
        }
    }

    /// Energy-sharing weight of one constituent against its jet:
    /// `(x_cst / x_jet) ^ power` with `x` chosen by the weight mode.
    pub fn constituent_weight(&self, cst: &FourMomentum, jet: &FourMomentum) -> f64 {
        let (numer, denom) = match self.weight_mode {
            WeightMode::Energy => (cst.energy(), jet.energy()),
            WeightMode::TransverseEnergy => (cst.et(), jet.et()),
            WeightMode::TransverseMomentum => (cst.pt(), jet.pt()),
        };
        numer.powf(self.weight_power) / denom.powf(self.weight_power)
    }

    /// Full observable bundle for one jet + constituent pair.
    ///
    /// Fails with `DegenerateGeometry` when the pair geometry leaves a
    /// spin-plane angle undefined (collinear vectors); a beam that is
    /// simply unpolarized yields `None` for its angle instead.
    pub fn observables(
        &self,
        jet: &Jet,
        csts: (&Constituent, &Constituent),
        evt_weight: f64,
    ) -> Result<PairObservables> {
        let jet4 = jet_momentum(jet);
        let cst4 = (
            constituent_momentum(csts.0, jet.pt),
            constituent_momentum(csts.1, jet.pt),
        );

        let weight = self.constituent_weight(&cst4.0, &jet4)
            * self.constituent_weight(&cst4.1, &jet4)
            * evt_weight;
        let dist = pair_distance(csts.0, csts.1);

        let (phi_blue, phi_yellow) =
            spin_angles(jet, cst4.0.momentum(), cst4.1.momentum())?;

        let spin_blue = consts::spin_vector(jet.pattern.blue()).map_or(0.0, |s| s.y);
        let spin_yellow = consts::spin_vector(jet.pattern.yellow()).map_or(0.0, |s| s.y);

        Ok(PairObservables {
            weight,
            dist,
            phi_blue,
            phi_yellow,
            spin_blue,
            spin_yellow,
            pattern: jet.pattern,
        })
    }
}

/// Signed angle in [0, 2pi) between the (axis, u) and (axis, v) planes.
///
/// The cosine comes from the unit plane normals, the sine from the
/// projection of `u x v` along the axis; the axis must be normalized
/// by the caller.
fn plane_angle(axis: &Vector3<f64>, u: &Vector3<f64>, v: &Vector3<f64>) -> Result<f64> {
    let norm_u = axis.cross(u);
    let norm_v = axis.cross(v);
    let mag_u = norm_u.norm();
    let mag_v = norm_v.norm();
    if mag_u < COLLINEAR_EPS || mag_v < COLLINEAR_EPS {
        return Err(Error::DegenerateGeometry(format!(
            "plane normals have near-zero magnitude ({mag_u:.3e}, {mag_v:.3e})"
        )));
    }

    let cos = (norm_u.dot(&norm_v) / (mag_u * mag_v)).clamp(-1.0, 1.0);
    let sin = u.cross(v).dot(axis) / (mag_u * mag_v);
    let angle = if sin > 0.0 { cos.acos() } else { -cos.acos() };
    Ok(fold_two_pi(angle))
}

/// Spin-relative azimuthal angles for the (blue, yellow) beams.
///
/// Returns `None` per beam when that beam carries no polarization.
fn spin_angles(
    jet: &Jet,
    p1: Vector3<f64>,
    p2: Vector3<f64>,
) -> Result<(Option<f64>, Option<f64>)> {
    let spin_blue = consts::spin_vector(jet.pattern.blue());
    let spin_yellow = consts::spin_vector(jet.pattern.yellow());
    if spin_blue.is_none() && spin_yellow.is_none() {
        return Ok((None, None));
    }

    let pair_axis = p1 + p2;
    if pair_axis.norm() < COLLINEAR_EPS {
        return Err(Error::DegenerateGeometry(
            "pair axis has near-zero magnitude".into(),
        ));
    }
    let pair_unit = pair_axis.normalize();
    let opening = (p1 - p2) * 0.5;

    // reference dihadron angle from the yellow beam and the opening vector
    let theta_rc = plane_angle(&pair_unit, &consts::yellow_beam(), &opening)?;

    let phi_blue = match spin_blue {
        Some(spin) => {
            let theta_sb = plane_angle(&consts::blue_beam(), &pair_axis, &spin)?;
            Some(fold_two_pi(theta_sb - theta_rc))
        }
        None => None,
    };
    let phi_yellow = match spin_yellow {
        Some(spin) => {
            let theta_sa = plane_angle(&consts::yellow_beam(), &pair_axis, &spin)?;
            Some(fold_two_pi(theta_sa - theta_rc))
        }
        None => None,
    };
    Ok((phi_blue, phi_yellow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ec_core::types::SpinPattern;
    use std::f64::consts::TAU;

    fn jet(pt: f64, pattern: SpinPattern) -> Jet {
        Jet {
            pt,
            eta: 0.0,
            phi: 0.0,
            cf: 0.5,
            charge: 0.0,
            pattern,
        }
    }

    fn cst(z: f64, jt: f64, eta: f64, phi: f64) -> Constituent {
        Constituent { z, jt, eta, phi }
    }

    #[test]
    fn pt_weight_ratio() {
        let calc = PairCalculator::default();
        let j = jet(10.0, SpinPattern::Unpolarized);
        let jet4 = jet_momentum(&j);
        let cst4 = constituent_momentum(&cst(0.3, 0.0, 0.0, 0.0), j.pt);
        // z * jet pt at midrapidity with jt = 0
        assert_relative_eq!(
            calc.constituent_weight(&cst4, &jet4),
            0.3,
            max_relative = 1e-12
        );
    }

    #[test]
    fn weight_power_is_applied() {
        let calc = PairCalculator::new(WeightMode::TransverseMomentum, 2.0);
        let j = jet(10.0, SpinPattern::Unpolarized);
        let jet4 = jet_momentum(&j);
        let cst4 = constituent_momentum(&cst(0.5, 0.0, 0.0, 0.0), j.pt);
        assert_relative_eq!(
            calc.constituent_weight(&cst4, &jet4),
            0.25,
            max_relative = 1e-12
        );
    }

    #[test]
    fn energy_mode_matches_pt_at_midrapidity() {
        // with E = |p| and everything transverse, all three modes agree
        let j = jet(10.0, SpinPattern::Unpolarized);
        let jet4 = jet_momentum(&j);
        let cst4 = constituent_momentum(&cst(0.4, 0.0, 0.0, 0.0), j.pt);
        for mode in [
            WeightMode::Energy,
            WeightMode::TransverseEnergy,
            WeightMode::TransverseMomentum,
        ] {
            let calc = PairCalculator::new(mode, 1.0);
            assert_relative_eq!(
                calc.constituent_weight(&cst4, &jet4),
                0.4,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn unpolarized_pattern_has_no_angles() {
        let calc = PairCalculator::default();
        let obs = calc
            .observables(
                &jet(10.0, SpinPattern::Unpolarized),
                (&cst(0.3, 0.1, 0.1, 0.05), &cst(0.2, 0.1, -0.1, -0.05)),
                1.0,
            )
            .unwrap();
        assert!(obs.phi_blue.is_none());
        assert!(obs.phi_yellow.is_none());
        assert_eq!(obs.spin_blue, 0.0);
        assert_eq!(obs.spin_yellow, 0.0);
    }

    #[test]
    fn single_beam_pattern_has_blue_angle_only() {
        let calc = PairCalculator::default();
        let obs = calc
            .observables(
                &jet(10.0, SpinPattern::BlueDown),
                (&cst(0.3, 0.1, 0.1, 0.05), &cst(0.2, 0.1, -0.1, -0.05)),
                1.0,
            )
            .unwrap();
        let phi = obs.phi_blue.unwrap();
        assert!((0.0..TAU).contains(&phi));
        assert!(obs.phi_yellow.is_none());
        assert_eq!(obs.spin_blue, -1.0);
    }

    #[test]
    fn dual_beam_pattern_has_both_angles() {
        let calc = PairCalculator::default();
        let obs = calc
            .observables(
                &jet(10.0, SpinPattern::BlueUpYellowUp),
                (&cst(0.3, 0.1, 0.1, 0.05), &cst(0.2, 0.1, -0.1, -0.05)),
                1.0,
            )
            .unwrap();
        assert!((0.0..TAU).contains(&obs.phi_blue.unwrap()));
        assert!((0.0..TAU).contains(&obs.phi_yellow.unwrap()));
        assert_eq!(obs.spin_blue, 1.0);
        assert_eq!(obs.spin_yellow, 1.0);
    }

    #[test]
    fn collinear_pair_is_degenerate() {
        // same direction for both constituents: opening vector is
        // parallel to the pair axis and the dihadron plane vanishes
        let calc = PairCalculator::default();
        let err = calc
            .observables(
                &jet(10.0, SpinPattern::BlueUpYellowUp),
                (&cst(0.3, 0.0, 0.1, 0.05), &cst(0.2, 0.0, 0.1, 0.05)),
                1.0,
            )
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry(_)));
    }

    #[test]
    fn degeneracy_only_raised_when_spin_requested() {
        // the same collinear pair is fine when no beam is polarized
        let calc = PairCalculator::default();
        let obs = calc
            .observables(
                &jet(10.0, SpinPattern::Unpolarized),
                (&cst(0.3, 0.0, 0.1, 0.05), &cst(0.2, 0.0, 0.1, 0.05)),
                1.0,
            )
            .unwrap();
        assert_eq!(obs.dist, 0.0);
    }

    #[test]
    fn plane_angle_quarter_turn() {
        // planes through x and y around the z axis are a quarter turn apart
        let z = Vector3::new(0.0, 0.0, 1.0);
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        let angle = plane_angle(&z, &x, &y).unwrap();
        assert_relative_eq!(angle, std::f64::consts::FRAC_PI_2, max_relative = 1e-12);
        // reversing the order flips the sign, folded into [0, 2pi)
        let angle = plane_angle(&z, &y, &x).unwrap();
        assert_relative_eq!(angle, 3.0 * std::f64::consts::FRAC_PI_2, max_relative = 1e-12);
    }

    #[test]
    fn plane_angle_rejects_collinear() {
        let z = Vector3::new(0.0, 0.0, 1.0);
        let x = Vector3::new(1.0, 0.0, 0.0);
        assert!(plane_angle(&z, &z, &x).is_err());
        assert!(plane_angle(&z, &x, &Vector3::zeros()).is_err());
    }

    #[test]
    fn flipping_both_spins_relates_angles() {
        // mirrored polarization patterns see plane angles that differ
        // by pi for the same pair geometry
        let calc = PairCalculator::default();
        let csts = (cst(0.3, 0.1, 0.1, 0.05), cst(0.2, 0.1, -0.1, -0.05));
        let up = calc
            .observables(&jet(10.0, SpinPattern::BlueUp), (&csts.0, &csts.1), 1.0)
            .unwrap();
        let down = calc
            .observables(&jet(10.0, SpinPattern::BlueDown), (&csts.0, &csts.1), 1.0)
            .unwrap();
        let delta = fold_two_pi(up.phi_blue.unwrap() - down.phi_blue.unwrap());
        assert_relative_eq!(delta, std::f64::consts::PI, max_relative = 1e-9);
    }
}
