//! Angle folding for detector-frame periodic conventions.
//!
//! An axial observable and its pi-rotation are physically equivalent,
//! so raw angles are folded into canonical intervals before they are
//! histogrammed. The breakpoints below are contractual; downstream
//! asymmetry fits depend on them exactly.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Fold a hadron angle assumed in (0, pi) into (-pi/2, pi/2).
pub fn wrap_hadron_angle(angle: f64) -> f64 {
    if angle > FRAC_PI_2 {
        angle - PI
    } else {
        angle
    }
}

/// Fold a doubled hadron angle into (-pi/2, pi/2).
///
/// Exactly one adjustment is applied, chosen from four disjoint input
/// ranges; inputs beyond (-5pi/2, 5pi/2) are shifted but not fully
/// folded.
pub fn wrap_doubled_hadron_angle(angle: f64) -> f64 {
    let pi_3_div_2 = 3.0 * FRAC_PI_2;

    let do_pi_sub = angle > FRAC_PI_2 && angle <= pi_3_div_2;
    let do_two_pi_sub = angle > pi_3_div_2;
    let do_pi_add = angle < -FRAC_PI_2 && angle >= -pi_3_div_2;
    let do_two_pi_add = angle < -pi_3_div_2;

    if do_pi_sub {
        angle - PI
    } else if do_two_pi_sub {
        angle - TAU
    } else if do_pi_add {
        angle + PI
    } else if do_two_pi_add {
        angle + TAU
    } else {
        angle
    }
}

/// Fold a spin-hadron angle into [0, pi].
pub fn wrap_spin_hadron_angle(angle: f64) -> f64 {
    if angle > PI {
        angle - PI
    } else if angle < 0.0 {
        angle + PI
    } else {
        angle
    }
}

/// One-step fold of an angle in (-2pi, 2pi) into [0, 2pi).
pub fn fold_two_pi(angle: f64) -> f64 {
    if angle < 0.0 {
        angle + TAU
    } else if angle >= TAU {
        angle - TAU
    } else {
        angle
    }
}

/// Azimuth difference folded by 2pi, IEEE-remainder style.
///
/// Result magnitude is at most pi; the sign at exactly +/-pi depends on
/// rounding of the half quotient, and callers only consume magnitudes.
pub fn periodic_delta_phi(dphi: f64) -> f64 {
    dphi - TAU * (dphi / TAU).round()
}
