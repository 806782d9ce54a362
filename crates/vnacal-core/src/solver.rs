//! Error-network solve and embed/de-embed transforms
//!
//! One-port calibration reduces to a 3x3 complex linear system per
//! frequency point. The three standards obey the bilinear embedding
//!
//!   G_meas = S11 + S12*S21 * G_true / (1 - S22 * G_true)
//!
//! which rearranges to G_meas = a + b*G_true + c*G_true*G_meas with
//! a = S11, b = S12*S21 - S11*S22, c = S22. Only the S12*S21 product is
//! recoverable from one-port standards; individual S12/S21 never are.
//! Every frequency point is solved independently.

use nalgebra::{Matrix3, Vector3};
use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::constants::NEAR_ZERO;
use crate::error::CalError;

fn check_stacked(name: &str, arr: &Array2<Complex64>) -> Result<(), CalError> {
    if arr.nrows() != 3 {
        return Err(CalError::ShapeMismatch {
            expected: format!("{} with first axis of length 3", name),
            got: format!("({}, {})", arr.nrows(), arr.ncols()),
        });
    }
    Ok(())
}

/// Solve for the error-network S-parameters from the three standards.
///
/// `gamma_true` and `gamma_meas` are (3, N) arrays in (open, short, match)
/// order. Returns a (3, N) array whose rows are (S11, S12*S21, S22).
///
/// A singular system (duplicate or collinear standards) fails with
/// [`CalError::SingularSystem`] carrying the offending frequency index.
pub fn network_sparams(
    gamma_true: &Array2<Complex64>,
    gamma_meas: &Array2<Complex64>,
) -> Result<Array2<Complex64>, CalError> {
    check_stacked("gamma_true", gamma_true)?;
    check_stacked("gamma_meas", gamma_meas)?;
    if gamma_true.ncols() != gamma_meas.ncols() {
        return Err(CalError::ShapeMismatch {
            expected: format!("gamma_meas with {} columns", gamma_true.ncols()),
            got: format!("({}, {})", gamma_meas.nrows(), gamma_meas.ncols()),
        });
    }

    let n = gamma_true.ncols();
    let one = Complex64::new(1.0, 0.0);
    let mut out = Array2::zeros((3, n));

    for i in 0..n {
        let gt = [gamma_true[[0, i]], gamma_true[[1, i]], gamma_true[[2, i]]];
        let gm = [gamma_meas[[0, i]], gamma_meas[[1, i]], gamma_meas[[2, i]]];

        // rows: [1, G_true_k, G_true_k * G_meas_k] . (a, b, c) = G_meas_k
        let m = Matrix3::new(
            one, gt[0], gt[0] * gm[0],
            one, gt[1], gt[1] * gm[1],
            one, gt[2], gt[2] * gm[2],
        );
        let rhs = Vector3::new(gm[0], gm[1], gm[2]);

        let x = m
            .qr()
            .solve(&rhs)
            .ok_or(CalError::SingularSystem { index: i })?;

        // the middle unknown is entangled with S11*S22: S12*S21 = b + a*c
        out[[0, i]] = x[0];
        out[[1, i]] = x[1] + x[0] * x[2];
        out[[2, i]] = x[2];
    }

    Ok(out)
}

/// Predict the reflection coefficient observed through an error network.
///
/// G_obs = S11 + S12*S21 * G / (1 - S22 * G). `sparams` is (3, N) with
/// rows (S11, S12*S21, S22); `gamma` has length N.
pub fn embed(
    sparams: &Array2<Complex64>,
    gamma: &Array1<Complex64>,
) -> Result<Array1<Complex64>, CalError> {
    check_stacked("sparams", sparams)?;
    if sparams.ncols() != gamma.len() {
        return Err(CalError::ShapeMismatch {
            expected: format!("gamma with {} points", sparams.ncols()),
            got: format!("({},)", gamma.len()),
        });
    }

    let one = Complex64::new(1.0, 0.0);
    let mut out = Array1::zeros(gamma.len());
    for i in 0..gamma.len() {
        let (s11, s12s21, s22) = (sparams[[0, i]], sparams[[1, i]], sparams[[2, i]]);
        let den = one - s22 * gamma[i];
        if den.norm() < NEAR_ZERO {
            return Err(CalError::DegenerateNetwork { index: i });
        }
        out[i] = s11 + s12s21 * gamma[i] / den;
    }
    Ok(out)
}

/// Remove an error network's effect from an observed reflection coefficient.
///
/// With d = G_obs - S11: G = d / (S12*S21 + S22 * d). Exact algebraic
/// inverse of [`embed`] whenever S12*S21 != 0.
pub fn de_embed(
    sparams: &Array2<Complex64>,
    gamma: &Array1<Complex64>,
) -> Result<Array1<Complex64>, CalError> {
    check_stacked("sparams", sparams)?;
    if sparams.ncols() != gamma.len() {
        return Err(CalError::ShapeMismatch {
            expected: format!("gamma with {} points", sparams.ncols()),
            got: format!("({},)", gamma.len()),
        });
    }

    let mut out = Array1::zeros(gamma.len());
    for i in 0..gamma.len() {
        let (s11, s12s21, s22) = (sparams[[0, i]], sparams[[1, i]], sparams[[2, i]]);
        let d = gamma[i] - s11;
        let den = s12s21 + s22 * d;
        if den.norm() < NEAR_ZERO {
            return Err(CalError::DegenerateNetwork { index: i });
        }
        out[i] = d / den;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ideal_stack(n: usize) -> Array2<Complex64> {
        let mut g = Array2::zeros((3, n));
        for i in 0..n {
            g[[0, i]] = Complex64::new(1.0, 0.0); // open
            g[[1, i]] = Complex64::new(-1.0, 0.0); // short
            g[[2, i]] = Complex64::new(0.0, 0.0); // match
        }
        g
    }

    #[test]
    fn test_identity_network_from_ideal_standards() {
        let n = 125;
        let g = ideal_stack(n);
        let sparams = network_sparams(&g, &g).unwrap();
        for i in 0..n {
            assert_relative_eq!(sparams[[0, i]].norm(), 0.0, epsilon = 1e-12);
            assert_relative_eq!(sparams[[1, i]].re, 1.0, epsilon = 1e-12);
            assert_relative_eq!(sparams[[1, i]].im, 0.0, epsilon = 1e-12);
            assert_relative_eq!(sparams[[2, i]].norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_recovers_known_network() {
        // measure ideal standards through a known error network, solve,
        // and compare against the network we embedded with
        let n = 16;
        let g_true = ideal_stack(n);
        let mut sparams = Array2::zeros((3, n));
        for i in 0..n {
            sparams[[0, i]] = Complex64::new(0.1, 0.02);
            sparams[[1, i]] = Complex64::new(0.9, -0.05);
            sparams[[2, i]] = Complex64::new(0.05, 0.01);
        }

        let mut g_meas = Array2::zeros((3, n));
        for k in 0..3 {
            let row: Array1<Complex64> = g_true.row(k).to_owned();
            let observed = embed(&sparams, &row).unwrap();
            for i in 0..n {
                g_meas[[k, i]] = observed[i];
            }
        }

        let solved = network_sparams(&g_true, &g_meas).unwrap();
        for i in 0..n {
            for r in 0..3 {
                assert_relative_eq!(solved[[r, i]].re, sparams[[r, i]].re, epsilon = 1e-12);
                assert_relative_eq!(solved[[r, i]].im, sparams[[r, i]].im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_singular_system_reports_index() {
        // duplicate standards make the system rank-deficient
        let n = 3;
        let mut g = Array2::zeros((3, n));
        for i in 0..n {
            g[[0, i]] = Complex64::new(1.0, 0.0);
            g[[1, i]] = Complex64::new(1.0, 0.0); // same as open
            g[[2, i]] = Complex64::new(0.0, 0.0);
        }
        let err = network_sparams(&g, &g).unwrap_err();
        assert_eq!(err, CalError::SingularSystem { index: 0 });
    }

    #[test]
    fn test_shape_mismatch_rejected_eagerly() {
        let g3 = ideal_stack(4);
        let g2 = Array2::<Complex64>::zeros((2, 4));
        assert!(matches!(
            network_sparams(&g2, &g3).unwrap_err(),
            CalError::ShapeMismatch { .. }
        ));

        let g_short = ideal_stack(3);
        assert!(matches!(
            network_sparams(&g3, &g_short).unwrap_err(),
            CalError::ShapeMismatch { .. }
        ));

        let gamma = Array1::<Complex64>::zeros(5);
        assert!(matches!(
            embed(&g3, &gamma).unwrap_err(),
            CalError::ShapeMismatch { .. }
        ));
    }

    #[test]
    fn test_embed_de_embed_round_trip() {
        let n = 64;
        let mut sparams = Array2::zeros((3, n));
        let mut gamma = Array1::zeros(n);
        for i in 0..n {
            // varied, deterministic values; s12s21 kept away from zero
            let t = i as f64 / n as f64;
            sparams[[0, i]] = Complex64::new(0.2 * (3.0 * t).cos(), 0.1 * (5.0 * t).sin());
            sparams[[1, i]] = Complex64::new(0.8 + 0.1 * (2.0 * t).cos(), 0.2 * (7.0 * t).sin());
            sparams[[2, i]] = Complex64::new(0.15 * (4.0 * t).sin(), 0.1 * (6.0 * t).cos());
            gamma[i] = Complex64::new(0.7 * (9.0 * t).cos(), 0.6 * (11.0 * t).sin());
        }

        let observed = embed(&sparams, &gamma).unwrap();
        let recovered = de_embed(&sparams, &observed).unwrap();
        for i in 0..n {
            assert_relative_eq!(recovered[i].re, gamma[i].re, epsilon = 1e-12);
            assert_relative_eq!(recovered[i].im, gamma[i].im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_degenerate_network_reported() {
        // s12s21 = 0 and s22 = 0 make de-embedding impossible
        let n = 2;
        let mut sparams = Array2::zeros((3, n));
        for i in 0..n {
            sparams[[0, i]] = Complex64::new(0.1, 0.0);
        }
        let gamma = Array1::from_elem(n, Complex64::new(0.5, 0.0));
        let err = de_embed(&sparams, &gamma).unwrap_err();
        assert_eq!(err, CalError::DegenerateNetwork { index: 0 });

        // 1 - s22*gamma = 0 makes embedding singular
        let mut sparams = Array2::zeros((3, n));
        for i in 0..n {
            sparams[[1, i]] = Complex64::new(1.0, 0.0);
            sparams[[2, i]] = Complex64::new(2.0, 0.0);
        }
        let gamma = Array1::from_elem(n, Complex64::new(0.5, 0.0));
        let err = embed(&sparams, &gamma).unwrap_err();
        assert_eq!(err, CalError::DegenerateNetwork { index: 0 });
    }
}
