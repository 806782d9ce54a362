//! Lossy offset-line model of a calibration standard
//!
//! A physical standard is modeled as an ideal termination behind a lossy,
//! delayed offset line (the classic Agilent/Keysight one-port standard
//! definition; see eqs. 20-21 of Monsalve et al. 2016). The offset line
//! contributes a skin-effect loss term scaled by sqrt(f / 1 GHz) from the
//! vendor's loss-at-1-GHz figure.

use std::f64::consts::PI;

use ndarray::Array1;
use num_complex::Complex64;

use crate::constants::LOSS_REF_FREQ;
use crate::gamma::impedance_to_gamma_arr;

/// Characteristic impedance of the offset line at one frequency.
///
/// Z_off = Z0 + (1 - i) * x, with x = loss / (4*pi*f) * sqrt(f / 1 GHz).
/// Zero loss gives exactly Z0.
pub fn offset_impedance(z0: f64, loss: f64, f: f64) -> Complex64 {
    let x = loss / (4.0 * PI * f) * (f / LOSS_REF_FREQ).sqrt();
    Complex64::new(z0 + x, -x)
}

/// Propagation constant times length of the offset line at one frequency.
///
/// l*gamma = 2*pi*i*f*delay + (1 + i) * x, with
/// x = delay * loss / (2 * Z0) * sqrt(f / 1 GHz).
/// Zero delay gives exactly 0; zero loss gives the pure phase term
/// i * omega * delay.
pub fn length_times_gamma(z0: f64, loss: f64, delay: f64, f: f64) -> Complex64 {
    let x = delay * loss / (2.0 * z0) * (f / LOSS_REF_FREQ).sqrt();
    Complex64::new(x, 2.0 * PI * f * delay + x)
}

/// [`offset_impedance`] over a frequency grid.
pub fn offset_impedance_arr(z0: f64, loss: f64, f: &[f64]) -> Array1<Complex64> {
    f.iter().map(|&fi| offset_impedance(z0, loss, fi)).collect()
}

/// [`length_times_gamma`] over a frequency grid.
pub fn length_times_gamma_arr(z0: f64, loss: f64, delay: f64, f: &[f64]) -> Array1<Complex64> {
    f.iter()
        .map(|&fi| length_times_gamma(z0, loss, delay, fi))
        .collect()
}

/// One calibration standard: an ideal termination behind an offset line
///
/// Immutable once constructed; all reflection coefficients are precomputed
/// on the owning kit's frequency grid.
#[derive(Debug, Clone)]
pub struct CalStandard {
    z0: f64,
    gamma_ter: Array1<Complex64>,
    gamma_off: Array1<Complex64>,
    gamma: Array1<Complex64>,
}

impl CalStandard {
    /// Build a standard from its terminal impedance, offset-line impedance,
    /// and l*gamma product, all sampled on the same frequency grid.
    pub fn new(
        z_ter: &Array1<Complex64>,
        z_off: &Array1<Complex64>,
        lgamma: &Array1<Complex64>,
        z0: f64,
    ) -> Self {
        let gamma_ter = impedance_to_gamma_arr(z_ter, z0);
        let gamma_off = impedance_to_gamma_arr(z_off, z0);
        let gamma = Self::combine(&gamma_ter, &gamma_off, lgamma);
        Self {
            z0,
            gamma_ter,
            gamma_off,
            gamma,
        }
    }

    /// Combined reflection coefficient of termination plus offset line.
    ///
    /// With e = exp(-2*l*gamma):
    ///   num = G_off*(1 - e) + G_ter*e - G_off^2*G_ter
    ///   den = 1 - G_off*(G_off*e + G_ter*(1 - e))
    ///
    /// Limits: l*gamma = 0 gives G_ter; l*gamma -> inf gives G_off;
    /// G_off = 0 gives G_ter * e.
    fn combine(
        gamma_ter: &Array1<Complex64>,
        gamma_off: &Array1<Complex64>,
        lgamma: &Array1<Complex64>,
    ) -> Array1<Complex64> {
        let n = gamma_ter.len();
        Array1::from_shape_fn(n, |i| {
            let gt = gamma_ter[i];
            let go = gamma_off[i];
            let e = (-2.0 * lgamma[i]).exp();
            let one = Complex64::new(1.0, 0.0);
            let num = go * (one - e) + gt * e - go * go * gt;
            let den = one - go * (go * e + gt * (one - e));
            num / den
        })
    }

    /// Characteristic impedance the coefficients are normalized to
    #[inline]
    pub fn z0(&self) -> f64 {
        self.z0
    }

    /// Reflection coefficient of the ideal termination alone
    #[inline]
    pub fn gamma_ter(&self) -> &Array1<Complex64> {
        &self.gamma_ter
    }

    /// Reflection coefficient of the offset line alone
    #[inline]
    pub fn gamma_off(&self) -> &Array1<Complex64> {
        &self.gamma_off
    }

    /// Combined reflection coefficient at the reference plane
    #[inline]
    pub fn gamma(&self) -> &Array1<Complex64> {
        &self.gamma
    }

    /// Number of frequency points
    #[inline]
    pub fn npoints(&self) -> usize {
        self.gamma.len()
    }
}
