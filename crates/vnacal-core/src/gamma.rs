//! Impedance / reflection-coefficient conversion
//!
//! Gamma is always normalized to a real characteristic impedance Z0
//! (50 ohms for every kit this library ships with).

use ndarray::Array1;
use num_complex::Complex64;

/// Convert a complex impedance to a reflection coefficient.
///
/// gamma = (Z - Z0) / (Z + Z0). An infinite impedance (either component)
/// is the open-circuit idealization and maps to exactly 1 + 0i; computing
/// it through the division would give inf/inf = nan.
///
/// Z = -Z0 makes the denominator vanish and the result is unbounded; that
/// is a property of the mapping, not a guarded error.
pub fn impedance_to_gamma(z: Complex64, z0: f64) -> Complex64 {
    if z.re.is_infinite() || z.im.is_infinite() {
        return Complex64::new(1.0, 0.0);
    }
    (z - z0) / (z + z0)
}

/// Elementwise [`impedance_to_gamma`] over a frequency grid.
pub fn impedance_to_gamma_arr(z: &Array1<Complex64>, z0: f64) -> Array1<Complex64> {
    z.mapv(|zi| impedance_to_gamma(zi, z0))
}

/// Convert a reflection coefficient back to a complex impedance.
///
/// Z = Z0 * (1 + gamma) / (1 - gamma). gamma = 1 maps to an open circuit
/// (infinite impedance).
pub fn gamma_to_impedance(gamma: Complex64, z0: f64) -> Complex64 {
    if gamma == Complex64::new(1.0, 0.0) {
        return Complex64::new(f64::INFINITY, 0.0);
    }
    z0 * (1.0 + gamma) / (1.0 - gamma)
}

/// Elementwise [`gamma_to_impedance`] over a frequency grid.
pub fn gamma_to_impedance_arr(gamma: &Array1<Complex64>, z0: f64) -> Array1<Complex64> {
    gamma.mapv(|g| gamma_to_impedance(g, z0))
}
