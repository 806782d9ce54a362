//! Calibration kit: the open/short/match standard triad
//!
//! A kit owns the frequency grid and reference impedance; standards added
//! to it are built on that grid and are immutable afterwards. The stacked
//! model order (open, short, match) is fixed and significant: it is the
//! order [`crate::solver::network_sparams`] expects for the true values and
//! the order in which measured standards must be supplied.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::CalError;
use crate::frequency::{Frequency, FrequencyUnit};
use crate::gamma::impedance_to_gamma_arr;
use crate::solver::network_sparams;
use crate::standard::{length_times_gamma_arr, offset_impedance_arr, CalStandard};

/// Frequency dependence of a standard's terminal element (C, L, or R)
///
/// Polynomial coefficients are in ascending powers of frequency in Hz,
/// lowest-order term first. Vendor data sheets list C0..C3 / L0..L3 in
/// this order.
#[derive(Debug, Clone)]
pub enum ElementValue {
    /// Frequency-independent value
    Constant(f64),
    /// Polynomial in f (Hz), ascending coefficients
    Polynomial(Vec<f64>),
    /// Per-frequency samples; length must match the kit's grid
    Sampled(Array1<f64>),
}

impl ElementValue {
    /// Evaluate on a frequency grid (Hz).
    fn eval(&self, f: &[f64]) -> Result<Array1<f64>, CalError> {
        match self {
            ElementValue::Constant(c) => Ok(Array1::from_elem(f.len(), *c)),
            ElementValue::Polynomial(coeffs) => Ok(f
                .iter()
                .map(|&fi| coeffs.iter().rev().fold(0.0, |acc, &c| acc * fi + c))
                .collect()),
            ElementValue::Sampled(vals) => {
                if vals.len() != f.len() {
                    return Err(CalError::GridMismatch {
                        expected: f.len(),
                        got: vals.len(),
                    });
                }
                Ok(vals.clone())
            }
        }
    }
}

/// A one-port OSL calibration kit
#[derive(Debug, Clone)]
pub struct CalibrationKit {
    frequency: Frequency,
    z0: f64,
    open: Option<CalStandard>,
    short: Option<CalStandard>,
    load: Option<CalStandard>,
}

impl CalibrationKit {
    /// Create an empty kit on a frequency grid with reference impedance z0
    pub fn new(frequency: Frequency, z0: f64) -> Self {
        Self {
            frequency,
            z0,
            open: None,
            short: None,
            load: None,
        }
    }

    /// Copper Mountain S911T calibration kit
    ///
    /// Cubic capacitance/inductance fits and offset constants from the
    /// vendor definition. The match standard is an ideal 50 ohm load with
    /// no offset line.
    pub fn s911t(frequency: Frequency) -> Self {
        let z0 = 50.0;
        let mut kit = Self::new(frequency, z0);

        // C(f) in farads, ascending coefficients
        let c_open = ElementValue::Polynomial(vec![-7.425e-15, 2470e-27, -226e-36, 6.18e-45]);
        kit.add_open(c_open, 2e9, 30.821e-12)
            .expect("polynomial fit cannot mismatch the grid");

        // L(f) in henries, ascending coefficients
        let l_short = ElementValue::Polynomial(vec![27.98e-12, -5010e-24, 303.8e-33, -6.13e-42]);
        kit.add_short(l_short, 2e9, 30.688e-12)
            .expect("polynomial fit cannot mismatch the grid");

        kit.add_match(z0, 0.0, 0.0);
        kit
    }

    /// Add the open standard from its fringing capacitance.
    ///
    /// Terminal impedance Z = -i / (omega * C); C = 0 is the ideal open
    /// (infinite impedance, gamma exactly 1).
    pub fn add_open(
        &mut self,
        capacitance: ElementValue,
        loss: f64,
        delay: f64,
    ) -> Result<(), CalError> {
        let f = self.frequency.f();
        let cap = capacitance.eval(f)?;
        let omega = self.frequency.omega();
        // real division by zero yields -inf here, which impedance_to_gamma
        // treats as the open-circuit sentinel
        let z_ter: Array1<Complex64> = omega
            .iter()
            .zip(cap.iter())
            .map(|(&w, &c)| Complex64::new(0.0, -1.0 / (w * c)))
            .collect();
        self.open = Some(self.build_standard(&z_ter, loss, delay));
        Ok(())
    }

    /// Add the short standard from its parasitic inductance.
    ///
    /// Terminal impedance Z = i * omega * L; L = 0 is the ideal short
    /// (gamma exactly -1).
    pub fn add_short(
        &mut self,
        inductance: ElementValue,
        loss: f64,
        delay: f64,
    ) -> Result<(), CalError> {
        let f = self.frequency.f();
        let ind = inductance.eval(f)?;
        let omega = self.frequency.omega();
        let z_ter: Array1<Complex64> = omega
            .iter()
            .zip(ind.iter())
            .map(|(&w, &l)| Complex64::new(0.0, w * l))
            .collect();
        self.short = Some(self.build_standard(&z_ter, loss, delay));
        Ok(())
    }

    /// Add the match/load standard from its resistance (nominally z0).
    pub fn add_match(&mut self, resistance: f64, loss: f64, delay: f64) {
        let n = self.frequency.npoints();
        let z_ter = Array1::from_elem(n, Complex64::new(resistance, 0.0));
        self.load = Some(self.build_standard(&z_ter, loss, delay));
    }

    fn build_standard(&self, z_ter: &Array1<Complex64>, loss: f64, delay: f64) -> CalStandard {
        let f = self.frequency.f();
        let z_off = offset_impedance_arr(self.z0, loss, f);
        let lgamma = length_times_gamma_arr(self.z0, loss, delay, f);
        CalStandard::new(z_ter, &z_off, &lgamma, self.z0)
    }

    /// Frequency grid shared by all standards in the kit
    #[inline]
    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    /// Reference impedance
    #[inline]
    pub fn z0(&self) -> f64 {
        self.z0
    }

    /// The open standard, if added
    pub fn open(&self) -> Result<&CalStandard, CalError> {
        self.open.as_ref().ok_or(CalError::MissingStandard("open"))
    }

    /// The short standard, if added
    pub fn short(&self) -> Result<&CalStandard, CalError> {
        self.short.as_ref().ok_or(CalError::MissingStandard("short"))
    }

    /// The match/load standard, if added
    pub fn load(&self) -> Result<&CalStandard, CalError> {
        self.load.as_ref().ok_or(CalError::MissingStandard("match"))
    }

    /// Model reflection coefficients of the three standards, stacked (3, N)
    /// in (open, short, match) order.
    pub fn std_gamma(&self) -> Result<Array2<Complex64>, CalError> {
        let open = self.open()?.gamma();
        let short = self.short()?.gamma();
        let load = self.load()?.gamma();
        let n = self.frequency.npoints();
        let mut out = Array2::zeros((3, n));
        for i in 0..n {
            out[[0, i]] = open[i];
            out[[1, i]] = short[i];
            out[[2, i]] = load[i];
        }
        Ok(out)
    }

    /// Solve for the error-network S-parameters from measured standards.
    ///
    /// `meas` is (3, N) in (open, short, match) order at the desired
    /// reference plane; the kit's own models are the true values.
    pub fn sparams(&self, meas: &Array2<Complex64>) -> Result<Array2<Complex64>, CalError> {
        let model = self.std_gamma()?;
        network_sparams(&model, meas)
    }
}

/// Build the S911T kit on a linear sweep, a convenience for callers that
/// have not constructed a [`Frequency`] yet.
pub fn s911t_linear(start_hz: f64, stop_hz: f64, npoints: usize) -> CalibrationKit {
    CalibrationKit::s911t(Frequency::new(start_hz, stop_hz, npoints, FrequencyUnit::Hz))
}
