//! One-port measurement session
//!
//! Holds everything a calibration run accumulates, keyed by network name
//! (a "network" being one error network: a VNA port plus whatever cabling
//! sits in front of it). Replaces the original workflow's loose
//! dict-of-arrays accumulators with an explicit object owning one
//! frequency grid; every array entering the session must match that grid.

use std::collections::HashMap;

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::calkit::CalibrationKit;
use crate::error::CalError;
use crate::frequency::Frequency;
use crate::solver::{de_embed, embed, network_sparams};

/// Accumulated state of one S11 calibration session
#[derive(Debug, Clone, Default)]
pub struct S11Session {
    frequency: Option<Frequency>,
    /// Measured OSL standards per network, (3, N) in (open, short, match) order
    standards: HashMap<String, Array2<Complex64>>,
    /// Solved error-network S-parameters per network, (3, N)
    sparams: HashMap<String, Array2<Complex64>>,
    /// Calibrated reflection coefficients, keyed by measurement label
    gamma: HashMap<String, Array1<Complex64>>,
}

impl S11Session {
    /// Create a session on a fixed frequency grid
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency: Some(frequency),
            ..Self::default()
        }
    }

    /// The session's frequency grid, if one has been set
    pub fn frequency(&self) -> Option<&Frequency> {
        self.frequency.as_ref()
    }

    fn check_grid(&self, ncols: usize) -> Result<(), CalError> {
        if let Some(freq) = &self.frequency {
            if freq.npoints() != ncols {
                return Err(CalError::GridMismatch {
                    expected: freq.npoints(),
                    got: ncols,
                });
            }
        }
        Ok(())
    }

    /// Store measured OSL standards for a network.
    pub fn add_standards(&mut self, network: &str, meas: Array2<Complex64>) -> Result<(), CalError> {
        if meas.nrows() != 3 {
            return Err(CalError::ShapeMismatch {
                expected: "standards with first axis of length 3".into(),
                got: format!("({}, {})", meas.nrows(), meas.ncols()),
            });
        }
        self.check_grid(meas.ncols())?;
        self.standards.insert(network.to_string(), meas);
        Ok(())
    }

    /// Solve for a network's error S-parameters from its stored standards.
    ///
    /// `model` supplies the true reflection coefficients; when `None`, the
    /// kit's own models are used. The solved (3, N) sparams are stored and
    /// returned by reference.
    pub fn solve(
        &mut self,
        network: &str,
        kit: &CalibrationKit,
        model: Option<&Array2<Complex64>>,
    ) -> Result<&Array2<Complex64>, CalError> {
        let meas = self
            .standards
            .get(network)
            .ok_or_else(|| CalError::UnknownNetwork(network.to_string()))?;
        let sprms = match model {
            Some(m) => network_sparams(m, meas)?,
            None => kit.sparams(meas)?,
        };
        self.sparams.insert(network.to_string(), sprms);
        Ok(&self.sparams[network])
    }

    /// Store externally solved S-parameters for a network.
    pub fn add_sparams(&mut self, network: &str, sprms: Array2<Complex64>) -> Result<(), CalError> {
        if sprms.nrows() != 3 {
            return Err(CalError::ShapeMismatch {
                expected: "sparams with first axis of length 3".into(),
                got: format!("({}, {})", sprms.nrows(), sprms.ncols()),
            });
        }
        self.check_grid(sprms.ncols())?;
        self.sparams.insert(network.to_string(), sprms);
        Ok(())
    }

    /// Solved S-parameters of a network.
    pub fn sparams(&self, network: &str) -> Result<&Array2<Complex64>, CalError> {
        self.sparams
            .get(network)
            .ok_or_else(|| CalError::UnknownNetwork(network.to_string()))
    }

    /// Measured standards of a network.
    pub fn standards(&self, network: &str) -> Result<&Array2<Complex64>, CalError> {
        self.standards
            .get(network)
            .ok_or_else(|| CalError::UnknownNetwork(network.to_string()))
    }

    /// De-embed a raw measurement through a network's solved sparams and
    /// store the calibrated result under `label`.
    pub fn de_embed(
        &mut self,
        network: &str,
        label: &str,
        observed: &Array1<Complex64>,
    ) -> Result<&Array1<Complex64>, CalError> {
        self.check_grid(observed.len())?;
        let sprms = self.sparams(network)?;
        let intrinsic = de_embed(sprms, observed)?;
        self.gamma.insert(label.to_string(), intrinsic);
        Ok(&self.gamma[label])
    }

    /// Predict what a device would measure as through a network's sparams.
    pub fn embed(
        &self,
        network: &str,
        intrinsic: &Array1<Complex64>,
    ) -> Result<Array1<Complex64>, CalError> {
        self.check_grid(intrinsic.len())?;
        embed(self.sparams(network)?, intrinsic)
    }

    /// A calibrated gamma stored earlier under `label`.
    pub fn gamma(&self, label: &str) -> Option<&Array1<Complex64>> {
        self.gamma.get(label)
    }

    /// Labels of all calibrated gammas
    pub fn gamma_labels(&self) -> impl Iterator<Item = &str> {
        self.gamma.keys().map(String::as_str)
    }

    /// Names of all networks with solved sparams
    pub fn networks(&self) -> impl Iterator<Item = &str> {
        self.sparams.keys().map(String::as_str)
    }
}
