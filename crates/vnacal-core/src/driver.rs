//! Instrument driver seam
//!
//! The calibration core never talks to hardware; it consumes reflection-
//! coefficient arrays. This module defines the one stable interface an
//! instrument layer must provide so orchestration code can be written
//! against it, with transports (VISA sockets, simulators, replayed
//! archives) supplied by the caller.

use ndarray::Array1;
use num_complex::Complex64;

use crate::frequency::{Frequency, FrequencyUnit};

/// Sweep settings for a one-port measurement
///
/// Explicit configuration carried by the caller; there are no ambient
/// defaults baked into the core beyond this struct's `Default`.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Start frequency in Hz
    pub fstart_hz: f64,
    /// Stop frequency in Hz
    pub fstop_hz: f64,
    /// Number of sweep points
    pub npoints: usize,
    /// IF bandwidth in Hz
    pub ifbw_hz: f64,
    /// Source power in dBm
    pub power_dbm: f64,
}

impl SweepConfig {
    /// The linear frequency grid this sweep produces
    pub fn frequency(&self) -> Frequency {
        Frequency::new(self.fstart_hz, self.fstop_hz, self.npoints, FrequencyUnit::Hz)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            fstart_hz: 50e6,
            fstop_hz: 250e6,
            npoints: 1001,
            ifbw_hz: 100.0,
            power_dbm: 0.0,
        }
    }
}

/// Capability set of a one-port VNA
///
/// Implemented by the instrument layer, outside this crate. The contract:
/// after `configure_sweep`, `trigger` starts a sweep, `opc` reports sweep
/// completion, and `read_gamma` returns the raw (uncorrected) complex
/// reflection trace with exactly `npoints` entries on the configured grid.
pub trait VnaDriver {
    /// Transport/instrument error type
    type Error: std::error::Error;

    /// Program the sweep settings into the instrument
    fn configure_sweep(&mut self, sweep: &SweepConfig) -> Result<(), Self::Error>;

    /// Start a single sweep
    fn trigger(&mut self) -> Result<(), Self::Error>;

    /// Poll the operation-complete register; true once the sweep finished
    fn opc(&mut self) -> Result<bool, Self::Error>;

    /// Read the raw complex reflection trace from the instrument
    fn read_gamma(&mut self) -> Result<Array1<Complex64>, Self::Error>;
}
