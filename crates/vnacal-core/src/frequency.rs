//! Frequency grid shared by a calibration session
//!
//! Frequencies are stored internally in Hz. A grid is never re-sorted or
//! resampled: every per-frequency array in a session corresponds to this
//! grid index-for-index.

use std::f64::consts::PI;

/// Frequency unit enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    #[default]
    Hz,
    KHz,
    MHz,
    GHz,
    THz,
}

impl FrequencyUnit {
    /// Get the multiplier to convert to Hz
    pub fn multiplier(&self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
            FrequencyUnit::THz => 1e12,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hz" => Some(FrequencyUnit::Hz),
            "khz" => Some(FrequencyUnit::KHz),
            "mhz" => Some(FrequencyUnit::MHz),
            "ghz" => Some(FrequencyUnit::GHz),
            "thz" => Some(FrequencyUnit::THz),
            _ => None,
        }
    }
}

/// An ordered frequency grid
///
/// One-port instruments sweep linearly, so only a linear constructor is
/// provided; arbitrary grids can still be built with [`Frequency::from_f`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frequency {
    /// Frequency vector in Hz
    f: Vec<f64>,
    /// Display unit
    unit: FrequencyUnit,
}

impl Frequency {
    /// Create a linear sweep from start to stop (inclusive) in the given unit
    pub fn new(start: f64, stop: f64, npoints: usize, unit: FrequencyUnit) -> Self {
        let mult = unit.multiplier();
        let start_hz = start * mult;
        let stop_hz = stop * mult;

        let f = if npoints <= 1 {
            vec![start_hz]
        } else {
            let step = (stop_hz - start_hz) / (npoints - 1) as f64;
            (0..npoints).map(|i| start_hz + i as f64 * step).collect()
        };

        Self { f, unit }
    }

    /// Create from a frequency vector in the given unit
    pub fn from_f(f: Vec<f64>, unit: FrequencyUnit) -> Self {
        let mult = unit.multiplier();
        let f_hz: Vec<f64> = f.iter().map(|&x| x * mult).collect();
        Self { f: f_hz, unit }
    }

    /// Frequency vector in Hz
    #[inline]
    pub fn f(&self) -> &[f64] {
        &self.f
    }

    /// Frequency vector in the display unit
    pub fn f_scaled(&self) -> Vec<f64> {
        let mult = self.unit.multiplier();
        self.f.iter().map(|&x| x / mult).collect()
    }

    /// Angular frequency vector, omega = 2*pi*f in rad/s
    pub fn omega(&self) -> Vec<f64> {
        self.f.iter().map(|&x| 2.0 * PI * x).collect()
    }

    /// Number of frequency points
    #[inline]
    pub fn npoints(&self) -> usize {
        self.f.len()
    }

    /// Start frequency in Hz
    #[inline]
    pub fn start(&self) -> f64 {
        *self.f.first().unwrap_or(&0.0)
    }

    /// Stop frequency in Hz
    #[inline]
    pub fn stop(&self) -> f64 {
        *self.f.last().unwrap_or(&0.0)
    }

    /// Center frequency in Hz
    pub fn center(&self) -> f64 {
        (self.start() + self.stop()) / 2.0
    }

    /// Frequency span in Hz
    #[inline]
    pub fn span(&self) -> f64 {
        self.stop() - self.start()
    }

    /// Display unit
    #[inline]
    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }
}
