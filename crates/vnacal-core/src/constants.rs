//! Numerical constants for one-port calibration
//!
//! Standardized tolerance values and physical defaults used throughout
//! the library.

/// Tolerance for detecting near-zero denominators in embed/de-embed.
/// Used to report degenerate error networks instead of emitting inf/nan.
pub const NEAR_ZERO: f64 = 1e-15;

/// Default characteristic impedance in ohms.
pub const DEFAULT_Z0: f64 = 50.0;

/// Reference frequency for the offset-line loss model, in Hz.
/// Vendor kits specify loss at 1 GHz; the model scales it by sqrt(f / 1 GHz).
pub const LOSS_REF_FREQ: f64 = 1e9;
