//! vnacal-core: One-port (S11) VNA calibration
//!
//! Converts raw reflection-coefficient measurements of open/short/load
//! calibration standards into an error-network correction model, and
//! applies that model to de-embed (or embed) device measurements.
//!
//! ## Modules
//!
//! - `frequency` - Frequency grid representation
//! - `gamma` - Impedance / reflection-coefficient conversion
//! - `standard` - Lossy offset-line model of a calibration standard
//! - `calkit` - OSL calibration kits (including the Copper Mountain S911T)
//! - `solver` - Error-network solve, embed and de-embed transforms
//! - `session` - Accumulated state of one calibration run
//! - `driver` - Instrument seam implemented by the orchestration layer

pub mod calkit;
pub mod constants;
pub mod driver;
pub mod error;
pub mod frequency;
pub mod gamma;
pub mod session;
pub mod solver;
pub mod standard;

pub use calkit::{CalibrationKit, ElementValue};
pub use error::CalError;
pub use frequency::{Frequency, FrequencyUnit};
pub use session::S11Session;
pub use solver::{de_embed, embed, network_sparams};
pub use standard::CalStandard;
