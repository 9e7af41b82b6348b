//! # Meter Simulation Module
//!
//! Synthesizes plausible hourly meter readings from a property's device list,
//! used whenever real metering data is absent (demos, scenario bootstrap,
//! tests).
//!
//! ## Components
//!
//! - **Patterns**: per-device-type hour-indexed usage-probability curves
//! - **Meter**: the seedable generator combining curves, seasonal factors,
//!   base load, and jitter into a reading series

pub mod meter;
pub mod patterns;

pub use meter::{MeterSimulator, SimulatorConfig};
pub use patterns::UsagePatterns;
