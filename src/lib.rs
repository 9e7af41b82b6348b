//! HomeWatt: device-level consumption estimation for household energy use.
//!
//! Estimates what each registered appliance consumes from nameplate wattage
//! and runtime, prices the result under Belgian tariff structures, compares
//! the per-day totals against meter readings, and raises alerts on the
//! mismatches worth a user's attention. A seedable meter simulator fills in
//! history when no real readings exist.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod simulation;
pub mod store;
pub mod telemetry;
pub mod utils;
