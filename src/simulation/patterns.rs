//! Hour-indexed usage-probability curves per device type.
//!
//! Each curve gives the probability that a device of that type is running at
//! a given hour of day. Curves are plausible household rhythms, not measured
//! data; they exist so simulated meters look like a lived-in home.

use serde::{Deserialize, Serialize};

use crate::domain::DeviceType;

/// Probability curves injected into the meter simulator.
///
/// Deserializable so deployments (and tests) can supply their own curves
/// instead of the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsagePatterns {
    /// Refrigerators, routers: running around the clock.
    pub always_on: [f64; 24],
    /// TV, gaming console: evening peak, morning and lunch bumps.
    pub entertainment: [f64; 24],
    /// PC, laptop: office hours plus some evening work.
    pub work: [f64; 24],
    /// Washing machine: daytime loads, evening secondary peak.
    pub appliance: [f64; 24],
    /// Dishwasher: after dinner.
    pub evening: [f64; 24],
    /// EV charger: overnight charging.
    pub charging: [f64; 24],
    /// Lighting: morning and evening, dark hours.
    pub lighting: [f64; 24],
    /// Heat pump and friends: morning warmup, evening comfort, night setback.
    pub heating: [f64; 24],
    /// Water heater: shower times.
    pub water_heating: [f64; 24],
    /// Device types with no curve of their own.
    pub fallback: f64,
}

/// Build a curve from a base probability and override bands of
/// (start hour, end hour inclusive, probability).
fn curve(base: f64, bands: &[(usize, usize, f64)]) -> [f64; 24] {
    let mut hours = [base; 24];
    for &(start, end, p) in bands {
        for h in start..=end.min(23) {
            hours[h] = p;
        }
    }
    hours
}

impl Default for UsagePatterns {
    fn default() -> Self {
        Self {
            always_on: [1.0; 24],
            entertainment: curve(0.1, &[(7, 9, 0.3), (12, 14, 0.4), (18, 23, 0.8)]),
            work: curve(0.1, &[(8, 18, 0.7), (19, 22, 0.4)]),
            appliance: curve(0.05, &[(10, 16, 0.3), (19, 21, 0.5)]),
            evening: curve(0.05, &[(19, 22, 0.6)]),
            charging: curve(0.1, &[(22, 23, 0.8), (0, 6, 0.8)]),
            lighting: curve(0.1, &[(6, 8, 0.8), (17, 23, 0.9)]),
            heating: curve(0.2, &[(1, 5, 0.3), (6, 9, 0.7), (17, 22, 0.8)]),
            water_heating: curve(0.2, &[(6, 9, 0.8), (18, 21, 0.6)]),
            fallback: 0.1,
        }
    }
}

impl UsagePatterns {
    /// Probability that a device of `device_type` is running at `hour`.
    pub fn probability(&self, device_type: DeviceType, hour: u32) -> f64 {
        let hour = (hour % 24) as usize;
        match device_type {
            DeviceType::Refrigerator | DeviceType::Router => self.always_on[hour],
            DeviceType::Tv | DeviceType::GamingConsole => self.entertainment[hour],
            DeviceType::Pc | DeviceType::Laptop => self.work[hour],
            DeviceType::WashingMachine => self.appliance[hour],
            DeviceType::Dishwasher => self.evening[hour],
            DeviceType::EvCharger => self.charging[hour],
            DeviceType::LedLights | DeviceType::SmartBulbs => self.lighting[hour],
            DeviceType::HeatPump => self.heating[hour],
            DeviceType::WaterHeater => self.water_heating[hour],
            _ => self.fallback,
        }
    }
}
