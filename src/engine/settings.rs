use serde::{Deserialize, Serialize};

/// Tunable tables and thresholds for the analysis engine.
///
/// Everything the engine looks up at runtime lives here so the factors can be
/// swapped per deployment (or per test) instead of being baked into the math.
/// Defaults reproduce the Belgian residential profile the product ships with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Month-indexed consumption multiplier (January first) applied to
    /// heating/cooling and water-heating devices. Peaks in winter.
    pub seasonal_factors: [f64; 12],

    /// Occupancy adjustment: above this many occupants the estimate scales up.
    pub large_household_occupants: u32,
    pub large_household_factor: f64,
    /// Below this many occupants the estimate scales down.
    pub small_household_occupants: u32,
    pub small_household_factor: f64,

    /// Fallback rates in EUR/kWh for tariffs with unset fields.
    pub default_single_rate: f64,
    pub default_day_rate: f64,
    pub default_night_rate: f64,
    pub default_dynamic_rate: f64,
    /// Share of consumption billed at the day rate for dual tariffs.
    /// The remainder is billed at the night rate.
    pub day_rate_share: f64,

    /// A device's monthly estimate must exceed its expected figure by this
    /// ratio before a high-consumption alert fires.
    pub high_consumption_ratio: f64,
    /// Minimum unaccounted kWh before a discrepancy becomes an alert.
    pub unaccounted_alert_floor_kwh: f64,
    /// Flat EUR/kWh used to price unaccounted consumption in alerts.
    pub flat_impact_rate: f64,
    /// Estimates below this confidence trigger a calibration alert.
    pub calibration_confidence_floor: f64,

    /// Absolute discrepancy percentage above which a day is tiered high.
    pub high_discrepancy_pct: f64,
    /// Absolute discrepancy percentage above which a day is tiered medium.
    pub medium_discrepancy_pct: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            seasonal_factors: [1.3, 1.2, 1.1, 0.9, 0.8, 0.8, 0.9, 0.9, 0.8, 0.9, 1.1, 1.3],
            large_household_occupants: 4,
            large_household_factor: 1.2,
            small_household_occupants: 2,
            small_household_factor: 0.8,
            default_single_rate: 0.25,
            default_day_rate: 0.28,
            default_night_rate: 0.20,
            default_dynamic_rate: 0.24,
            day_rate_share: 0.6,
            high_consumption_ratio: 1.3,
            unaccounted_alert_floor_kwh: 1.0,
            flat_impact_rate: 0.25,
            calibration_confidence_floor: 0.6,
            high_discrepancy_pct: 30.0,
            medium_discrepancy_pct: 15.0,
        }
    }
}

impl EngineSettings {
    /// Seasonal multiplier for a calendar month (1-12). Months outside that
    /// range fall back to 1.0 rather than panicking.
    pub fn seasonal_factor(&self, month: u32) -> f64 {
        match month {
            1..=12 => self.seasonal_factors[(month - 1) as usize],
            _ => 1.0,
        }
    }

    /// Occupancy multiplier. Unknown occupancy means no adjustment.
    pub fn occupancy_factor(&self, occupants: Option<u32>) -> f64 {
        match occupants {
            Some(n) if n > self.large_household_occupants => self.large_household_factor,
            Some(n) if n < self.small_household_occupants => self.small_household_factor,
            _ => 1.0,
        }
    }
}
