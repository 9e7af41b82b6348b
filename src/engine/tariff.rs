//! Tariff cost math.
//!
//! One rate-selection rule per tariff kind, then grid cost and taxes on top.
//! Pure functions of (energy, tariff, settings); callers round for display.

use crate::domain::{ElectricityTariff, TariffKind};
use crate::engine::settings::EngineSettings;

// Fixed clock boundaries for hour-dependent rates. Only the mock-generation
// path uses these; the blended cost below deliberately ignores the clock.
const DUAL_DAY_START_HOUR: u32 = 7;
const DUAL_DAY_END_HOUR: u32 = 22;
const DYNAMIC_PEAK_HOURS: std::ops::RangeInclusive<u32> = 17..=20;
const DYNAMIC_MID_HOURS: std::ops::RangeInclusive<u32> = 11..=16;
const DYNAMIC_PEAK_MULTIPLIER: f64 = 1.5;
const DYNAMIC_MID_MULTIPLIER: f64 = 1.2;
const DYNAMIC_OFF_PEAK_MULTIPLIER: f64 = 0.8;

/// Cost in EUR for `kwh` of energy under `tariff`.
///
/// Dual tariffs use a fixed day/night blend rather than a clock-based split;
/// dynamic tariffs fall back to their base rate here (the time-of-use curve
/// only exists in the simulation path). Unset rates take the configured
/// defaults. The fixed monthly subscription is not included.
pub fn cost_for_energy(kwh: f64, tariff: &ElectricityTariff, settings: &EngineSettings) -> f64 {
    let rate = match tariff.kind {
        TariffKind::Single => tariff.single_rate.unwrap_or(settings.default_single_rate),
        TariffKind::Dual => {
            let day = tariff.day_rate.unwrap_or(settings.default_day_rate);
            let night = tariff.night_rate.unwrap_or(settings.default_night_rate);
            day * settings.day_rate_share + night * (1.0 - settings.day_rate_share)
        }
        TariffKind::Dynamic => tariff.single_rate.unwrap_or(settings.default_dynamic_rate),
    };

    let energy_cost = kwh * rate;
    let grid_cost = kwh * tariff.grid_cost;
    let before_tax = energy_cost + grid_cost;
    before_tax * (1.0 + tariff.taxes_percentage / 100.0)
}

/// Rate in EUR/kWh in effect at a given hour of the day (0-23).
///
/// Used when stamping simulated readings: dual tariffs split at fixed day
/// hours, dynamic tariffs apply peak/mid/off-peak multipliers to the base
/// rate, single tariffs are flat.
pub fn rate_for_hour(hour: u32, tariff: &ElectricityTariff, settings: &EngineSettings) -> f64 {
    match tariff.kind {
        TariffKind::Single => tariff.single_rate.unwrap_or(settings.default_single_rate),
        TariffKind::Dual => {
            if (DUAL_DAY_START_HOUR..DUAL_DAY_END_HOUR).contains(&hour) {
                tariff.day_rate.unwrap_or(settings.default_day_rate)
            } else {
                tariff.night_rate.unwrap_or(settings.default_night_rate)
            }
        }
        TariffKind::Dynamic => {
            let base = tariff.single_rate.unwrap_or(settings.default_dynamic_rate);
            if DYNAMIC_PEAK_HOURS.contains(&hour) {
                base * DYNAMIC_PEAK_MULTIPLIER
            } else if DYNAMIC_MID_HOURS.contains(&hour) {
                base * DYNAMIC_MID_MULTIPLIER
            } else {
                base * DYNAMIC_OFF_PEAK_MULTIPLIER
            }
        }
    }
}
