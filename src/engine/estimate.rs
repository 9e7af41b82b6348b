//! Per-device consumption estimates.
//!
//! Nameplate wattage x runtime, standby for the rest of the day, then the
//! seasonal and occupancy multipliers. The weekly and monthly figures are
//! fixed multiples of the daily figure, not calendar-accurate.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{Device, DeviceConsumptionEstimate, Property};
use crate::engine::settings::EngineSettings;
use crate::engine::tariff::cost_for_energy;
use crate::utils::round_to;

const BASE_CONFIDENCE: f64 = 0.5;
const SMART_INTEGRATION_BONUS: f64 = 0.3;
const BRAND_MODEL_BONUS: f64 = 0.1;
const ENERGY_RATING_BONUS: f64 = 0.1;
const RUNTIME_KNOWN_BONUS: f64 = 0.1;

/// Estimate a device's consumption over `[start, end)`.
///
/// The window selects the month for the seasonal factor; runtime hours above
/// 24 are the caller's problem and flow through unvalidated. Energy figures
/// are rounded to 3 decimals, costs to 2.
pub fn estimate_device_consumption(
    device: &Device,
    start: DateTime<Utc>,
    _end: DateTime<Utc>,
    property: &Property,
    settings: &EngineSettings,
) -> DeviceConsumptionEstimate {
    let active_kwh = device.estimated_wattage as f64 * device.daily_runtime_hours / 1000.0;
    let standby_kwh = device.standby_wattage as f64 * (24.0 - device.daily_runtime_hours) / 1000.0;
    let base_daily_kwh = active_kwh + standby_kwh;

    let seasonal_factor = if device.is_seasonal() {
        settings.seasonal_factor(start.month())
    } else {
        1.0
    };
    let occupancy_factor = settings.occupancy_factor(property.occupants);

    let daily_kwh = round_to(base_daily_kwh * seasonal_factor * occupancy_factor, 3);
    // Derive from the rounded daily figure so weekly == daily*7 and
    // monthly == daily*30 hold exactly on the reported values.
    let weekly_kwh = round_to(daily_kwh * 7.0, 3);
    let monthly_kwh = round_to(daily_kwh * 30.0, 3);

    DeviceConsumptionEstimate {
        device_id: device.id,
        device_name: device.name.clone(),
        estimated_daily_kwh: daily_kwh,
        estimated_weekly_kwh: weekly_kwh,
        estimated_monthly_kwh: monthly_kwh,
        estimated_daily_cost: round_to(cost_for_energy(daily_kwh, &property.tariff, settings), 2),
        estimated_weekly_cost: round_to(cost_for_energy(weekly_kwh, &property.tariff, settings), 2),
        estimated_monthly_cost: round_to(cost_for_energy(monthly_kwh, &property.tariff, settings), 2),
        confidence_score: confidence_score(device),
    }
}

/// Heuristic trust score for a device's estimate, clamped to [0, 1].
///
/// Starts at 0.5 and accumulates fixed bonuses for each signal that the
/// nameplate data is grounded in something observable.
pub fn confidence_score(device: &Device) -> f64 {
    let mut score = BASE_CONFIDENCE;

    if device.smart_integration_id.is_some() {
        score += SMART_INTEGRATION_BONUS;
    }
    if device.brand.is_some() && device.model.is_some() {
        score += BRAND_MODEL_BONUS;
    }
    if device.energy_rating.is_some() {
        score += ENERGY_RATING_BONUS;
    }
    if device.daily_runtime_hours > 0.0 {
        score += RUNTIME_KNOWN_BONUS;
    }

    score.clamp(0.0, 1.0)
}
