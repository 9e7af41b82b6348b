//! Alert generation.
//!
//! Three independent rules over the analysis output. Every invocation is a
//! fresh run: records are not deduplicated against earlier runs, so repeated
//! analyses over unchanged data will accumulate duplicates (product decision
//! pending, see DESIGN.md).

use uuid::Uuid;

use crate::domain::{
    AlertKind, AlertSeverity, ConsumptionDiscrepancy, Device, DeviceAlert,
    DeviceConsumptionEstimate, DiscrepancySeverity,
};
use crate::engine::settings::EngineSettings;

/// Produce user-facing alerts from estimates and discrepancies.
///
/// Rules fire independently; a single device can collect several alerts in
/// one run. Persistence is the caller's job.
pub fn generate_alerts(
    property_id: Uuid,
    devices: &[Device],
    estimates: &[DeviceConsumptionEstimate],
    discrepancies: &[ConsumptionDiscrepancy],
    settings: &EngineSettings,
) -> Vec<DeviceAlert> {
    let mut alerts = Vec::new();

    // Devices consuming well above their own nameplate expectation.
    for estimate in estimates {
        let Some(device) = devices.iter().find(|d| d.id == estimate.device_id) else {
            continue;
        };

        let expected_monthly_kwh = expected_monthly_consumption(device);
        if estimate.estimated_monthly_kwh > expected_monthly_kwh * settings.high_consumption_ratio {
            let excess_pct = (settings.high_consumption_ratio - 1.0) * 100.0;
            alerts.push(
                DeviceAlert::new(
                    property_id,
                    AlertKind::HighConsumption,
                    AlertSeverity::Warning,
                    format!("{} - High Consumption Alert", device.name),
                    format!(
                        "{} is consuming {:.1} kWh/month, which is {:.0}% above expected usage.",
                        device.name, estimate.estimated_monthly_kwh, excess_pct
                    ),
                )
                .for_device(device.id)
                .with_impact(
                    estimate.estimated_monthly_kwh - expected_monthly_kwh,
                    estimate.estimated_monthly_cost * (settings.high_consumption_ratio - 1.0),
                ),
            );
        }
    }

    // Meaningful unaccounted consumption on medium/high discrepancy days.
    for discrepancy in discrepancies {
        if discrepancy.severity >= DiscrepancySeverity::Medium
            && discrepancy.unaccounted_consumption > settings.unaccounted_alert_floor_kwh
        {
            let severity = match discrepancy.severity {
                DiscrepancySeverity::High => AlertSeverity::Error,
                _ => AlertSeverity::Warning,
            };
            alerts.push(
                DeviceAlert::new(
                    property_id,
                    AlertKind::AbnormalPattern,
                    severity,
                    "Unaccounted Energy Usage",
                    format!(
                        "Detected {:.2} kWh of unaccounted consumption. This could indicate \
                         unknown devices or measurement errors.",
                        discrepancy.unaccounted_consumption
                    ),
                )
                .with_impact(
                    discrepancy.unaccounted_consumption,
                    discrepancy.unaccounted_consumption * settings.flat_impact_rate,
                ),
            );
        }
    }

    // Estimates too shaky to act on.
    for estimate in estimates {
        if estimate.confidence_score < settings.calibration_confidence_floor {
            if let Some(device) = devices.iter().find(|d| d.id == estimate.device_id) {
                alerts.push(
                    DeviceAlert::new(
                        property_id,
                        AlertKind::CalibrationNeeded,
                        AlertSeverity::Info,
                        format!("{} - Calibration Recommended", device.name),
                        format!(
                            "The consumption estimate for {} has low confidence. Consider \
                             connecting a smart plug or validating runtime hours for better \
                             accuracy.",
                            device.name
                        ),
                    )
                    .for_device(device.id),
                );
            }
        }
    }

    alerts
}

/// Expected monthly kWh from nameplate wattage and runtime alone, without
/// seasonal or occupancy adjustment. The comparison baseline for the
/// high-consumption rule.
fn expected_monthly_consumption(device: &Device) -> f64 {
    device.estimated_wattage as f64 * device.daily_runtime_hours * 30.0 / 1000.0
}
