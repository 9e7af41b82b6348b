//! # Consumption Analysis Engine
//!
//! The single source of truth for all consumption math: tariff costs, device
//! estimates, estimate-vs-meter discrepancies, and the alerts derived from
//! them. Every caller goes through here; no request handler carries its own
//! copy of the formulas.
//!
//! All operations are synchronous pure functions over in-memory collections.
//! The engine holds no mutable state; tunable factors are injected once via
//! [`EngineSettings`].

pub mod alerts;
pub mod discrepancy;
pub mod estimate;
pub mod settings;
pub mod tariff;

pub use alerts::generate_alerts;
pub use discrepancy::analyze_discrepancies;
pub use estimate::{confidence_score, estimate_device_consumption};
pub use settings::EngineSettings;
pub use tariff::{cost_for_energy, rate_for_hour};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    ConsumptionDiscrepancy, Device, DeviceAlert, DeviceConsumptionEstimate, ElectricityTariff,
    MeterReading, Property,
};
use crate::utils::round_to;

/// Consumption analysis over already-fetched property data.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    settings: EngineSettings,
}

/// Everything one analysis run produces for a property.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub property_id: Uuid,
    pub period_days: i64,
    pub estimates: Vec<DeviceConsumptionEstimate>,
    pub discrepancies: Vec<ConsumptionDiscrepancy>,
    pub alerts: Vec<DeviceAlert>,
    pub summary: AnalysisSummary,
}

/// Aggregate figures for the dashboard header.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub total_devices: usize,
    pub total_estimated_kwh: f64,
    pub total_actual_kwh: f64,
    pub total_estimated_cost: f64,
    pub total_actual_cost: f64,
    /// How closely estimates track the meter, as a percentage. 0 when there
    /// is no metered consumption to compare against.
    pub accuracy_percentage: f64,
    pub meter_readings_count: usize,
}

impl AnalysisEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Cost in EUR for an energy quantity under a tariff.
    pub fn cost_for_energy(&self, kwh: f64, tariff: &ElectricityTariff) -> f64 {
        cost_for_energy(kwh, tariff, &self.settings)
    }

    /// Estimate one device's consumption over a window.
    pub fn estimate_device_consumption(
        &self,
        device: &Device,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        property: &Property,
    ) -> DeviceConsumptionEstimate {
        estimate_device_consumption(device, start, end, property, &self.settings)
    }

    /// Per-day discrepancies between device estimates and meter readings.
    pub fn analyze_discrepancies(
        &self,
        property_id: Uuid,
        devices: &[Device],
        readings: &[MeterReading],
        property: &Property,
    ) -> Vec<ConsumptionDiscrepancy> {
        analyze_discrepancies(property_id, devices, readings, property, &self.settings)
    }

    /// Alerts derived from estimates and discrepancies.
    pub fn generate_alerts(
        &self,
        property_id: Uuid,
        devices: &[Device],
        estimates: &[DeviceConsumptionEstimate],
        discrepancies: &[ConsumptionDiscrepancy],
    ) -> Vec<DeviceAlert> {
        generate_alerts(property_id, devices, estimates, discrepancies, &self.settings)
    }

    /// Run the full pipeline for a property: estimates for every active
    /// device over the trailing `period_days`, discrepancies against the
    /// supplied readings, alerts, and summary totals.
    pub fn analysis_report(
        &self,
        property: &Property,
        devices: &[Device],
        readings: &[MeterReading],
        period_days: i64,
    ) -> AnalysisReport {
        let end = Utc::now();
        let start = end - Duration::days(period_days.max(1));

        let active_devices: Vec<&Device> = devices.iter().filter(|d| d.active).collect();
        let estimates: Vec<DeviceConsumptionEstimate> = active_devices
            .iter()
            .map(|d| self.estimate_device_consumption(d, start, end, property))
            .collect();

        let discrepancies = self.analyze_discrepancies(property.id, devices, readings, property);
        let alerts = self.generate_alerts(property.id, devices, &estimates, &discrepancies);

        let period = period_days.max(1) as f64;
        let total_estimated_kwh: f64 =
            estimates.iter().map(|e| e.estimated_daily_kwh).sum::<f64>() * period;
        let total_actual_kwh: f64 = readings.iter().map(|r| r.consumption_kwh).sum();
        let total_estimated_cost: f64 =
            estimates.iter().map(|e| e.estimated_daily_cost).sum::<f64>() * period;
        let total_actual_cost: f64 = readings.iter().filter_map(|r| r.cost_euros).sum();

        let accuracy_percentage = if total_actual_kwh > 0.0 {
            (1.0 - (total_actual_kwh - total_estimated_kwh).abs() / total_actual_kwh) * 100.0
        } else {
            0.0
        };

        AnalysisReport {
            property_id: property.id,
            period_days: period_days.max(1),
            summary: AnalysisSummary {
                total_devices: active_devices.len(),
                total_estimated_kwh: round_to(total_estimated_kwh, 2),
                total_actual_kwh: round_to(total_actual_kwh, 2),
                total_estimated_cost: round_to(total_estimated_cost, 2),
                total_actual_cost: round_to(total_actual_cost, 2),
                accuracy_percentage: round_to(accuracy_percentage, 1),
                meter_readings_count: readings.len(),
            },
            estimates,
            discrepancies,
            alerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DeviceCategory, DeviceDraft, DeviceType, ElectricityTariff, PropertyDraft, PropertyType,
        ReadingSource, Region,
    };

    #[test]
    fn test_report_summary_counts_active_devices_only() {
        let property = PropertyDraft {
            name: "Home".to_string(),
            property_type: PropertyType::Home,
            address: "1 Street".to_string(),
            city: "Brussels".to_string(),
            postal_code: "1000".to_string(),
            region: Region::Brussels,
            timezone: "Europe/Brussels".to_string(),
            square_meters: None,
            occupants: Some(3),
            tariff: ElectricityTariff::single(0.25),
            meter_id: None,
        }
        .into_property(Uuid::new_v4());

        let active = DeviceDraft::new("Fridge", DeviceType::Refrigerator, DeviceCategory::MajorAppliances)
            .with_wattage(150)
            .with_runtime(24.0, 168.0)
            .into_device(property.id, property.user_id);
        let mut retired = active.clone();
        retired.id = Uuid::new_v4();
        retired.active = false;

        let engine = AnalysisEngine::default();
        let report = engine.analysis_report(&property, &[active, retired], &[], 7);

        assert_eq!(report.summary.total_devices, 1);
        assert_eq!(report.estimates.len(), 1);
        assert_eq!(report.summary.total_actual_kwh, 0.0);
        assert_eq!(report.summary.accuracy_percentage, 0.0);
        assert!(report.discrepancies.is_empty());
    }

    #[test]
    fn test_report_totals_scale_with_period() {
        let property = PropertyDraft {
            name: "Home".to_string(),
            property_type: PropertyType::Home,
            address: "1 Street".to_string(),
            city: "Brussels".to_string(),
            postal_code: "1000".to_string(),
            region: Region::Brussels,
            timezone: "Europe/Brussels".to_string(),
            square_meters: None,
            occupants: Some(3),
            tariff: ElectricityTariff::single(0.25),
            meter_id: None,
        }
        .into_property(Uuid::new_v4());
        let device = DeviceDraft::new("Fridge", DeviceType::Refrigerator, DeviceCategory::MajorAppliances)
            .with_wattage(150)
            .with_runtime(24.0, 168.0)
            .into_device(property.id, property.user_id);

        let engine = AnalysisEngine::default();
        let report = engine.analysis_report(&property, std::slice::from_ref(&device), &[], 7);
        // 3.6 kWh/day over 7 days.
        assert!((report.summary.total_estimated_kwh - 25.2).abs() < 1e-9);
    }

    #[test]
    fn test_report_actual_totals_from_readings() {
        let property = PropertyDraft {
            name: "Home".to_string(),
            property_type: PropertyType::Home,
            address: "1 Street".to_string(),
            city: "Brussels".to_string(),
            postal_code: "1000".to_string(),
            region: Region::Brussels,
            timezone: "Europe/Brussels".to_string(),
            square_meters: None,
            occupants: Some(3),
            tariff: ElectricityTariff::single(0.25),
            meter_id: None,
        }
        .into_property(Uuid::new_v4());

        let readings: Vec<MeterReading> = (0..4)
            .map(|i| MeterReading {
                id: Uuid::new_v4(),
                property_id: property.id,
                user_id: property.user_id,
                meter_id: "M".to_string(),
                timestamp: Utc::now() - Duration::hours(i),
                consumption_kwh: 1.5,
                production_kwh: 0.0,
                cost_euros: Some(0.45),
                tariff_rate: None,
                source: ReadingSource::Simulated,
                created_at: Utc::now(),
            })
            .collect();

        let engine = AnalysisEngine::default();
        let report = engine.analysis_report(&property, &[], &readings, 1);
        assert!((report.summary.total_actual_kwh - 6.0).abs() < 1e-9);
        assert!((report.summary.total_actual_cost - 1.8).abs() < 1e-9);
        assert_eq!(report.summary.meter_readings_count, 4);
    }
}
