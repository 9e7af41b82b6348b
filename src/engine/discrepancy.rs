//! Estimate-vs-meter discrepancy analysis.
//!
//! Groups readings by calendar day and compares the metered total against the
//! summed device estimates for that day. Days with fewer than two readings
//! carry too little signal and are skipped.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::domain::{ConsumptionDiscrepancy, Device, DiscrepancySeverity, MeterReading, Property};
use crate::engine::estimate::estimate_device_consumption;
use crate::engine::settings::EngineSettings;
use crate::utils::round_to;

const MIN_READINGS_PER_DAY: usize = 2;

/// Compare actual metered consumption against device estimates, per day.
///
/// Returns one record per qualifying day, in date order. An empty reading set
/// yields an empty result; no day ever errors.
pub fn analyze_discrepancies(
    property_id: Uuid,
    devices: &[Device],
    readings: &[MeterReading],
    property: &Property,
    settings: &EngineSettings,
) -> Vec<ConsumptionDiscrepancy> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&MeterReading>> = BTreeMap::new();
    for reading in readings {
        by_day
            .entry(reading.timestamp.date_naive())
            .or_default()
            .push(reading);
    }

    let mut discrepancies = Vec::new();

    for (date, day_readings) in by_day {
        if day_readings.len() < MIN_READINGS_PER_DAY {
            continue;
        }

        let actual_kwh: f64 = day_readings.iter().map(|r| r.consumption_kwh).sum();

        let day_start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let day_end = day_start + Duration::days(1);
        let estimated_kwh: f64 = devices
            .iter()
            .filter(|d| d.active)
            .map(|d| {
                estimate_device_consumption(d, day_start, day_end, property, settings)
                    .estimated_daily_kwh
            })
            .sum();

        let discrepancy_kwh = actual_kwh - estimated_kwh;
        // Guard: a property with no estimated consumption reports 0%, not inf.
        let discrepancy_pct = if estimated_kwh > 0.0 {
            discrepancy_kwh / estimated_kwh * 100.0
        } else {
            0.0
        };

        let severity = if discrepancy_pct.abs() > settings.high_discrepancy_pct {
            DiscrepancySeverity::High
        } else if discrepancy_pct.abs() > settings.medium_discrepancy_pct {
            DiscrepancySeverity::Medium
        } else {
            DiscrepancySeverity::Low
        };

        let description = if discrepancy_kwh > 0.0 {
            format!("Unaccounted consumption of {:.2} kWh detected", discrepancy_kwh)
        } else {
            format!(
                "Devices consuming {:.2} kWh less than metered",
                discrepancy_kwh.abs()
            )
        };

        discrepancies.push(ConsumptionDiscrepancy {
            property_id,
            date,
            total_estimated_kwh: round_to(estimated_kwh, 3),
            actual_metered_kwh: round_to(actual_kwh, 3),
            discrepancy_kwh: round_to(discrepancy_kwh, 3),
            discrepancy_percentage: round_to(discrepancy_pct, 1),
            unaccounted_consumption: discrepancy_kwh.max(0.0),
            severity,
            description,
        });
    }

    discrepancies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DeviceCategory, DeviceDraft, DeviceType, ElectricityTariff, PropertyDraft, PropertyType,
        ReadingSource, Region,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    fn property() -> Property {
        PropertyDraft {
            name: "Test Home".to_string(),
            property_type: PropertyType::Home,
            address: "1 Test Street".to_string(),
            city: "Leuven".to_string(),
            postal_code: "3000".to_string(),
            region: Region::Flanders,
            timezone: "Europe/Brussels".to_string(),
            square_meters: Some(90),
            occupants: Some(3),
            tariff: ElectricityTariff::single(0.25),
            meter_id: Some("BE_TST_000001".to_string()),
        }
        .into_property(Uuid::new_v4())
    }

    fn fridge(property: &Property) -> Device {
        DeviceDraft::new("Fridge", DeviceType::Refrigerator, DeviceCategory::MajorAppliances)
            .with_wattage(150)
            .with_standby_wattage(120)
            .with_runtime(24.0, 168.0)
            .into_device(property.id, property.user_id)
    }

    fn reading(property: &Property, at: DateTime<Utc>, kwh: f64) -> MeterReading {
        MeterReading {
            id: Uuid::new_v4(),
            property_id: property.id,
            user_id: property.user_id,
            meter_id: "BE_TST_000001".to_string(),
            timestamp: at,
            consumption_kwh: kwh,
            production_kwh: 0.0,
            cost_euros: None,
            tariff_rate: None,
            source: ReadingSource::Simulated,
            created_at: Utc::now(),
        }
    }

    fn june_day(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_readings_yield_empty_result() {
        let property = property();
        let devices = vec![fridge(&property)];
        let out = analyze_discrepancies(property.id, &devices, &[], &property, &EngineSettings::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_reading_days_are_skipped() {
        let property = property();
        let devices = vec![fridge(&property)];
        let readings = vec![
            reading(&property, june_day(8), 2.0),
            reading(&property, Utc.with_ymd_and_hms(2026, 6, 16, 8, 0, 0).unwrap(), 2.0),
        ];
        let out =
            analyze_discrepancies(property.id, &devices, &readings, &property, &EngineSettings::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_matching_day_is_low_severity() {
        let property = property();
        let devices = vec![fridge(&property)];
        // Fridge estimates 3.6 kWh/day; meter shows 3.6 split over two readings.
        let readings = vec![
            reading(&property, june_day(8), 1.8),
            reading(&property, june_day(20), 1.8),
        ];
        let out =
            analyze_discrepancies(property.id, &devices, &readings, &property, &EngineSettings::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].severity, DiscrepancySeverity::Low);
        assert!((out[0].discrepancy_kwh).abs() < 1e-9);
        assert_eq!(out[0].unaccounted_consumption, 0.0);
    }

    #[test]
    fn test_high_severity_and_unaccounted() {
        let property = property();
        let devices = vec![fridge(&property)];
        // 6.0 metered vs 3.6 estimated: +66.7%, all of it unaccounted.
        let readings = vec![
            reading(&property, june_day(8), 3.0),
            reading(&property, june_day(20), 3.0),
        ];
        let out =
            analyze_discrepancies(property.id, &devices, &readings, &property, &EngineSettings::default());
        assert_eq!(out[0].severity, DiscrepancySeverity::High);
        assert!((out[0].unaccounted_consumption - 2.4).abs() < 1e-9);
        assert!(out[0].description.contains("Unaccounted"));
    }

    #[test]
    fn test_overestimate_is_not_unaccounted() {
        let property = property();
        let devices = vec![fridge(&property)];
        // 2.8 metered vs 3.6 estimated: -22%, medium, nothing unaccounted.
        let readings = vec![
            reading(&property, june_day(8), 1.4),
            reading(&property, june_day(20), 1.4),
        ];
        let out =
            analyze_discrepancies(property.id, &devices, &readings, &property, &EngineSettings::default());
        assert_eq!(out[0].severity, DiscrepancySeverity::Medium);
        assert_eq!(out[0].unaccounted_consumption, 0.0);
        assert!(out[0].description.contains("less than metered"));
    }

    #[test]
    fn test_zero_estimate_guard() {
        let property = property();
        // No devices at all: estimate is 0, percentage must stay 0.
        let readings = vec![
            reading(&property, june_day(8), 2.5),
            reading(&property, june_day(20), 2.5),
        ];
        let out = analyze_discrepancies(property.id, &[], &readings, &property, &EngineSettings::default());
        assert_eq!(out[0].discrepancy_percentage, 0.0);
        assert!((out[0].unaccounted_consumption - 5.0).abs() < 1e-9);
        assert_eq!(out[0].severity, DiscrepancySeverity::Low);
    }

    #[test]
    fn test_inactive_devices_are_ignored() {
        let property = property();
        let mut inactive = fridge(&property);
        inactive.active = false;
        let readings = vec![
            reading(&property, june_day(8), 1.0),
            reading(&property, june_day(20), 1.0),
        ];
        let out = analyze_discrepancies(
            property.id,
            &[inactive],
            &readings,
            &property,
            &EngineSettings::default(),
        );
        assert_eq!(out[0].total_estimated_kwh, 0.0);
    }

    #[test]
    fn test_days_come_out_in_date_order() {
        use chrono::Datelike;
        let property = property();
        let devices = vec![fridge(&property)];
        let mut readings = Vec::new();
        for day in [17, 15, 16] {
            for hour in [8, 20] {
                readings.push(reading(
                    &property,
                    Utc.with_ymd_and_hms(2026, 6, day, hour, 0, 0).unwrap(),
                    1.8,
                ));
            }
        }
        let out =
            analyze_discrepancies(property.id, &devices, &readings, &property, &EngineSettings::default());
        let dates: Vec<_> = out.iter().map(|d| d.date.day()).collect();
        assert_eq!(dates, vec![15, 16, 17]);
    }

    proptest! {
        #[test]
        fn prop_unaccounted_never_negative(kwh_a in 0.0f64..20.0, kwh_b in 0.0f64..20.0) {
            let property = property();
            let devices = vec![fridge(&property)];
            let readings = vec![
                reading(&property, june_day(8), kwh_a),
                reading(&property, june_day(20), kwh_b),
            ];
            let out = analyze_discrepancies(
                property.id, &devices, &readings, &property, &EngineSettings::default(),
            );
            prop_assert!(out.iter().all(|d| d.unaccounted_consumption >= 0.0));
        }
    }
}
