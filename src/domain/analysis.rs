use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived consumption figures for one device over a window.
///
/// Never persisted; recomputed on demand. Weekly and monthly figures are
/// fixed multiples of the daily figure (x7 and x30), not calendar-accurate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConsumptionEstimate {
    pub device_id: Uuid,
    pub device_name: String,
    pub estimated_daily_kwh: f64,
    pub estimated_weekly_kwh: f64,
    pub estimated_monthly_kwh: f64,
    pub estimated_daily_cost: f64,
    pub estimated_weekly_cost: f64,
    pub estimated_monthly_cost: f64,
    /// Heuristic trust indicator in [0, 1].
    pub confidence_score: f64,
}

/// Severity tier for a daily estimate-vs-meter mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DiscrepancySeverity {
    Low,
    Medium,
    High,
}

/// Per-day comparison of summed device estimates against metered totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumptionDiscrepancy {
    pub property_id: Uuid,
    pub date: NaiveDate,
    pub total_estimated_kwh: f64,
    pub actual_metered_kwh: f64,
    /// Actual minus estimated; negative when devices over-estimate.
    pub discrepancy_kwh: f64,
    pub discrepancy_percentage: f64,
    /// Positive part of the discrepancy. Always >= 0.
    pub unaccounted_consumption: f64,
    pub severity: DiscrepancySeverity,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertKind {
    HighConsumption,
    AbnormalPattern,
    CalibrationNeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
}

/// User-facing alert produced by an analysis run.
///
/// Runs are independent and emit fresh records each time; there is no dedup
/// key, so repeated runs over the same data accumulate duplicates. Mutable
/// only via the acknowledge/resolve flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceAlert {
    pub id: Uuid,
    pub property_id: Uuid,
    pub device_id: Option<Uuid>,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub estimated_impact_kwh: Option<f64>,
    pub estimated_impact_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub acknowledged: bool,
    pub resolved: bool,
}

impl DeviceAlert {
    pub fn new(
        property_id: Uuid,
        kind: AlertKind,
        severity: AlertSeverity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            device_id: None,
            kind,
            severity,
            title: title.into(),
            message: message.into(),
            estimated_impact_kwh: None,
            estimated_impact_cost: None,
            created_at: Utc::now(),
            acknowledged: false,
            resolved: false,
        }
    }

    pub fn for_device(mut self, device_id: Uuid) -> Self {
        self.device_id = Some(device_id);
        self
    }

    pub fn with_impact(mut self, kwh: f64, cost: f64) -> Self {
        self.estimated_impact_kwh = Some(kwh);
        self.estimated_impact_cost = Some(cost);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(DiscrepancySeverity::High > DiscrepancySeverity::Medium);
        assert!(DiscrepancySeverity::Medium > DiscrepancySeverity::Low);
        assert!(AlertSeverity::Error > AlertSeverity::Warning);
    }

    #[test]
    fn test_alert_builder() {
        let property_id = Uuid::new_v4();
        let device_id = Uuid::new_v4();
        let alert = DeviceAlert::new(
            property_id,
            AlertKind::HighConsumption,
            AlertSeverity::Warning,
            "High Consumption Alert",
            "above expected usage",
        )
        .for_device(device_id)
        .with_impact(12.5, 3.1);

        assert_eq!(alert.device_id, Some(device_id));
        assert_eq!(alert.estimated_impact_kwh, Some(12.5));
        assert!(!alert.acknowledged);
        assert!(!alert.resolved);
    }
}
