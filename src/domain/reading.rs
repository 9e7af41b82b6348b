use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a meter reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReadingSource {
    Manual,
    ApiFluvius,
    ApiLuminus,
    ApiEngie,
    CsvUpload,
    P1Dongle,
    Simulated,
}

/// An immutable time-stamped consumption fact for one property.
///
/// Readings are append-only: once recorded they are never updated, corrections
/// arrive as new readings from the same source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterReading {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user_id: Uuid,
    pub meter_id: String,
    pub timestamp: DateTime<Utc>,
    pub consumption_kwh: f64,
    /// Solar/renewable production in the same interval.
    #[serde(default)]
    pub production_kwh: f64,
    pub cost_euros: Option<f64>,
    /// Tariff rate in effect when the reading was taken, in EUR/kWh.
    pub tariff_rate: Option<f64>,
    pub source: ReadingSource,
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a reading against a property the caller owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterReadingDraft {
    pub meter_id: String,
    pub timestamp: DateTime<Utc>,
    pub consumption_kwh: f64,
    #[serde(default)]
    pub production_kwh: f64,
    pub cost_euros: Option<f64>,
    pub tariff_rate: Option<f64>,
    #[serde(default = "default_source")]
    pub source: ReadingSource,
}

fn default_source() -> ReadingSource {
    ReadingSource::Manual
}

impl MeterReadingDraft {
    pub fn into_reading(self, property_id: Uuid, user_id: Uuid) -> MeterReading {
        MeterReading {
            id: Uuid::new_v4(),
            property_id,
            user_id,
            meter_id: self.meter_id,
            timestamp: self.timestamp,
            consumption_kwh: self.consumption_kwh,
            production_kwh: self.production_kwh,
            cost_euros: self.cost_euros,
            tariff_rate: self.tariff_rate,
            source: self.source,
            created_at: Utc::now(),
        }
    }
}
