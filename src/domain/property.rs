use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Belgian region a property is billed in. Determines which subsidy and grid
/// operator rules apply upstream; the engine itself only carries it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Region {
    Brussels,
    Flanders,
    Wallonia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PropertyType {
    Home,
    Office,
    Rental,
    Vacation,
    Other,
}

/// Electricity tariff structure embedded in a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffKind {
    /// Flat rate per kWh.
    Single,
    /// Separate day and night rates.
    Dual,
    /// Time-of-use pricing derived from the single rate.
    Dynamic,
}

/// Pricing structure mapping energy consumed to cost.
///
/// Optional rates fall back to the defaults in `EngineSettings` when unset;
/// a tariff with no rates at all is still usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricityTariff {
    pub kind: TariffKind,
    /// Flat rate in EUR/kWh (also the base rate for dynamic tariffs).
    pub single_rate: Option<f64>,
    pub day_rate: Option<f64>,
    pub night_rate: Option<f64>,
    /// Fixed monthly subscription cost in EUR. Not part of per-kWh cost math.
    #[serde(default)]
    pub fixed_monthly_cost: f64,
    /// Grid operator cost in EUR/kWh, added on top of the energy rate.
    #[serde(default)]
    pub grid_cost: f64,
    /// VAT and levies, applied to energy + grid cost.
    #[serde(default = "default_taxes_percentage")]
    pub taxes_percentage: f64,
}

fn default_taxes_percentage() -> f64 {
    21.0
}

impl ElectricityTariff {
    pub fn single(rate: f64) -> Self {
        Self {
            kind: TariffKind::Single,
            single_rate: Some(rate),
            day_rate: None,
            night_rate: None,
            fixed_monthly_cost: 0.0,
            grid_cost: 0.0,
            taxes_percentage: default_taxes_percentage(),
        }
    }

    pub fn dual(day_rate: f64, night_rate: f64) -> Self {
        Self {
            kind: TariffKind::Dual,
            single_rate: None,
            day_rate: Some(day_rate),
            night_rate: Some(night_rate),
            fixed_monthly_cost: 0.0,
            grid_cost: 0.0,
            taxes_percentage: default_taxes_percentage(),
        }
    }

    pub fn dynamic(base_rate: f64) -> Self {
        Self {
            kind: TariffKind::Dynamic,
            single_rate: Some(base_rate),
            day_rate: None,
            night_rate: None,
            fixed_monthly_cost: 0.0,
            grid_cost: 0.0,
            taxes_percentage: default_taxes_percentage(),
        }
    }

    pub fn with_grid_cost(mut self, grid_cost: f64) -> Self {
        self.grid_cost = grid_cost;
        self
    }

    pub fn with_fixed_monthly_cost(mut self, cost: f64) -> Self {
        self.fixed_monthly_cost = cost;
        self
    }
}

/// A billing/physical unit owning devices and meter readings.
///
/// Soft-deleted via the `active` flag; never removed while devices or
/// readings reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub property_type: PropertyType,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub region: Region,
    pub timezone: String,
    pub square_meters: Option<u32>,
    pub occupants: Option<u32>,
    pub tariff: ElectricityTariff,
    /// Smart meter identifier (EAN or provider-specific).
    pub meter_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub active: bool,
}

/// Payload for creating a property.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PropertyDraft {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub property_type: PropertyType,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub region: Region,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[validate(range(min = 1, max = 100_000))]
    pub square_meters: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    pub occupants: Option<u32>,
    pub tariff: ElectricityTariff,
    pub meter_id: Option<String>,
}

fn default_timezone() -> String {
    "Europe/Brussels".to_string()
}

impl PropertyDraft {
    pub fn into_property(self, user_id: Uuid) -> Property {
        let now = Utc::now();
        Property {
            id: Uuid::new_v4(),
            user_id,
            name: self.name,
            property_type: self.property_type,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            region: self.region,
            timezone: self.timezone,
            square_meters: self.square_meters,
            occupants: self.occupants,
            tariff: self.tariff,
            meter_id: self.meter_id,
            created_at: now,
            updated_at: now,
            active: true,
        }
    }
}

/// Partial update for a property. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyPatch {
    pub name: Option<String>,
    pub property_type: Option<PropertyType>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub region: Option<Region>,
    pub timezone: Option<String>,
    pub square_meters: Option<u32>,
    pub occupants: Option<u32>,
    pub tariff: Option<ElectricityTariff>,
    pub meter_id: Option<String>,
}

impl PropertyPatch {
    pub fn apply(self, property: &mut Property) {
        if let Some(name) = self.name {
            property.name = name;
        }
        if let Some(property_type) = self.property_type {
            property.property_type = property_type;
        }
        if let Some(address) = self.address {
            property.address = address;
        }
        if let Some(city) = self.city {
            property.city = city;
        }
        if let Some(postal_code) = self.postal_code {
            property.postal_code = postal_code;
        }
        if let Some(region) = self.region {
            property.region = region;
        }
        if let Some(timezone) = self.timezone {
            property.timezone = timezone;
        }
        if let Some(square_meters) = self.square_meters {
            property.square_meters = Some(square_meters);
        }
        if let Some(occupants) = self.occupants {
            property.occupants = Some(occupants);
        }
        if let Some(tariff) = self.tariff {
            property.tariff = tariff;
        }
        if let Some(meter_id) = self.meter_id {
            property.meter_id = Some(meter_id);
        }
        property.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PropertyDraft {
        PropertyDraft {
            name: "Family Home".to_string(),
            property_type: PropertyType::Home,
            address: "123 Residential Street".to_string(),
            city: "Brussels".to_string(),
            postal_code: "1000".to_string(),
            region: Region::Brussels,
            timezone: default_timezone(),
            square_meters: Some(150),
            occupants: Some(4),
            tariff: ElectricityTariff::dual(0.28, 0.20),
            meter_id: None,
        }
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft().validate().is_ok());

        let mut bad = draft();
        bad.name = String::new();
        assert!(bad.validate().is_err());

        let mut bad = draft();
        bad.occupants = Some(200);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_into_property_sets_ownership_and_active() {
        let user_id = Uuid::new_v4();
        let property = draft().into_property(user_id);
        assert_eq!(property.user_id, user_id);
        assert!(property.active);
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut property = draft().into_property(Uuid::new_v4());
        let patch = PropertyPatch {
            occupants: Some(2),
            ..Default::default()
        };
        patch.apply(&mut property);
        assert_eq!(property.occupants, Some(2));
        assert_eq!(property.name, "Family Home");
    }

    #[test]
    fn test_region_round_trip() {
        use std::str::FromStr;
        assert_eq!(Region::from_str("flanders").unwrap(), Region::Flanders);
        assert_eq!(Region::Wallonia.to_string(), "wallonia");
    }

    #[test]
    fn test_tariff_defaults() {
        let tariff = ElectricityTariff::single(0.25);
        assert_eq!(tariff.taxes_percentage, 21.0);
        assert_eq!(tariff.grid_cost, 0.0);

        let json = r#"{"kind":"single","single_rate":0.3,"day_rate":null,"night_rate":null}"#;
        let parsed: ElectricityTariff = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.taxes_percentage, 21.0);
    }
}
