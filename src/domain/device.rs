use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Coarse device grouping. Drives seasonal adjustment: heating/cooling and
/// water heating scale with the month, everything else does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeviceCategory {
    MajorAppliances,
    Electronics,
    Lighting,
    HeatingCooling,
    WaterHeating,
    EvCharging,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeviceType {
    // Major appliances
    Refrigerator,
    WashingMachine,
    Dishwasher,
    Dryer,
    Oven,
    Microwave,
    // Electronics
    Tv,
    Pc,
    Laptop,
    GamingConsole,
    Router,
    // Lighting
    LedLights,
    SmartBulbs,
    OutdoorLighting,
    // Heating/cooling
    HeatPump,
    AcUnit,
    ElectricHeater,
    // Water heating
    WaterHeater,
    Boiler,
    // EV charging
    EvCharger,
    Other,
}

/// EU energy label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyRating {
    #[serde(rename = "A+++")]
    APlusPlusPlus,
    #[serde(rename = "A++")]
    APlusPlus,
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

/// A consumer appliance belonging to exactly one property.
///
/// Wattage figures are nameplate values entered by the user or taken from a
/// catalog template; nothing here is measured. Soft-deleted via `active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub device_type: DeviceType,
    pub category: DeviceCategory,
    /// Nameplate power draw when running, in watts.
    pub estimated_wattage: u32,
    /// Power draw when idle, in watts.
    pub standby_wattage: u32,
    pub daily_runtime_hours: f64,
    pub weekly_runtime_hours: f64,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub energy_rating: Option<EnergyRating>,
    /// Smart plug or submeter channel id. Presence raises estimate confidence.
    pub smart_integration_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub active: bool,
}

impl Device {
    /// Whether consumption for this device scales with the season.
    pub fn is_seasonal(&self) -> bool {
        matches!(
            self.category,
            DeviceCategory::HeatingCooling | DeviceCategory::WaterHeating
        )
    }
}

/// Payload for registering a device on a property.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeviceDraft {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub device_type: DeviceType,
    pub category: DeviceCategory,
    #[validate(range(max = 50_000))]
    pub estimated_wattage: u32,
    #[serde(default)]
    #[validate(range(max = 50_000))]
    pub standby_wattage: u32,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 24.0))]
    pub daily_runtime_hours: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 168.0))]
    pub weekly_runtime_hours: f64,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub energy_rating: Option<EnergyRating>,
    pub smart_integration_id: Option<String>,
    pub notes: Option<String>,
}

impl DeviceDraft {
    pub fn new(name: impl Into<String>, device_type: DeviceType, category: DeviceCategory) -> Self {
        Self {
            name: name.into(),
            device_type,
            category,
            estimated_wattage: 0,
            standby_wattage: 0,
            daily_runtime_hours: 0.0,
            weekly_runtime_hours: 0.0,
            brand: None,
            model: None,
            energy_rating: None,
            smart_integration_id: None,
            notes: None,
        }
    }

    pub fn with_wattage(mut self, wattage: u32) -> Self {
        self.estimated_wattage = wattage;
        self
    }

    pub fn with_standby_wattage(mut self, wattage: u32) -> Self {
        self.standby_wattage = wattage;
        self
    }

    pub fn with_runtime(mut self, daily_hours: f64, weekly_hours: f64) -> Self {
        self.daily_runtime_hours = daily_hours;
        self.weekly_runtime_hours = weekly_hours;
        self
    }

    pub fn with_smart_integration(mut self, integration_id: impl Into<String>) -> Self {
        self.smart_integration_id = Some(integration_id.into());
        self
    }

    pub fn into_device(self, property_id: Uuid, user_id: Uuid) -> Device {
        let now = Utc::now();
        Device {
            id: Uuid::new_v4(),
            property_id,
            user_id,
            name: self.name,
            device_type: self.device_type,
            category: self.category,
            estimated_wattage: self.estimated_wattage,
            standby_wattage: self.standby_wattage,
            daily_runtime_hours: self.daily_runtime_hours,
            weekly_runtime_hours: self.weekly_runtime_hours,
            brand: self.brand,
            model: self.model,
            energy_rating: self.energy_rating,
            smart_integration_id: self.smart_integration_id,
            notes: self.notes,
            created_at: now,
            updated_at: now,
            active: true,
        }
    }
}

/// Partial update for a device. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub estimated_wattage: Option<u32>,
    pub standby_wattage: Option<u32>,
    pub daily_runtime_hours: Option<f64>,
    pub weekly_runtime_hours: Option<f64>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub energy_rating: Option<EnergyRating>,
    pub smart_integration_id: Option<String>,
    pub notes: Option<String>,
}

impl DevicePatch {
    pub fn apply(self, device: &mut Device) {
        if let Some(name) = self.name {
            device.name = name;
        }
        if let Some(wattage) = self.estimated_wattage {
            device.estimated_wattage = wattage;
        }
        if let Some(wattage) = self.standby_wattage {
            device.standby_wattage = wattage;
        }
        if let Some(hours) = self.daily_runtime_hours {
            device.daily_runtime_hours = hours;
        }
        if let Some(hours) = self.weekly_runtime_hours {
            device.weekly_runtime_hours = hours;
        }
        if let Some(brand) = self.brand {
            device.brand = Some(brand);
        }
        if let Some(model) = self.model {
            device.model = Some(model);
        }
        if let Some(rating) = self.energy_rating {
            device.energy_rating = Some(rating);
        }
        if let Some(integration_id) = self.smart_integration_id {
            device.smart_integration_id = Some(integration_id);
        }
        if let Some(notes) = self.notes {
            device.notes = Some(notes);
        }
        device.updated_at = Utc::now();
    }
}
