//! Static device templates with typical nameplate figures.
//!
//! Used to prefill device drafts when a user adds a device by type; the
//! analysis engine never reads these.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::domain::{DeviceCategory, DeviceDraft, DeviceType};

/// Typical power figures for one device type.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceTemplate {
    pub device_type: DeviceType,
    pub category: DeviceCategory,
    pub name: &'static str,
    pub typical_wattage: u32,
    pub typical_daily_hours: f64,
    pub typical_weekly_hours: f64,
    pub standby_wattage: u32,
}

impl DeviceTemplate {
    /// Turn the template into a draft ready for customization.
    pub fn to_draft(&self) -> DeviceDraft {
        DeviceDraft::new(self.name, self.device_type, self.category)
            .with_wattage(self.typical_wattage)
            .with_standby_wattage(self.standby_wattage)
            .with_runtime(self.typical_daily_hours, self.typical_weekly_hours)
    }
}

macro_rules! template {
    ($ty:ident, $cat:ident, $name:literal, $watts:literal, $daily:literal, $weekly:literal, $standby:literal) => {
        DeviceTemplate {
            device_type: DeviceType::$ty,
            category: DeviceCategory::$cat,
            name: $name,
            typical_wattage: $watts,
            typical_daily_hours: $daily,
            typical_weekly_hours: $weekly,
            standby_wattage: $standby,
        }
    };
}

pub static DEVICE_TEMPLATES: &[DeviceTemplate] = &[
    // Major appliances
    template!(Refrigerator, MajorAppliances, "Refrigerator", 150, 24.0, 168.0, 120),
    template!(WashingMachine, MajorAppliances, "Washing Machine", 2000, 1.0, 4.0, 5),
    template!(Dishwasher, MajorAppliances, "Dishwasher", 1800, 1.5, 7.0, 3),
    template!(Dryer, MajorAppliances, "Clothes Dryer", 3000, 0.5, 3.0, 2),
    template!(Oven, MajorAppliances, "Electric Oven", 2500, 1.0, 5.0, 10),
    template!(Microwave, MajorAppliances, "Microwave", 1200, 0.5, 3.0, 8),
    // Electronics
    template!(Tv, Electronics, "LED TV", 120, 6.0, 35.0, 15),
    template!(Pc, Electronics, "Desktop PC", 300, 8.0, 50.0, 20),
    template!(Laptop, Electronics, "Laptop", 65, 6.0, 35.0, 5),
    template!(GamingConsole, Electronics, "Gaming Console", 150, 3.0, 15.0, 25),
    template!(Router, Electronics, "WiFi Router", 12, 24.0, 168.0, 12),
    // Lighting
    template!(LedLights, Lighting, "LED Light Zone", 60, 8.0, 50.0, 0),
    template!(SmartBulbs, Lighting, "Smart Bulbs", 45, 6.0, 35.0, 2),
    template!(OutdoorLighting, Lighting, "Outdoor Lighting", 100, 12.0, 84.0, 0),
    // Heating/cooling
    template!(HeatPump, HeatingCooling, "Heat Pump", 3500, 8.0, 40.0, 50),
    template!(AcUnit, HeatingCooling, "Air Conditioning", 2500, 6.0, 30.0, 20),
    template!(ElectricHeater, HeatingCooling, "Electric Heater", 1500, 4.0, 20.0, 0),
    // Water heating
    template!(WaterHeater, WaterHeating, "Electric Water Heater", 4000, 3.0, 15.0, 100),
    template!(Boiler, WaterHeating, "Electric Boiler", 3000, 4.0, 25.0, 80),
    // EV charging
    template!(EvCharger, EvCharging, "EV Charger", 7400, 2.0, 10.0, 15),
];

/// Template for a device type, if one exists.
pub fn template_for(device_type: DeviceType) -> Option<&'static DeviceTemplate> {
    DEVICE_TEMPLATES.iter().find(|t| t.device_type == device_type)
}

/// All templates in a category.
pub fn templates_in_category(category: DeviceCategory) -> Vec<&'static DeviceTemplate> {
    DEVICE_TEMPLATES.iter().filter(|t| t.category == category).collect()
}

/// The quick-add shortlist shown when setting up a property.
pub fn common_devices() -> &'static [&'static DeviceTemplate] {
    static COMMON: Lazy<Vec<&'static DeviceTemplate>> = Lazy::new(|| {
        [
            DeviceType::Refrigerator,
            DeviceType::WashingMachine,
            DeviceType::Dishwasher,
            DeviceType::WaterHeater,
            DeviceType::EvCharger,
            DeviceType::Tv,
            DeviceType::Pc,
            DeviceType::GamingConsole,
            DeviceType::LedLights,
        ]
        .iter()
        .filter_map(|&t| template_for(t))
        .collect()
    });
    &COMMON
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_concrete_type_has_a_template() {
        for device_type in DeviceType::iter() {
            if device_type == DeviceType::Other {
                continue;
            }
            assert!(template_for(device_type).is_some(), "missing template for {device_type}");
        }
    }

    #[test]
    fn test_always_on_templates_run_all_week() {
        for ty in [DeviceType::Refrigerator, DeviceType::Router] {
            let template = template_for(ty).unwrap();
            assert_eq!(template.typical_daily_hours, 24.0);
            assert_eq!(template.typical_weekly_hours, 168.0);
        }
    }

    #[test]
    fn test_to_draft_passes_validation() {
        use validator::Validate;
        for template in DEVICE_TEMPLATES {
            assert!(template.to_draft().validate().is_ok(), "{} draft invalid", template.name);
        }
    }

    #[test]
    fn test_category_lookup() {
        let heating = templates_in_category(DeviceCategory::HeatingCooling);
        assert_eq!(heating.len(), 3);
        assert!(heating.iter().all(|t| t.category == DeviceCategory::HeatingCooling));
    }

    #[test]
    fn test_common_devices_shortlist() {
        let common = common_devices();
        assert_eq!(common.len(), 9);
        assert_eq!(common[0].device_type, DeviceType::Refrigerator);
    }
}
