//! Usage scenarios: named property + device bundles for demo bootstrap.
//!
//! Each scenario describes a recognizable Belgian household or small business
//! with a realistic tariff and device mix. Scenario setup creates the
//! property and devices and then hands off to the meter simulator for
//! history.

use serde::{Deserialize, Serialize};

use crate::domain::{
    DeviceCategory, DeviceDraft, DeviceType, ElectricityTariff, PropertyDraft, PropertyType,
    Region,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Scenario {
    FamilyHome,
    EvOwner,
    SmallBusiness,
    StudioApartment,
    SmartHome,
}

/// A scenario ready to be instantiated for a user.
#[derive(Debug, Clone)]
pub struct ScenarioTemplate {
    pub scenario: Scenario,
    pub name: &'static str,
    pub description: &'static str,
    pub property: PropertyDraft,
    pub devices: Vec<DeviceDraft>,
    pub typical_monthly_kwh: f64,
    pub typical_monthly_cost: f64,
}

/// Build the template for a scenario.
pub fn scenario_template(scenario: Scenario) -> ScenarioTemplate {
    match scenario {
        Scenario::FamilyHome => family_home(),
        Scenario::EvOwner => ev_owner(),
        Scenario::SmallBusiness => small_business(),
        Scenario::StudioApartment => studio_apartment(),
        Scenario::SmartHome => smart_home(),
    }
}

fn property(
    name: &str,
    property_type: PropertyType,
    address: &str,
    city: &str,
    postal_code: &str,
    region: Region,
    square_meters: u32,
    occupants: u32,
    tariff: ElectricityTariff,
    meter_id: &str,
) -> PropertyDraft {
    PropertyDraft {
        name: name.to_string(),
        property_type,
        address: address.to_string(),
        city: city.to_string(),
        postal_code: postal_code.to_string(),
        region,
        timezone: "Europe/Brussels".to_string(),
        square_meters: Some(square_meters),
        occupants: Some(occupants),
        tariff,
        meter_id: Some(meter_id.to_string()),
    }
}

fn device(
    name: &str,
    device_type: DeviceType,
    category: DeviceCategory,
    wattage: u32,
    daily_hours: f64,
    weekly_hours: f64,
) -> DeviceDraft {
    DeviceDraft::new(name, device_type, category)
        .with_wattage(wattage)
        .with_runtime(daily_hours, weekly_hours)
}

fn family_home() -> ScenarioTemplate {
    ScenarioTemplate {
        scenario: Scenario::FamilyHome,
        name: "Family Home (4 people)",
        description: "Typical Belgian family with 4 people, standard appliances and electronics",
        property: property(
            "Family Home",
            PropertyType::Home,
            "123 Residential Street",
            "Brussels",
            "1000",
            Region::Brussels,
            150,
            4,
            ElectricityTariff::dual(0.28, 0.20)
                .with_grid_cost(0.05)
                .with_fixed_monthly_cost(45.0),
            "BE_FAM_001234",
        ),
        devices: vec![
            device("Kitchen Fridge", DeviceType::Refrigerator, DeviceCategory::MajorAppliances, 150, 24.0, 168.0),
            device("Washing Machine", DeviceType::WashingMachine, DeviceCategory::MajorAppliances, 2000, 1.0, 5.0),
            device("Dishwasher", DeviceType::Dishwasher, DeviceCategory::MajorAppliances, 1800, 1.5, 7.0),
            device("Living Room TV", DeviceType::Tv, DeviceCategory::Electronics, 120, 6.0, 35.0),
            device("Home PC", DeviceType::Pc, DeviceCategory::Electronics, 300, 4.0, 25.0),
            device("Gaming Console", DeviceType::GamingConsole, DeviceCategory::Electronics, 150, 3.0, 15.0),
            device("Living Areas Lighting", DeviceType::LedLights, DeviceCategory::Lighting, 200, 8.0, 50.0),
            device("Water Heater", DeviceType::WaterHeater, DeviceCategory::WaterHeating, 4000, 3.0, 15.0),
        ],
        typical_monthly_kwh: 450.0,
        typical_monthly_cost: 120.0,
    }
}

fn ev_owner() -> ScenarioTemplate {
    ScenarioTemplate {
        scenario: Scenario::EvOwner,
        name: "EV Owner Home",
        description: "Modern home with electric vehicle charging and energy-efficient appliances",
        property: property(
            "EV Owner Home",
            PropertyType::Home,
            "456 Green Energy Lane",
            "Ghent",
            "9000",
            Region::Flanders,
            180,
            2,
            ElectricityTariff::dynamic(0.25)
                .with_grid_cost(0.06)
                .with_fixed_monthly_cost(50.0),
            "BE_EV_005678",
        ),
        devices: vec![
            device("Energy Efficient Fridge", DeviceType::Refrigerator, DeviceCategory::MajorAppliances, 120, 24.0, 168.0),
            device("Heat Pump", DeviceType::HeatPump, DeviceCategory::HeatingCooling, 3500, 6.0, 35.0),
            device("EV Home Charger", DeviceType::EvCharger, DeviceCategory::EvCharging, 7400, 3.0, 15.0),
            device("Smart TV", DeviceType::Tv, DeviceCategory::Electronics, 100, 5.0, 30.0),
            device("Home Office Setup", DeviceType::Pc, DeviceCategory::Electronics, 250, 8.0, 40.0),
            device("Smart LED Lighting", DeviceType::SmartBulbs, DeviceCategory::Lighting, 150, 7.0, 45.0),
            device("Efficient Dishwasher", DeviceType::Dishwasher, DeviceCategory::MajorAppliances, 1500, 1.0, 6.0),
        ],
        typical_monthly_kwh: 720.0,
        typical_monthly_cost: 185.0,
    }
}

fn small_business() -> ScenarioTemplate {
    ScenarioTemplate {
        scenario: Scenario::SmallBusiness,
        name: "Small Office",
        description: "Small business office with computers, lighting, and basic amenities",
        property: property(
            "Small Business Office",
            PropertyType::Office,
            "789 Business Park",
            "Antwerp",
            "2000",
            Region::Flanders,
            120,
            8,
            ElectricityTariff::single(0.22)
                .with_grid_cost(0.04)
                .with_fixed_monthly_cost(75.0),
            "BE_BIZ_009012",
        ),
        devices: vec![
            device("Office Computers (8x)", DeviceType::Pc, DeviceCategory::Electronics, 2400, 9.0, 45.0),
            device("LED Office Lighting", DeviceType::LedLights, DeviceCategory::Lighting, 300, 10.0, 50.0),
            device("Office Fridge", DeviceType::Refrigerator, DeviceCategory::MajorAppliances, 200, 24.0, 168.0),
            device("Microwave", DeviceType::Microwave, DeviceCategory::MajorAppliances, 1200, 0.5, 2.5),
            device("Network Equipment", DeviceType::Router, DeviceCategory::Electronics, 50, 24.0, 168.0),
            device("AC System", DeviceType::AcUnit, DeviceCategory::HeatingCooling, 3000, 6.0, 30.0),
        ],
        typical_monthly_kwh: 380.0,
        typical_monthly_cost: 95.0,
    }
}

fn studio_apartment() -> ScenarioTemplate {
    ScenarioTemplate {
        scenario: Scenario::StudioApartment,
        name: "Studio Apartment",
        description: "Compact living space with essential appliances for 1-2 people",
        property: property(
            "Studio Apartment",
            PropertyType::Home,
            "321 Student Quarter",
            "Leuven",
            "3000",
            Region::Flanders,
            45,
            1,
            ElectricityTariff::single(0.30)
                .with_grid_cost(0.05)
                .with_fixed_monthly_cost(35.0),
            "BE_STU_003456",
        ),
        devices: vec![
            device("Compact Fridge", DeviceType::Refrigerator, DeviceCategory::MajorAppliances, 100, 24.0, 168.0),
            device("Laptop", DeviceType::Laptop, DeviceCategory::Electronics, 65, 8.0, 50.0),
            device("Small TV", DeviceType::Tv, DeviceCategory::Electronics, 80, 4.0, 25.0),
            device("Studio Lighting", DeviceType::LedLights, DeviceCategory::Lighting, 50, 6.0, 35.0),
            device("Microwave", DeviceType::Microwave, DeviceCategory::MajorAppliances, 900, 0.5, 3.0),
            device("Electric Heater", DeviceType::ElectricHeater, DeviceCategory::HeatingCooling, 1500, 4.0, 25.0),
        ],
        typical_monthly_kwh: 180.0,
        typical_monthly_cost: 65.0,
    }
}

fn smart_home() -> ScenarioTemplate {
    ScenarioTemplate {
        scenario: Scenario::SmartHome,
        name: "Smart Home",
        description: "Technology-forward home with smart devices and energy monitoring",
        property: property(
            "Smart Home",
            PropertyType::Home,
            "555 Tech Valley",
            "Bruges",
            "8000",
            Region::Flanders,
            200,
            3,
            ElectricityTariff::dynamic(0.24)
                .with_grid_cost(0.06)
                .with_fixed_monthly_cost(55.0),
            "BE_SMT_007890",
        ),
        devices: vec![
            device("Smart Fridge", DeviceType::Refrigerator, DeviceCategory::MajorAppliances, 140, 24.0, 168.0)
                .with_smart_integration("smart_plug_01"),
            device("Smart Heat Pump", DeviceType::HeatPump, DeviceCategory::HeatingCooling, 3200, 7.0, 40.0)
                .with_smart_integration("smart_plug_02"),
            device("Home Server", DeviceType::Pc, DeviceCategory::Electronics, 200, 24.0, 168.0)
                .with_smart_integration("smart_plug_03"),
            device("Smart Lighting System", DeviceType::SmartBulbs, DeviceCategory::Lighting, 180, 8.0, 50.0)
                .with_smart_integration("smart_switch_01"),
            device("Gaming Setup", DeviceType::GamingConsole, DeviceCategory::Electronics, 180, 4.0, 20.0)
                .with_smart_integration("smart_plug_04"),
            device("Smart Dishwasher", DeviceType::Dishwasher, DeviceCategory::MajorAppliances, 1600, 1.5, 8.0)
                .with_smart_integration("smart_plug_05"),
        ],
        typical_monthly_kwh: 520.0,
        typical_monthly_cost: 140.0,
    }
}
