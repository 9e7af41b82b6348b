//! # Device Catalog Module
//!
//! Static reference data used to set up properties quickly.
//!
//! ## Components
//!
//! - **Templates**: typical wattage and runtime figures per device type
//! - **Scenarios**: complete property + device bundles for demos and tests

pub mod scenarios;
pub mod templates;

pub use scenarios::{scenario_template, Scenario, ScenarioTemplate};
pub use templates::{
    common_devices, template_for, templates_in_category, DeviceTemplate, DEVICE_TEMPLATES,
};
