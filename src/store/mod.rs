//! # Store Module
//!
//! In-memory persistence for properties, devices, readings, and alerts.
//! Single-process, lock-per-collection; every accessor checks ownership so a
//! caller can only see rows created under their own user id.
//!
//! ## Components
//!
//! - **MemoryStore**: the collections plus lifecycle rules (soft delete,
//!   append-only readings, alert acknowledge/resolve)
//! - **StoreError**: not-found and validation failures

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use parking_lot::RwLock;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::catalog::{scenario_template, Scenario};
use crate::domain::{
    Device, DeviceAlert, DeviceDraft, DevicePatch, MeterReading, MeterReadingDraft, Property,
    PropertyDraft, PropertyPatch,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("property {0} not found")]
    PropertyNotFound(Uuid),
    #[error("device {0} not found")]
    DeviceNotFound(Uuid),
    #[error("alert {0} not found")]
    AlertNotFound(Uuid),
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// All collections behind their own locks. Lookups for rows owned by another
/// user report not-found rather than forbidden, so ids never leak across
/// accounts.
#[derive(Default)]
pub struct MemoryStore {
    properties: RwLock<HashMap<Uuid, Property>>,
    devices: RwLock<HashMap<Uuid, Device>>,
    readings: RwLock<Vec<MeterReading>>,
    alerts: RwLock<HashMap<Uuid, DeviceAlert>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Properties

    pub fn create_property(&self, user_id: Uuid, draft: PropertyDraft) -> Result<Property> {
        draft.validate()?;
        let property = draft.into_property(user_id);
        self.properties.write().insert(property.id, property.clone());
        Ok(property)
    }

    pub fn property(&self, user_id: Uuid, property_id: Uuid) -> Result<Property> {
        self.properties
            .read()
            .get(&property_id)
            .filter(|p| p.user_id == user_id && p.active)
            .cloned()
            .ok_or(StoreError::PropertyNotFound(property_id))
    }

    /// Active properties for a user, newest first.
    pub fn properties_for(&self, user_id: Uuid) -> Vec<Property> {
        let mut properties: Vec<Property> = self
            .properties
            .read()
            .values()
            .filter(|p| p.user_id == user_id && p.active)
            .cloned()
            .collect();
        properties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        properties
    }

    pub fn update_property(
        &self,
        user_id: Uuid,
        property_id: Uuid,
        patch: PropertyPatch,
    ) -> Result<Property> {
        let mut properties = self.properties.write();
        let property = properties
            .get_mut(&property_id)
            .filter(|p| p.user_id == user_id && p.active)
            .ok_or(StoreError::PropertyNotFound(property_id))?;
        patch.apply(property);
        Ok(property.clone())
    }

    /// Soft delete: the property and its devices stay in place but drop out
    /// of every listing and analysis. Readings are kept untouched.
    pub fn deactivate_property(&self, user_id: Uuid, property_id: Uuid) -> Result<()> {
        let mut properties = self.properties.write();
        let property = properties
            .get_mut(&property_id)
            .filter(|p| p.user_id == user_id && p.active)
            .ok_or(StoreError::PropertyNotFound(property_id))?;
        property.active = false;
        property.updated_at = Utc::now();

        let mut devices = self.devices.write();
        for device in devices.values_mut().filter(|d| d.property_id == property_id) {
            device.active = false;
            device.updated_at = Utc::now();
        }
        Ok(())
    }

    // Devices

    pub fn add_device(
        &self,
        user_id: Uuid,
        property_id: Uuid,
        draft: DeviceDraft,
    ) -> Result<Device> {
        draft.validate()?;
        let property = self.property(user_id, property_id)?;
        let device = draft.into_device(property.id, user_id);
        self.devices.write().insert(device.id, device.clone());
        Ok(device)
    }

    pub fn device(&self, user_id: Uuid, device_id: Uuid) -> Result<Device> {
        self.devices
            .read()
            .get(&device_id)
            .filter(|d| d.user_id == user_id && d.active)
            .cloned()
            .ok_or(StoreError::DeviceNotFound(device_id))
    }

    /// Active devices on a property, stable order by creation time.
    pub fn devices_for(&self, user_id: Uuid, property_id: Uuid) -> Result<Vec<Device>> {
        self.property(user_id, property_id)?;
        let mut devices: Vec<Device> = self
            .devices
            .read()
            .values()
            .filter(|d| d.property_id == property_id && d.active)
            .cloned()
            .collect();
        devices.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(devices)
    }

    pub fn update_device(
        &self,
        user_id: Uuid,
        device_id: Uuid,
        patch: DevicePatch,
    ) -> Result<Device> {
        let mut devices = self.devices.write();
        let device = devices
            .get_mut(&device_id)
            .filter(|d| d.user_id == user_id && d.active)
            .ok_or(StoreError::DeviceNotFound(device_id))?;
        patch.apply(device);
        Ok(device.clone())
    }

    pub fn deactivate_device(&self, user_id: Uuid, device_id: Uuid) -> Result<()> {
        let mut devices = self.devices.write();
        let device = devices
            .get_mut(&device_id)
            .filter(|d| d.user_id == user_id && d.active)
            .ok_or(StoreError::DeviceNotFound(device_id))?;
        device.active = false;
        device.updated_at = Utc::now();
        Ok(())
    }

    // Meter readings (append-only)

    pub fn record_reading(
        &self,
        user_id: Uuid,
        property_id: Uuid,
        draft: MeterReadingDraft,
    ) -> Result<MeterReading> {
        let property = self.property(user_id, property_id)?;
        let reading = draft.into_reading(property.id, user_id);
        self.readings.write().push(reading.clone());
        Ok(reading)
    }

    /// Bulk append of already-built readings (simulator output).
    pub fn append_readings(&self, readings: Vec<MeterReading>) {
        self.readings.write().extend(readings);
    }

    /// Readings for a property from `since` onward, oldest first.
    pub fn readings_since(
        &self,
        user_id: Uuid,
        property_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<MeterReading>> {
        self.property(user_id, property_id)?;
        Ok(self
            .readings
            .read()
            .iter()
            .filter(|r| r.property_id == property_id && r.timestamp >= since)
            .cloned()
            .sorted_by_key(|r| r.timestamp)
            .collect())
    }

    // Alerts

    pub fn insert_alerts(&self, alerts: Vec<DeviceAlert>) {
        let mut stored = self.alerts.write();
        for alert in alerts {
            stored.insert(alert.id, alert);
        }
    }

    /// Unresolved alerts for a property, newest first.
    pub fn alerts_for(&self, user_id: Uuid, property_id: Uuid) -> Result<Vec<DeviceAlert>> {
        self.property(user_id, property_id)?;
        let mut alerts: Vec<DeviceAlert> = self
            .alerts
            .read()
            .values()
            .filter(|a| a.property_id == property_id && !a.resolved)
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(alerts)
    }

    pub fn acknowledge_alert(&self, user_id: Uuid, alert_id: Uuid) -> Result<DeviceAlert> {
        self.update_alert(user_id, alert_id, |alert| alert.acknowledged = true)
    }

    pub fn resolve_alert(&self, user_id: Uuid, alert_id: Uuid) -> Result<DeviceAlert> {
        self.update_alert(user_id, alert_id, |alert| alert.resolved = true)
    }

    fn update_alert(
        &self,
        user_id: Uuid,
        alert_id: Uuid,
        mutate: impl FnOnce(&mut DeviceAlert),
    ) -> Result<DeviceAlert> {
        let properties = self.properties.read();
        let mut alerts = self.alerts.write();
        let alert = alerts
            .get_mut(&alert_id)
            .filter(|a| {
                properties
                    .get(&a.property_id)
                    .is_some_and(|p| p.user_id == user_id)
            })
            .ok_or(StoreError::AlertNotFound(alert_id))?;
        mutate(alert);
        Ok(alert.clone())
    }

    // Scenarios

    /// Instantiate a scenario template: one property plus its device bundle.
    /// Meter history comes separately from the simulator.
    pub fn bootstrap_scenario(
        &self,
        user_id: Uuid,
        scenario: Scenario,
    ) -> Result<(Property, Vec<Device>)> {
        let template = scenario_template(scenario);
        let property = self.create_property(user_id, template.property)?;
        let mut devices = Vec::with_capacity(template.devices.len());
        for draft in template.devices {
            devices.push(self.add_device(user_id, property.id, draft)?);
        }
        Ok((property, devices))
    }
}
