// ── Ordered device registry ──
//
// Insertion-ordered storage keyed by device id. Single-owner: the
// dashboard state container is the only writer, so there is no locking.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Device, DeviceId};

/// Ordered collection of devices, keyed by id.
///
/// Every effective mutation bumps a version counter so views can tell a
/// changed registry from an unchanged one without diffing.
#[derive(Debug, Default, Clone)]
pub struct DeviceRegistry {
    devices: IndexMap<DeviceId, Device>,
    version: u64,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an initial device list, in order.
    ///
    /// Later entries with an already-seen id are skipped.
    pub fn from_devices(devices: impl IntoIterator<Item = Device>) -> Self {
        let mut registry = Self::new();
        for device in devices {
            if let Err(e) = registry.add(device) {
                debug!(error = %e, "skipping seed device");
            }
        }
        registry
    }

    /// Append a device. Rejects an id that is already registered.
    pub fn add(&mut self, mut device: Device) -> Result<&Device, CoreError> {
        if self.devices.contains_key(&device.id) {
            return Err(CoreError::DuplicateDevice { id: device.id });
        }
        device.normalize();
        let id = device.id.clone();
        let (index, _) = self.devices.insert_full(id, device);
        self.bump_version();
        Ok(&self.devices[index])
    }

    /// Remove a device, preserving the order of the rest. No-op if absent.
    pub fn remove(&mut self, id: &DeviceId) -> Option<Device> {
        let removed = self.devices.shift_remove(id);
        if removed.is_some() {
            self.bump_version();
        }
        removed
    }

    /// Apply a field-level mutation to one device. Returns `false` if no
    /// device has that id.
    ///
    /// The id is restored after the transform and the device re-normalized,
    /// so a transform cannot re-key an entry or break the offline invariant.
    pub fn update(&mut self, id: &DeviceId, transform: impl FnOnce(&mut Device)) -> bool {
        let Some(device) = self.devices.get_mut(id) else {
            return false;
        };
        transform(device);
        device.id = id.clone();
        device.normalize();
        self.bump_version();
        true
    }

    /// Apply `transform` to every device matching `predicate`. Returns how
    /// many devices were touched.
    pub fn update_where(
        &mut self,
        mut predicate: impl FnMut(&Device) -> bool,
        mut transform: impl FnMut(&mut Device),
    ) -> usize {
        let mut touched = 0;
        for (id, device) in &mut self.devices {
            if predicate(device) {
                transform(device);
                device.id = id.clone();
                device.normalize();
                touched += 1;
            }
        }
        if touched > 0 {
            self.bump_version();
        }
        touched
    }

    /// Flip a device between online and offline. Returns `false` if absent.
    pub fn toggle_status(&mut self, id: &DeviceId) -> bool {
        self.update(id, Device::toggle)
    }

    pub fn get(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.get(id)
    }

    pub fn contains(&self, id: &DeviceId) -> bool {
        self.devices.contains_key(id)
    }

    /// Position of a device in registry order.
    pub fn index_of(&self, id: &DeviceId) -> Option<usize> {
        self.devices.get_index_of(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Owned copy of the current device list, in order, for broadcasting to views.
    pub fn snapshot(&self) -> Arc<Vec<Device>> {
        Arc::new(self.devices.values().cloned().collect())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
