// ── Device intake ──
//
// Raw form fields in, a validated creation payload out. The registry layer
// completes the payload with id, timestamp and zero bandwidth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{Bandwidth, Device, DeviceId, DeviceKind, DeviceStatus};

pub const DEFAULT_SIGNAL: u8 = 80;
pub const DEFAULT_IP_PREFIX: &str = "192.168.1.";

/// Unvalidated intake form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDraft {
    pub name: String,
    pub kind: DeviceKind,
    pub ip: String,
    pub mac: String,
    pub status: DeviceStatus,
    pub signal_strength: u8,
}

impl Default for DeviceDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: DeviceKind::Laptop,
            ip: DEFAULT_IP_PREFIX.to_owned(),
            mac: String::new(),
            status: DeviceStatus::Online,
            signal_strength: DEFAULT_SIGNAL,
        }
    }
}

impl DeviceDraft {
    /// Names of the required text fields that are currently blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("ip", &self.ip),
            ("mac", &self.mac),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Check required fields and build the creation payload.
    ///
    /// Text fields are trimmed, the MAC uppercased and the signal capped at 100.
    pub fn validate(&self) -> Result<NewDevice, CoreError> {
        if let Some(&field) = self.missing_fields().first() {
            return Err(CoreError::MissingField { field });
        }
        Ok(NewDevice {
            name: self.name.trim().to_owned(),
            kind: self.kind,
            ip: self.ip.trim().to_owned(),
            mac: self.mac.trim().to_uppercase(),
            status: self.status,
            signal_strength: Some(self.signal_strength.min(100)),
        })
    }
}

/// A device minus the fields the registry assigns (id, last seen, bandwidth).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDevice {
    pub name: String,
    pub kind: DeviceKind,
    pub ip: String,
    pub mac: String,
    pub status: DeviceStatus,
    pub signal_strength: Option<u8>,
}

impl NewDevice {
    /// Complete the payload: zero bandwidth, `last_seen = now`.
    pub fn into_device(self, id: DeviceId, now: DateTime<Utc>) -> Device {
        let mut device = Device {
            id,
            name: self.name,
            kind: self.kind,
            ip: self.ip,
            mac: self.mac,
            status: self.status,
            bandwidth: Bandwidth::ZERO,
            signal_strength: self.signal_strength,
            last_seen: now,
        };
        device.normalize();
        device
    }
}
