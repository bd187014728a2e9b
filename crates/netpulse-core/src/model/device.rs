// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::device_id::DeviceId;

/// Network role of a device. Closed set; every consumer matches exhaustively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DeviceKind {
    Router,
    #[default]
    Laptop,
    Phone,
    Tablet,
    SmartTv,
    Iot,
    Server,
    Desktop,
}

impl DeviceKind {
    pub fn is_router(self) -> bool {
        matches!(self, Self::Router)
    }

    /// Human-readable label, as shown in the intake form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Router => "Router",
            Self::Laptop => "Laptop",
            Self::Phone => "Phone",
            Self::Tablet => "Tablet",
            Self::SmartTv => "Smart TV",
            Self::Iot => "IoT Device",
            Self::Server => "Server",
            Self::Desktop => "Desktop",
        }
    }
}

/// Operational state of a device.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceStatus {
    #[default]
    Online,
    Offline,
    Warning,
}

impl DeviceStatus {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Warning => "Warning",
        }
    }

    /// Status after a connect/disconnect toggle: online goes offline,
    /// anything else comes back online.
    pub fn toggled(self) -> Self {
        match self {
            Self::Online => Self::Offline,
            Self::Offline | Self::Warning => Self::Online,
        }
    }
}

/// Download/upload throughput pair in Mbps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bandwidth {
    pub download: f64,
    pub upload: f64,
}

impl Bandwidth {
    pub const ZERO: Self = Self {
        download: 0.0,
        upload: 0.0,
    };

    pub fn new(download: f64, upload: f64) -> Self {
        Self { download, upload }.clamped()
    }

    /// Floor both directions at zero.
    pub fn clamped(self) -> Self {
        Self {
            download: self.download.max(0.0),
            upload: self.upload.max(0.0),
        }
    }
}

/// A simulated network endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
    pub ip: String,
    pub mac: String,
    pub status: DeviceStatus,
    pub bandwidth: Bandwidth,
    /// Signal strength percentage (0-100), if known.
    pub signal_strength: Option<u8>,
    pub last_seen: DateTime<Utc>,
}

impl Device {
    pub fn is_online(&self) -> bool {
        self.status.is_online()
    }

    /// Restore the model invariants after a mutation.
    ///
    /// Bandwidth is floored at zero and signal capped at 100. An offline
    /// device carries no telemetry: bandwidth and signal are zeroed.
    pub fn normalize(&mut self) {
        self.bandwidth = self.bandwidth.clamped();
        if let Some(signal) = self.signal_strength.as_mut() {
            *signal = (*signal).min(100);
        }
        if self.status == DeviceStatus::Offline {
            self.bandwidth = Bandwidth::ZERO;
            if self.signal_strength.is_some() {
                self.signal_strength = Some(0);
            }
        }
    }

    /// Apply a connect/disconnect toggle.
    pub fn toggle(&mut self) {
        self.status = self.status.toggled();
        self.normalize();
    }
}
