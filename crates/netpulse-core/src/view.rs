// ── Derived projections ──
//
// Status filtering and aggregate statistics over the current device set.
// Both are pure functions of their input and are recomputed on demand.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::model::{Device, DeviceStatus};

/// Which devices a view shows.
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
pub enum StatusFilter {
    #[default]
    All,
    Online,
    Offline,
    Warning,
}

impl StatusFilter {
    /// Filters in tab order.
    pub const ALL: [StatusFilter; 4] = [Self::All, Self::Online, Self::Offline, Self::Warning];

    pub fn matches(self, status: DeviceStatus) -> bool {
        match self {
            Self::All => true,
            Self::Online => status == DeviceStatus::Online,
            Self::Offline => status == DeviceStatus::Offline,
            Self::Warning => status == DeviceStatus::Warning,
        }
    }

    /// Matching devices, in their original relative order.
    pub fn apply<'a>(self, devices: impl IntoIterator<Item = &'a Device>) -> Vec<&'a Device> {
        devices
            .into_iter()
            .filter(|d| self.matches(d.status))
            .collect()
    }

    pub fn count<'a>(self, devices: impl IntoIterator<Item = &'a Device>) -> usize {
        devices
            .into_iter()
            .filter(|d| self.matches(d.status))
            .count()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Devices",
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Warning => "Warning",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::All => 0,
            Self::Online => 1,
            Self::Offline => 2,
            Self::Warning => 3,
        }
    }

    /// Next filter in tab order (wraps around).
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous filter in tab order (wraps around).
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Aggregate figures shown in the stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NetworkStats {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub warning: usize,
    /// Sum of download across every device, in Mbps.
    pub total_download: f64,
    /// Sum of upload across every device, in Mbps.
    pub total_upload: f64,
}

impl NetworkStats {
    pub fn from_devices<'a>(devices: impl IntoIterator<Item = &'a Device>) -> Self {
        devices.into_iter().fold(Self::default(), |mut acc, d| {
            acc.total += 1;
            match d.status {
                DeviceStatus::Online => acc.online += 1,
                DeviceStatus::Offline => acc.offline += 1,
                DeviceStatus::Warning => acc.warning += 1,
            }
            acc.total_download += d.bandwidth.download;
            acc.total_upload += d.bandwidth.upload;
            acc
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Bandwidth, DeviceId, DeviceKind};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn device(id: &str, status: DeviceStatus, download: f64, upload: f64) -> Device {
        Device {
            id: DeviceId::from(id),
            name: id.to_owned(),
            kind: DeviceKind::Phone,
            ip: "10.0.0.2".into(),
            mac: "AA:BB:CC:DD:EE:FF".into(),
            status,
            bandwidth: Bandwidth::new(download, upload),
            signal_strength: None,
            last_seen: Utc::now(),
        }
    }

    fn mixed() -> Vec<Device> {
        vec![
            device("a", DeviceStatus::Online, 10.0, 1.0),
            device("b", DeviceStatus::Offline, 0.0, 0.0),
            device("c", DeviceStatus::Warning, 0.5, 0.1),
            device("d", DeviceStatus::Online, 20.0, 3.0),
        ]
    }

    #[test]
    fn online_filter_keeps_exact_subset_in_order() {
        let devices = mixed();
        let online: Vec<&str> = StatusFilter::Online
            .apply(&devices)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(online, vec!["a", "d"]);
    }

    #[test]
    fn all_filter_returns_everything() {
        let devices = mixed();
        assert_eq!(StatusFilter::All.apply(&devices).len(), 4);
        assert_eq!(StatusFilter::Warning.count(&devices), 1);
    }

    #[test]
    fn filter_cycles_in_tab_order() {
        assert_eq!(StatusFilter::All.next(), StatusFilter::Online);
        assert_eq!(StatusFilter::Warning.next(), StatusFilter::All);
        assert_eq!(StatusFilter::All.prev(), StatusFilter::Warning);
    }

    #[test]
    fn stats_sum_current_devices() {
        let devices = vec![
            device("a", DeviceStatus::Online, 10.0, 1.0),
            device("b", DeviceStatus::Online, 20.0, 2.0),
        ];
        let stats = NetworkStats::from_devices(&devices);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.online, 2);
        assert!((stats.total_download - 30.0).abs() < f64::EPSILON);
        assert!((stats.total_upload - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_count_each_status() {
        let stats = NetworkStats::from_devices(&mixed());
        assert_eq!(
            (stats.total, stats.online, stats.offline, stats.warning),
            (4, 2, 1, 1)
        );
    }

    #[test]
    fn stats_of_nothing_are_zero() {
        assert_eq!(NetworkStats::from_devices(&Vec::<Device>::new()), NetworkStats::default());
    }
}
