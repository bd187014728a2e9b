// ── Startup devices ──
//
// The fabricated home network shown when the dashboard opens.

use chrono::{DateTime, Duration, Utc};

use super::device::{Bandwidth, Device, DeviceKind, DeviceStatus};
use super::device_id::DeviceId;

struct SeedRow {
    id: &'static str,
    name: &'static str,
    kind: DeviceKind,
    ip: &'static str,
    mac: &'static str,
    status: DeviceStatus,
    download: f64,
    upload: f64,
    signal: u8,
    seen_ago_secs: i64,
}

const SEED: [SeedRow; 8] = [
    SeedRow {
        id: "1",
        name: "Main Router",
        kind: DeviceKind::Router,
        ip: "192.168.1.1",
        mac: "AA:BB:CC:DD:EE:01",
        status: DeviceStatus::Online,
        download: 450.0,
        upload: 120.0,
        signal: 100,
        seen_ago_secs: 0,
    },
    SeedRow {
        id: "2",
        name: "MacBook Pro",
        kind: DeviceKind::Laptop,
        ip: "192.168.1.42",
        mac: "AA:BB:CC:DD:EE:02",
        status: DeviceStatus::Online,
        download: 85.0,
        upload: 12.0,
        signal: 92,
        seen_ago_secs: 0,
    },
    SeedRow {
        id: "3",
        name: "iPhone 15",
        kind: DeviceKind::Phone,
        ip: "192.168.1.55",
        mac: "AA:BB:CC:DD:EE:03",
        status: DeviceStatus::Online,
        download: 22.0,
        upload: 5.0,
        signal: 78,
        seen_ago_secs: 0,
    },
    SeedRow {
        id: "4",
        name: "Living Room TV",
        kind: DeviceKind::SmartTv,
        ip: "192.168.1.60",
        mac: "AA:BB:CC:DD:EE:04",
        status: DeviceStatus::Online,
        download: 45.0,
        upload: 2.0,
        signal: 65,
        seen_ago_secs: 0,
    },
    SeedRow {
        id: "5",
        name: "Smart Thermostat",
        kind: DeviceKind::Iot,
        ip: "192.168.1.71",
        mac: "AA:BB:CC:DD:EE:05",
        status: DeviceStatus::Warning,
        download: 0.5,
        upload: 0.1,
        signal: 45,
        seen_ago_secs: 300,
    },
    SeedRow {
        id: "6",
        name: "NAS Server",
        kind: DeviceKind::Server,
        ip: "192.168.1.100",
        mac: "AA:BB:CC:DD:EE:06",
        status: DeviceStatus::Online,
        download: 200.0,
        upload: 150.0,
        signal: 100,
        seen_ago_secs: 0,
    },
    SeedRow {
        id: "7",
        name: "iPad Pro",
        kind: DeviceKind::Tablet,
        ip: "192.168.1.88",
        mac: "AA:BB:CC:DD:EE:07",
        status: DeviceStatus::Offline,
        download: 0.0,
        upload: 0.0,
        signal: 0,
        seen_ago_secs: 3_600,
    },
    SeedRow {
        id: "8",
        name: "Gaming PC",
        kind: DeviceKind::Desktop,
        ip: "192.168.1.33",
        mac: "AA:BB:CC:DD:EE:08",
        status: DeviceStatus::Online,
        download: 120.0,
        upload: 35.0,
        signal: 95,
        seen_ago_secs: 0,
    },
];

/// Build the seed device list, with `last_seen` relative to `now`.
pub fn seed_devices(now: DateTime<Utc>) -> Vec<Device> {
    SEED.iter()
        .map(|row| Device {
            id: DeviceId::from(row.id),
            name: row.name.to_owned(),
            kind: row.kind,
            ip: row.ip.to_owned(),
            mac: row.mac.to_owned(),
            status: row.status,
            bandwidth: Bandwidth::new(row.download, row.upload),
            signal_strength: Some(row.signal),
            last_seen: now - Duration::seconds(row.seen_ago_secs),
        })
        .collect()
}
