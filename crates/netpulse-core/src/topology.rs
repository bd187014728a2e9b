// ── Radial topology layout ──
//
// The first router sits at the viewport center; every non-router device is
// spaced evenly on a circle around it, starting at the top and moving
// clockwise (screen coordinates, y grows downward). Routers after the first
// get no position.

use std::f64::consts::{FRAC_PI_2, TAU};

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Device, DeviceId};

/// Fraction of the smaller viewport dimension used as the ring radius.
pub const RING_RADIUS_FACTOR: f64 = 0.35;

/// A 2D position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A connection from the router to one ring device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub device: DeviceId,
    pub from: Point,
    pub to: Point,
    /// Drawn highlighted when the device is online.
    pub active: bool,
}

/// Computed node positions for one device set and viewport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopologyLayout {
    pub center: Point,
    pub radius: f64,
    router: Option<DeviceId>,
    positions: IndexMap<DeviceId, Point>,
    links: Vec<Link>,
}

impl TopologyLayout {
    /// The device placed at the center, if any.
    pub fn router(&self) -> Option<&DeviceId> {
        self.router.as_ref()
    }

    pub fn position(&self, id: &DeviceId) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Router-to-device connections. Empty when there is no router.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Lay out `devices` in a `width` x `height` viewport.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn layout(devices: &[Device], width: f64, height: f64) -> TopologyLayout {
    let center = Point::new(width / 2.0, height / 2.0);
    let radius = width.min(height) * RING_RADIUS_FACTOR;

    let router = devices
        .iter()
        .find(|d| d.kind.is_router())
        .map(|d| d.id.clone());
    let ring: Vec<&Device> = devices.iter().filter(|d| !d.kind.is_router()).collect();

    let mut positions = IndexMap::with_capacity(ring.len() + 1);
    if let Some(id) = &router {
        positions.insert(id.clone(), center);
    }

    let n = ring.len() as f64;
    let mut links = Vec::with_capacity(if router.is_some() { ring.len() } else { 0 });
    for (i, device) in ring.iter().enumerate() {
        let angle = -FRAC_PI_2 + TAU * i as f64 / n;
        let point = Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        );
        positions.insert(device.id.clone(), point);
        if router.is_some() {
            links.push(Link {
                device: device.id.clone(),
                from: center,
                to: point,
                active: device.is_online(),
            });
        }
    }

    TopologyLayout {
        center,
        radius,
        router,
        positions,
        links,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Bandwidth, DeviceKind, DeviceStatus};
    use chrono::Utc;

    const EPS: f64 = 1e-9;

    fn device(id: &str, kind: DeviceKind, status: DeviceStatus) -> Device {
        Device {
            id: DeviceId::from(id),
            name: id.to_owned(),
            kind,
            ip: "192.168.1.2".into(),
            mac: "AA:BB:CC:DD:EE:FF".into(),
            status,
            bandwidth: Bandwidth::ZERO,
            signal_strength: None,
            last_seen: Utc::now(),
        }
    }

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < EPS && (actual.y - y).abs() < EPS,
            "expected ({x}, {y}), got ({}, {})",
            actual.x,
            actual.y
        );
    }

    #[test]
    fn router_centered_with_four_devices_on_ring() {
        let devices = vec![
            device("r", DeviceKind::Router, DeviceStatus::Online),
            device("a", DeviceKind::Laptop, DeviceStatus::Online),
            device("b", DeviceKind::Phone, DeviceStatus::Online),
            device("c", DeviceKind::Tablet, DeviceStatus::Offline),
            device("d", DeviceKind::Server, DeviceStatus::Warning),
        ];
        let topo = layout(&devices, 800.0, 600.0);

        assert!((topo.radius - 210.0).abs() < EPS);
        assert_eq!(topo.router(), Some(&DeviceId::from("r")));
        assert_point(topo.position(&DeviceId::from("r")).unwrap(), 400.0, 300.0);
        // -90°, 0°, 90°, 180°
        assert_point(topo.position(&DeviceId::from("a")).unwrap(), 400.0, 90.0);
        assert_point(topo.position(&DeviceId::from("b")).unwrap(), 610.0, 300.0);
        assert_point(topo.position(&DeviceId::from("c")).unwrap(), 400.0, 510.0);
        assert_point(topo.position(&DeviceId::from("d")).unwrap(), 190.0, 300.0);

        for id in ["a", "b", "c", "d"] {
            let p = topo.position(&DeviceId::from(id)).unwrap();
            assert!((p.distance_to(topo.center) - 210.0).abs() < EPS);
        }
    }

    #[test]
    fn links_are_active_only_for_online_devices() {
        let devices = vec![
            device("r", DeviceKind::Router, DeviceStatus::Online),
            device("a", DeviceKind::Laptop, DeviceStatus::Online),
            device("b", DeviceKind::Phone, DeviceStatus::Offline),
        ];
        let topo = layout(&devices, 100.0, 100.0);
        let active: Vec<(&str, bool)> = topo
            .links()
            .iter()
            .map(|l| (l.device.as_str(), l.active))
            .collect();
        assert_eq!(active, vec![("a", true), ("b", false)]);
    }

    #[test]
    fn no_router_puts_everything_on_the_ring() {
        let devices = vec![
            device("a", DeviceKind::Laptop, DeviceStatus::Online),
            device("b", DeviceKind::Phone, DeviceStatus::Online),
        ];
        let topo = layout(&devices, 400.0, 400.0);
        assert!(topo.router().is_none());
        assert!(topo.links().is_empty());
        assert_eq!(topo.len(), 2);
        assert_point(topo.position(&DeviceId::from("a")).unwrap(), 200.0, 60.0);
        assert_point(topo.position(&DeviceId::from("b")).unwrap(), 200.0, 340.0);
    }

    #[test]
    fn only_first_router_is_centered() {
        let devices = vec![
            device("r1", DeviceKind::Router, DeviceStatus::Online),
            device("r2", DeviceKind::Router, DeviceStatus::Online),
        ];
        let topo = layout(&devices, 200.0, 200.0);
        assert_eq!(topo.router(), Some(&DeviceId::from("r1")));
        assert!(topo.position(&DeviceId::from("r2")).is_none());
        assert_eq!(topo.len(), 1);
        assert!(topo.links().is_empty());
    }

    #[test]
    fn extra_router_does_not_shift_ring_angles() {
        let devices = vec![
            device("r1", DeviceKind::Router, DeviceStatus::Online),
            device("a", DeviceKind::Laptop, DeviceStatus::Online),
            device("r2", DeviceKind::Router, DeviceStatus::Online),
            device("b", DeviceKind::Phone, DeviceStatus::Online),
            device("c", DeviceKind::Tablet, DeviceStatus::Online),
        ];
        let topo = layout(&devices, 800.0, 600.0);

        // three ring devices: -90°, 30°, 150°
        let (s30, c30) = 30f64.to_radians().sin_cos();
        assert_point(topo.position(&DeviceId::from("a")).unwrap(), 400.0, 90.0);
        assert_point(
            topo.position(&DeviceId::from("b")).unwrap(),
            400.0 + 210.0 * c30,
            300.0 + 210.0 * s30,
        );
        assert_point(
            topo.position(&DeviceId::from("c")).unwrap(),
            400.0 - 210.0 * c30,
            300.0 + 210.0 * s30,
        );
        let linked: Vec<&str> = topo.links().iter().map(|l| l.device.as_str()).collect();
        assert_eq!(linked, vec!["a", "b", "c"]);
    }

    #[test]
    fn router_alone_yields_single_position() {
        let devices = vec![device("r", DeviceKind::Router, DeviceStatus::Online)];
        let topo = layout(&devices, 300.0, 200.0);
        assert_eq!(topo.len(), 1);
        assert!(topo.links().is_empty());
    }

    #[test]
    fn empty_device_set_yields_empty_layout() {
        let topo = layout(&[], 800.0, 600.0);
        assert!(topo.is_empty());
        assert!(topo.router().is_none());
    }
}
