// ── Dashboard state container ──
//
// Everything the dashboard mutates: the registry, the current selection
// and the status filter. Owned by the top-level controller; every user
// action and simulator tick goes through one of these methods.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};

use super::DeviceRegistry;
use crate::error::CoreError;
use crate::intake::NewDevice;
use crate::model::{Device, DeviceId, IdGenerator};
use crate::simulator::BandwidthSimulator;
use crate::view::{NetworkStats, StatusFilter};

#[derive(Debug, Default)]
pub struct DashboardState {
    registry: DeviceRegistry,
    selected: Option<DeviceId>,
    filter: StatusFilter,
    ids: IdGenerator,
}

impl DashboardState {
    pub fn new(devices: impl IntoIterator<Item = Device>) -> Self {
        Self {
            registry: DeviceRegistry::from_devices(devices),
            ..Self::default()
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn snapshot(&self) -> Arc<Vec<Device>> {
        self.registry.snapshot()
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn selected(&self) -> Option<&DeviceId> {
        self.selected.as_ref()
    }

    pub fn selected_device(&self) -> Option<&Device> {
        self.selected.as_ref().and_then(|id| self.registry.get(id))
    }

    /// Select a device. Returns `false` (selection unchanged) for unknown ids.
    pub fn select(&mut self, id: &DeviceId) -> bool {
        if !self.registry.contains(id) {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Complete an intake payload and append it. Returns the stored device.
    pub fn add_from_intake(&mut self, payload: NewDevice) -> Result<&Device, CoreError> {
        self.add_from_intake_at(payload, Utc::now())
    }

    pub fn add_from_intake_at(
        &mut self,
        payload: NewDevice,
        now: DateTime<Utc>,
    ) -> Result<&Device, CoreError> {
        let id = self.ids.next_at(now);
        let device = payload.into_device(id, now);
        info!(id = %device.id, name = %device.name, kind = %device.kind, "device added");
        self.registry.add(device)
    }

    /// Remove a device, clearing the selection if it pointed there.
    /// Unknown ids leave the state untouched.
    pub fn remove_device(&mut self, id: &DeviceId) -> Option<Device> {
        let removed = self.registry.remove(id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        info!(id = %id, name = %removed.name, "device removed");
        Some(removed)
    }

    /// Connect/disconnect toggle. Returns the new state, or `None` if absent.
    pub fn toggle_device(&mut self, id: &DeviceId) -> Option<&Device> {
        if !self.registry.toggle_status(id) {
            return None;
        }
        let device = self.registry.get(id)?;
        debug!(id = %id, status = %device.status, "device toggled");
        Some(device)
    }

    /// Advance the bandwidth simulation by one tick.
    pub fn simulate<R: Rng>(&mut self, simulator: &BandwidthSimulator, rng: &mut R) -> usize {
        simulator.tick(&mut self.registry, rng)
    }

    // ── Projections ──────────────────────────────────────────────────

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Devices passing the current filter, in registry order.
    pub fn visible_devices(&self) -> Vec<&Device> {
        self.filter.apply(self.registry.iter())
    }

    /// Aggregates over every device, recomputed on each call.
    pub fn stats(&self) -> NetworkStats {
        NetworkStats::from_devices(self.registry.iter())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::intake::DeviceDraft;
    use crate::model::{Bandwidth, DeviceStatus, seed_devices};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded() -> DashboardState {
        DashboardState::new(seed_devices(Utc::now()))
    }

    #[test]
    fn removing_selected_device_clears_selection() {
        let mut state = seeded();
        let id = DeviceId::from("3");
        assert!(state.select(&id));
        assert!(state.remove_device(&id).is_some());
        assert!(state.selected().is_none());
    }

    #[test]
    fn removing_other_device_keeps_selection() {
        let mut state = seeded();
        state.select(&DeviceId::from("3"));
        state.remove_device(&DeviceId::from("4"));
        assert_eq!(state.selected(), Some(&DeviceId::from("3")));
    }

    #[test]
    fn removing_unknown_id_changes_nothing() {
        let mut state = seeded();
        state.select(&DeviceId::from("2"));
        let before = state.snapshot();
        assert!(state.remove_device(&DeviceId::from("missing")).is_none());
        assert_eq!(*state.snapshot(), *before);
        assert_eq!(state.selected(), Some(&DeviceId::from("2")));
    }

    #[test]
    fn selecting_unknown_id_is_ignored() {
        let mut state = seeded();
        assert!(!state.select(&DeviceId::from("missing")));
        assert!(state.selected().is_none());
    }

    #[test]
    fn valid_intake_adds_exactly_one_device() {
        let mut state = seeded();
        let before = state.registry().len();
        let now = Utc::now();
        let draft = DeviceDraft {
            name: "Echo Dot".into(),
            mac: "aa:bb:cc:00:11:22".into(),
            ip: "192.168.1.120".into(),
            ..DeviceDraft::default()
        };
        let added = state
            .add_from_intake_at(draft.validate().unwrap(), now)
            .unwrap()
            .clone();
        assert_eq!(state.registry().len(), before + 1);
        assert_eq!(added.bandwidth, Bandwidth::ZERO);
        assert_eq!(added.last_seen, now);
        assert_eq!(added.id.as_str(), now.timestamp_millis().to_string());
        assert_eq!(state.registry().iter().last().map(|d| &d.id), Some(&added.id));
    }

    #[test]
    fn two_intakes_in_the_same_instant_get_distinct_ids() {
        let mut state = DashboardState::default();
        let now = Utc::now();
        let payload = DeviceDraft {
            name: "a".into(),
            mac: "m".into(),
            ..DeviceDraft::default()
        }
        .validate()
        .unwrap();
        state.add_from_intake_at(payload.clone(), now).unwrap();
        state.add_from_intake_at(payload, now).unwrap();
        assert_eq!(state.registry().len(), 2);
    }

    #[test]
    fn toggle_offline_zeroes_then_simulator_leaves_it_alone() {
        let mut state = seeded();
        let id = DeviceId::from("2");
        let toggled = state.toggle_device(&id).unwrap();
        assert_eq!(toggled.status, DeviceStatus::Offline);
        assert_eq!(toggled.bandwidth, Bandwidth::ZERO);

        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            state.simulate(&BandwidthSimulator::default(), &mut rng);
        }
        assert_eq!(state.registry().get(&id).unwrap().bandwidth, Bandwidth::ZERO);
    }

    #[test]
    fn stats_track_mutations_without_caching() {
        let mut state = seeded();
        let before = state.stats();
        state.toggle_device(&DeviceId::from("1"));
        let after = state.stats();
        assert_eq!(after.online, before.online - 1);
        assert!((before.total_download - after.total_download - 450.0).abs() < 1e-9);
        let expected: f64 = state.registry().iter().map(|d| d.bandwidth.download).sum();
        assert!((after.total_download - expected).abs() < 1e-9);
    }

    #[test]
    fn visible_devices_follow_the_filter() {
        let mut state = seeded();
        state.set_filter(StatusFilter::Offline);
        let names: Vec<&str> = state.visible_devices().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["iPad Pro"]);
    }
}
