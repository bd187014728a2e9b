// ── Bandwidth simulator ──
//
// Random-walk perturbation of online devices' throughput. The timer that
// drives it lives with the UI event loop; this module only knows how to
// apply one tick to a registry.

use std::time::Duration;

use rand::Rng;
use tracing::trace;

use crate::store::DeviceRegistry;

/// Tick cadence and per-tick jitter bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthSimulator {
    pub interval: Duration,
    /// Download moves by a uniform delta in `[-download_jitter, download_jitter]` Mbps.
    pub download_jitter: f64,
    /// Upload moves by a uniform delta in `[-upload_jitter, upload_jitter]` Mbps.
    pub upload_jitter: f64,
}

impl Default for BandwidthSimulator {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            download_jitter: 5.0,
            upload_jitter: 1.5,
        }
    }
}

impl BandwidthSimulator {
    /// Perturb every online device once. Returns how many were touched.
    ///
    /// Values are floored at zero; offline and warning devices are left as is.
    pub fn tick<R: Rng>(&self, registry: &mut DeviceRegistry, rng: &mut R) -> usize {
        let down = self.download_jitter.abs();
        let up = self.upload_jitter.abs();
        let touched = registry.update_where(
            |d| d.is_online(),
            |d| {
                d.bandwidth.download = (d.bandwidth.download + rng.random_range(-down..=down)).max(0.0);
                d.bandwidth.upload = (d.bandwidth.upload + rng.random_range(-up..=up)).max(0.0);
            },
        );
        trace!(touched, "bandwidth tick");
        touched
    }
}
