// ── Domain model ──
//
// A single entity, the simulated network device, plus the identity and
// telemetry types it is built from.

pub mod device;
pub mod device_id;
pub mod seed;

// ── Re-exports ──────────────────────────────────────────────────────

pub use device::{Bandwidth, Device, DeviceKind, DeviceStatus};
pub use device_id::{DeviceId, IdGenerator};
pub use seed::seed_devices;
