//! Domain layer for the NetPulse simulated home-network dashboard.
//!
//! Everything here is in-memory and synchronous; no real network is probed.
//!
//! - **[`DashboardState`]** — The state container owned by the UI
//!   controller: a [`DeviceRegistry`], the current selection and the
//!   [`StatusFilter`]. All mutations (add, remove, toggle, simulator tick)
//!   go through it.
//!
//! - **[`BandwidthSimulator`]** — Random-walk perturbation of online
//!   devices' throughput, one tick at a time. The caller owns the timer.
//!
//! - **[`topology::layout`]** — Radial placement: the first router at the
//!   center, every other device evenly spaced on a ring.
//!
//! - **[`DeviceDraft`]** — Intake form validation, producing a
//!   [`NewDevice`] payload the state container completes and stores.
//!
//! - **Domain model** ([`model`]) — [`Device`], [`DeviceKind`],
//!   [`DeviceStatus`], [`Bandwidth`], and the seed network.

pub mod error;
pub mod intake;
pub mod model;
pub mod simulator;
pub mod store;
pub mod topology;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use intake::{DeviceDraft, NewDevice};
pub use simulator::BandwidthSimulator;
pub use store::{DashboardState, DeviceRegistry};
pub use topology::{Link, Point, TopologyLayout};
pub use view::{NetworkStats, StatusFilter};

pub use model::{Bandwidth, Device, DeviceId, DeviceKind, DeviceStatus, IdGenerator, seed_devices};
