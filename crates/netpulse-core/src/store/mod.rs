// ── In-memory state ──
//
// The device registry and the dashboard state container that owns it.

mod registry;
mod state;

pub use registry::DeviceRegistry;
pub use state::DashboardState;
