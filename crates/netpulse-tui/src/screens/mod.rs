//! Screen implementations. Each screen is a top-level Component.

pub mod add_device;
pub mod grid;
pub mod topology;

use crate::component::Component;
use crate::screen::ScreenId;

/// One component per tab-bar screen.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Grid, Box::new(grid::GridScreen::new())),
        (ScreenId::Topology, Box::new(topology::TopologyScreen::new())),
    ]
}
