//! Kind-specific glyphs and colours.

use netpulse_core::DeviceKind;
use ratatui::style::Color;

use crate::theme;

/// Node radius on the topology canvas, in canvas units.
pub const ROUTER_RADIUS: f64 = 2.4;
pub const NODE_RADIUS: f64 = 1.6;

pub fn glyph(kind: DeviceKind) -> &'static str {
    match kind {
        DeviceKind::Router => "◎",
        DeviceKind::Laptop => "▭",
        DeviceKind::Phone => "▯",
        DeviceKind::Tablet => "▮",
        DeviceKind::SmartTv => "▣",
        DeviceKind::Iot => "✱",
        DeviceKind::Server => "≣",
        DeviceKind::Desktop => "▤",
    }
}

pub fn color(kind: DeviceKind) -> Color {
    match kind {
        DeviceKind::Router => theme::DEEP_BLUE,
        DeviceKind::Laptop | DeviceKind::Desktop => theme::NEON_CYAN,
        DeviceKind::Phone | DeviceKind::Tablet => theme::LIGHT_BLUE,
        DeviceKind::SmartTv => theme::CORAL,
        DeviceKind::Iot => theme::ELECTRIC_YELLOW,
        DeviceKind::Server => theme::ELECTRIC_PURPLE,
    }
}

pub fn node_radius(kind: DeviceKind) -> f64 {
    if kind.is_router() {
        ROUTER_RADIUS
    } else {
        NODE_RADIUS
    }
}
