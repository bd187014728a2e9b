//! Small reusable rendering helpers shared by the screens.

pub mod device_icon;
pub mod rate_fmt;
pub mod signal_bars;
pub mod stats_panel;
pub mod status_indicator;
pub mod sub_tabs;
