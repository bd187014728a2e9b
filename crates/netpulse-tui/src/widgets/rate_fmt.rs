//! Throughput and relative-time formatting.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Per-device rate with one decimal: "85.0 Mbps".
pub fn fmt_mbps(mbps: f64) -> String {
    format!("{mbps:.1} Mbps")
}

/// Aggregate rate with no decimals: "469 Mbps".
pub fn fmt_mbps_total(mbps: f64) -> String {
    format!("{mbps:.0} Mbps")
}

/// Coarse relative time: "just now", "5m ago", "1h 5m ago".
///
/// Under a minute (or in the future) collapses to "just now"; beyond that the
/// seconds are dropped, and beyond a day so are the minutes.
pub fn fmt_last_seen(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let secs = u64::try_from(now.signed_duration_since(then).num_seconds()).unwrap_or(0);
    if secs < 60 {
        return "just now".to_owned();
    }
    let unit = if secs < 86_400 { 60 } else { 3_600 };
    let rounded = Duration::from_secs(secs / unit * unit);
    format!("{} ago", humantime::format_duration(rounded))
}
