//! Configuration for the NetPulse dashboard.
//!
//! Layered with figment: built-in defaults, then the TOML file, then
//! `NETPULSE_`-prefixed environment variables. The result is translated
//! into the core crate's simulator and intake types.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use netpulse_core::{BandwidthSimulator, DeviceDraft, DeviceKind, DeviceStatus};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config structs ──────────────────────────────────────────────────

/// Which screen the dashboard opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Grid,
    Topology,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Start with the fabricated home network instead of an empty one.
    #[serde(default = "default_true")]
    pub seed_devices: bool,

    #[serde(default)]
    pub simulator: SimulatorSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub intake: IntakeSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_devices: true,
            simulator: SimulatorSettings::default(),
            ui: UiSettings::default(),
            intake: IntakeSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulatorSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_download_jitter")]
    pub download_jitter: f64,

    #[serde(default = "default_upload_jitter")]
    pub upload_jitter: f64,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: default_interval_ms(),
            download_jitter: default_download_jitter(),
            upload_jitter: default_upload_jitter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default = "default_render_rate_ms")]
    pub render_rate_ms: u64,

    #[serde(default)]
    pub default_view: View,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            render_rate_ms: default_render_rate_ms(),
            default_view: View::default(),
        }
    }
}

/// Initial values of the Add Device form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IntakeSettings {
    #[serde(default)]
    pub default_kind: DeviceKind,

    #[serde(default)]
    pub default_status: DeviceStatus,

    #[serde(default = "default_signal")]
    pub default_signal: u8,

    #[serde(default = "default_ip_prefix")]
    pub ip_prefix: String,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            default_kind: DeviceKind::default(),
            default_status: DeviceStatus::default(),
            default_signal: default_signal(),
            ip_prefix: default_ip_prefix(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_interval_ms() -> u64 {
    2_000
}
fn default_download_jitter() -> f64 {
    5.0
}
fn default_upload_jitter() -> f64 {
    1.5
}
fn default_tick_rate_ms() -> u64 {
    250
}
fn default_render_rate_ms() -> u64 {
    33
}
fn default_signal() -> u8 {
    netpulse_core::intake::DEFAULT_SIGNAL
}
fn default_ip_prefix() -> String {
    netpulse_core::intake::DEFAULT_IP_PREFIX.into()
}

// ── Validation & translation ────────────────────────────────────────

impl Config {
    /// Reject settings the dashboard cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulator.interval_ms == 0 {
            return Err(invalid("simulator.interval_ms", "must be greater than zero"));
        }
        for (field, value) in [
            ("simulator.download_jitter", self.simulator.download_jitter),
            ("simulator.upload_jitter", self.simulator.upload_jitter),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, "must be a non-negative number"));
            }
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(invalid("ui.tick_rate_ms", "must be greater than zero"));
        }
        if self.ui.render_rate_ms == 0 {
            return Err(invalid("ui.render_rate_ms", "must be greater than zero"));
        }
        if self.intake.default_signal > 100 {
            return Err(invalid("intake.default_signal", "must be between 0 and 100"));
        }
        Ok(())
    }

    pub fn simulator(&self) -> BandwidthSimulator {
        BandwidthSimulator {
            interval: Duration::from_millis(self.simulator.interval_ms),
            download_jitter: self.simulator.download_jitter,
            upload_jitter: self.simulator.upload_jitter,
        }
    }

    /// A blank intake form prefilled with the configured defaults.
    pub fn intake_draft(&self) -> DeviceDraft {
        DeviceDraft {
            kind: self.intake.default_kind,
            status: self.intake.default_status,
            signal_strength: self.intake.default_signal,
            ip: self.intake.ip_prefix.clone(),
            ..DeviceDraft::default()
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms)
    }

    pub fn render_rate(&self) -> Duration {
        Duration::from_millis(self.ui.render_rate_ms)
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "netpulse", "netpulse").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netpulse");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETPULSE_").split("__"))
}

/// Load the config from the default path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from an explicit TOML file + environment.
///
/// A missing file is not an error; the defaults apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    config.validate()?;
    Ok(config)
}
