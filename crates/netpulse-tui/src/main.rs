//! `netpulse` — live terminal dashboard for a simulated home network.
//!
//! Two views over the same device set: a card grid (filterable by status)
//! and a radial topology graph. A background timer random-walks the
//! bandwidth of online devices; devices can be added, toggled and removed
//! from the keyboard.
//!
//! Logs go to a file (default `/tmp/netpulse.log`) so they never corrupt
//! the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod sim_bridge;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use netpulse_config::{Config, View};

use crate::app::App;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    Grid,
    Topology,
}

impl From<ViewArg> for View {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Grid => Self::Grid,
            ViewArg::Topology => Self::Topology,
        }
    }
}

/// Live terminal dashboard for a simulated home network.
#[derive(Parser, Debug)]
#[command(name = "netpulse", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start with an empty network instead of the demo devices
    #[arg(long)]
    no_seed: bool,

    /// Simulator interval in milliseconds (0 disables the simulator)
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// View to open on
    #[arg(long, value_enum)]
    view: Option<ViewArg>,

    /// Seed the simulator's random generator for a reproducible run
    #[arg(long, value_name = "SEED")]
    rng_seed: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "/tmp/netpulse.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply(&self, config: &mut Config) {
        if self.no_seed {
            config.seed_devices = false;
        }
        match self.interval_ms {
            Some(0) => config.simulator.enabled = false,
            Some(ms) => config.simulator.interval_ms = ms,
            None => {}
        }
        if let Some(view) = self.view {
            config.ui.default_view = view.into();
        }
    }
}

/// File-only tracing. Stdout and stderr belong to the terminal UI.
/// The returned guard flushes the writer when dropped.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "netpulse={level},netpulse_core={level},netpulse_config={level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_name = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("netpulse.log"));

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, log_name));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let mut config = match &cli.config {
        Some(path) => netpulse_config::load_config_from(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => netpulse_config::load_config().wrap_err("failed to load config")?,
    };
    cli.apply(&mut config);

    info!(
        seed = config.seed_devices,
        simulator = config.simulator.enabled,
        "starting netpulse"
    );

    let mut app = App::new(&config, cli.rng_seed);
    app.run().await
}
