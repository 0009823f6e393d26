mod aircraft;
mod alert;
mod config;
mod feed;
mod geometry;
mod prediction;
mod zone;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use zone::GeofenceEvaluator;

/// Checks an ADS-B snapshot for aircraft whose projected path crosses the
/// configured watch zone, and raises an alert for each one.
#[derive(Debug, Parser)]
#[command(name = "lapwing", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Evaluate a local snapshot file instead of fetching the feed
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Evaluate and print alerts without delivering them
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(cli.config.as_deref())?;
    let evaluator = GeofenceEvaluator::new(
        config.zone.watch_zone(),
        config.prediction.horizon_hours(),
    );

    let snapshot = read_snapshot(&cli, &config)?;
    match snapshot.taken_at {
        Some(taken_at) => {
            info!(%taken_at, aircraft = snapshot.aircraft.len(), "snapshot loaded")
        }
        None => info!(aircraft = snapshot.aircraft.len(), "snapshot loaded"),
    }

    let alerts = evaluator.evaluate_batch(&snapshot.aircraft);
    if alerts.is_empty() {
        info!("no aircraft approaching the watch zone");
        return Ok(());
    }

    for alert in &alerts {
        println!("{alert}");
    }

    if cli.dry_run || !config.alerting.enabled {
        return Ok(());
    }

    match &config.alerting.endpoint_url {
        Some(url) => {
            // A failed POST should not fail the run; the alerts were already
            // printed above.
            if let Err(err) = alert::deliver(url, &alerts) {
                warn!(%err, "alert delivery failed");
            }
        }
        None => warn!("alerting enabled but no endpoint_url configured"),
    }

    Ok(())
}

fn read_snapshot(cli: &Cli, config: &Config) -> Result<feed::Snapshot> {
    if let Some(path) = &cli.input {
        return feed::load(path).with_context(|| format!("reading {}", path.display()));
    }
    if let Some(path) = &config.feed.file {
        return feed::load(path).with_context(|| format!("reading {}", path.display()));
    }
    match &config.feed.url {
        Some(url) => feed::fetch(url, Duration::from_secs(config.feed.timeout_seconds))
            .with_context(|| format!("fetching {url}")),
        None => bail!("no snapshot source: set feed.url or feed.file in the config, or pass --input"),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "lapwing=debug" } else { "lapwing=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}
