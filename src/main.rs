use anyhow::Context;
use clap::Parser;
use mouse_tracker::{OutputFormat, RunOptions, TrackerConfig};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "mouse-tracker",
    version,
    about = "Show the pointer position and a dot that follows it"
)]
struct Cli {
    /// JSON config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Frame output format (overrides the config file)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Replay a recorded mouse-moves.json trace instead of the live cursor
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,
    /// Unmount after this many seconds
    #[arg(long)]
    duration_secs: Option<f64>,
    /// Live cursor poll interval in milliseconds (overrides the config file)
    #[arg(long)]
    poll_interval_ms: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mouse_tracker::init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TrackerConfig::default(),
    };
    if let Some(format) = cli.format {
        config.output = format;
    }
    if let Some(interval) = cli.poll_interval_ms {
        config.poll_interval_ms = interval;
    }
    config.validate().context("invalid configuration")?;

    let duration = cli
        .duration_secs
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("--duration-secs must be a non-negative number")?;

    tracing::info!("Starting mouse-tracker v{}", env!("CARGO_PKG_VERSION"));

    mouse_tracker::run(RunOptions {
        config,
        replay: cli.replay,
        duration,
    })
    .await
    .context("tracker failed")
}
