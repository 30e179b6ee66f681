//! Mouse Tracker - a dot that follows the pointer.
//!
//! A position source subscribes to the host's pointer-move channel, and a
//! pure display view turns each coordinate snapshot into a label plus a
//! marker translated to that coordinate. Feeds (live cursor polling or a
//! recorded trace) drive the channel; surfaces show the rendered frames.

pub mod capture;
pub mod config;
pub mod error;
pub mod pointer;
pub mod surface;
pub mod tracker;
pub mod view;

pub use config::{OutputFormat, TrackerConfig};
pub use error::{TrackerError, TrackerResult};
pub use pointer::{PointerCoordinate, PointerHub, PositionSource};
pub use tracker::{MountedTracker, MouseTracker};
pub use view::{render, ViewOptions, ViewTree};

use capture::{LivePointerFeed, PointerFeed, ReplayFeed};
use std::path::PathBuf;
use std::time::Duration;
use surface::{DisplaySurface, JsonLinesSurface, TerminalSurface};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging. Logs go to stderr; stdout belongs to the surface.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mouse_tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// What to run and for how long
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: TrackerConfig,
    /// Recorded trace to replay instead of the live cursor
    pub replay: Option<PathBuf>,
    /// Unmount after this long; otherwise run until interrupted
    pub duration: Option<Duration>,
}

async fn sleep_or_forever(duration: Option<Duration>) {
    match duration {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

/// Mount the tracker on stdout and feed it until shutdown
pub async fn run(options: RunOptions) -> TrackerResult<()> {
    let RunOptions {
        config,
        replay,
        duration,
    } = options;

    let hub = PointerHub::new();

    let mut feed: Box<dyn PointerFeed> = match &replay {
        Some(path) => Box::new(ReplayFeed::load(path)?),
        None => Box::new(LivePointerFeed::new(config.poll_interval()?)),
    };

    let surface: Box<dyn DisplaySurface> = match config.output {
        OutputFormat::Terminal => Box::new(TerminalSurface::new(std::io::stdout())),
        OutputFormat::Json => Box::new(JsonLinesSurface::new(std::io::stdout())),
    };

    let tracker = MouseTracker::new(config.view_options()).mount(&hub, surface)?;
    feed.start(hub.clone()).await?;
    tracing::info!("Pointer feed '{}' started", feed.id());

    let shutdown = async {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
            _ = sleep_or_forever(duration) => tracing::info!("Run duration elapsed"),
            _ = feed.finished() => tracing::info!("Pointer feed drained"),
        }
    };

    let result = tracker.run_until(shutdown).await;
    feed.stop().await?;

    if config.output == OutputFormat::Terminal {
        println!();
    }

    result.map(|_| ())
}
