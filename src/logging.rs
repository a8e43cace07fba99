use anyhow::{Context, Result};
use std::{fs::File, path::Path, sync::Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the log subscriber.
///
/// The terminal belongs to the UI, so logs only go to a file and nothing is
/// installed without one. `RUST_LOG` overrides the level chosen by `debug`.
pub fn init(log_file: Option<&Path>, debug: bool) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let default_filter = if debug { "dsviz=debug" } else { "dsviz=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("failed to install log subscriber")?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
