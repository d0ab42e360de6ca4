//! VoxFlow - Mock backend and campaign simulator for a voice AI agent console

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxflow=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting VoxFlow v{}", env!("CARGO_PKG_VERSION"));

    // Run CLI
    voxflow::cli::run()?;

    Ok(())
}
