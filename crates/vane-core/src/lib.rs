//! Core state and configuration for the vane widget refresher.

pub mod config;
pub mod state;

pub use config::{Config, LocationConfig, WeatherConfig, WidgetConfig};
pub use state::{
    Coordinate, MemoryStateStore, Observation, SqliteStateStore, StateError, StateStore, Theme,
};

use anyhow::Result;

/// Initialize tracing for the process.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("vane core initialized");
    Ok(())
}
