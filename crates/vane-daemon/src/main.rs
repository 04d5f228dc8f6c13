//! Headless scheduler shell around the refresh cycle: loads config,
//! seeds the state store, and invokes one cycle per tick. A
//! `Retryable` outcome just waits for the next tick; retry/backoff
//! policy lives here, never in the core.

use std::time::Duration;

use anyhow::{Context, Result};

use vane_core::{Config, Coordinate, SqliteStateStore, StateStore};
use vane_weather::WeatherClient;
use vane_widget::{
    CycleOutcome, RefreshCycle, RenderInstruction, StaticIconRegistry, SurfaceDescriptor,
    WidgetHost,
};

/// Render sink that logs instructions instead of drawing. Stands in
/// for a real widget host; its surfaces come from the config.
struct LoggingHost {
    surfaces: Vec<SurfaceDescriptor>,
}

impl WidgetHost for LoggingHost {
    fn surfaces(&self) -> Vec<SurfaceDescriptor> {
        self.surfaces.clone()
    }

    fn update_surface(&mut self, id: &str, instruction: &RenderInstruction) -> Result<()> {
        tracing::info!(
            "surface {}: layout {:?}, icon {:?}, label {:?}",
            id,
            instruction.layout,
            instruction.icon,
            instruction.label
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    vane_core::init()?;

    let config = Config::load_validated()?;
    std::fs::create_dir_all(&config.data_dir).context("Failed to create data directory")?;

    let store =
        SqliteStateStore::open(config.state_db_path()).context("Failed to open state store")?;

    // The daemon plays the settings and location collaborators: the
    // configured theme and coordinate go into the store before the
    // first cycle reads them back.
    store.set_theme(config.widget.theme)?;
    if let Some(loc) = config.location {
        store.set_coordinate(Coordinate {
            latitude: loc.latitude,
            longitude: loc.longitude,
        })?;
    }

    let host = LoggingHost {
        surfaces: config
            .widget
            .surface_widths
            .iter()
            .enumerate()
            .map(|(index, width)| SurfaceDescriptor {
                id: format!("surface-{}", index),
                width: *width,
            })
            .collect(),
    };

    let client = WeatherClient::new().context("Failed to build weather client")?;
    let mut cycle = RefreshCycle::new(
        store,
        client,
        StaticIconRegistry::with_builtin_sets(),
        host,
    );

    let interval_minutes = u64::from(config.weather.refresh_minutes.max(1));
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_minutes * 60));

    tracing::info!(
        "vane daemon started, refreshing every {} minutes",
        interval_minutes
    );

    loop {
        ticker.tick().await;
        match cycle.run().await {
            CycleOutcome::Success => {}
            CycleOutcome::Retryable => {
                tracing::warn!("Cycle failed, retrying on the next tick");
            }
            CycleOutcome::Fatal => {
                anyhow::bail!("State store is broken, giving up");
            }
        }
    }
}
