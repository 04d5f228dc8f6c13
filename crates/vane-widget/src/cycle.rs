//! One refresh cycle: fetch → normalize → change-detect → persist →
//! render every surface.
//!
//! The cycle never retries on its own; it reports `Retryable` and lets
//! the external scheduler decide when to try again. Every cycle
//! re-reads the state store from scratch, so cycles are independently
//! restartable.

use vane_core::{Observation, StateError, StateStore, Theme};
use vane_weather::{format_temperature, Condition, Reading, WeatherClient};

use crate::detect;
use crate::icons::IconRegistry;
use crate::render::{self, SurfaceDescriptor, WidgetHost};

/// Terminal outcome of one cycle.
///
/// Every fetch failure is `Retryable`; backoff and retry limits live in
/// the scheduler. `Fatal` is reserved for state-store failures, where
/// retrying would only hammer a broken store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Success,
    Retryable,
    Fatal,
}

/// The orchestrator: owns the store, the weather client, the icon
/// registry, and the widget host for the duration of the process.
pub struct RefreshCycle<S, R, H> {
    store: S,
    client: WeatherClient,
    icons: R,
    host: H,
}

impl<S, R, H> RefreshCycle<S, R, H>
where
    S: StateStore,
    R: IconRegistry,
    H: WidgetHost,
{
    pub fn new(store: S, client: WeatherClient, icons: R, host: H) -> Self {
        Self {
            store,
            client,
            icons,
            host,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run one cycle to completion.
    pub async fn run(&mut self) -> CycleOutcome {
        match self.run_inner().await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("State store failure, cycle not retryable: {}", e);
                CycleOutcome::Fatal
            }
        }
    }

    async fn run_inner(&mut self) -> Result<CycleOutcome, StateError> {
        let coord = self.store.coordinate()?;
        let theme = self.store.theme()?;

        let current = match self.client.current(coord).await {
            Ok(current) => current,
            Err(e) => {
                // All fetch failures look the same from here; the
                // scheduler owns the retry policy.
                tracing::warn!("Weather fetch failed: {}", e);
                return Ok(CycleOutcome::Retryable);
            }
        };

        let reading = Reading {
            condition: Condition::from_wmo_code(current.weather_code),
            temperature_c: current.temperature_c,
        };
        tracing::info!(
            "Fetched: {} {}",
            reading.condition.label(),
            format_temperature(reading.temperature_c)
        );

        let prev = self.store.last_observation()?;
        if !detect::is_significant(&prev, &reading) {
            tracing::info!("No significant change, surfaces left as-is");
            return Ok(CycleOutcome::Success);
        }

        // Observation commits before any render is attempted; a failed
        // surface below never rolls it back.
        self.store.set_last_observation(&Observation {
            condition: reading.condition.label().to_string(),
            temperature_c: reading.temperature_c,
        })?;

        self.push_to_surfaces(reading.condition, theme);
        tracing::info!("Surfaces updated");

        Ok(CycleOutcome::Success)
    }

    /// Re-render a single surface from the persisted observation,
    /// without fetching. Used when a surface's size descriptor changes.
    pub fn render_surface(&mut self, surface: &SurfaceDescriptor) -> Result<(), StateError> {
        let theme = self.store.theme()?;
        let last = self.store.last_observation()?;
        let condition = Condition::from_label(&last.condition);

        let instruction = render::render(condition, theme, surface, &self.icons);
        if let Err(e) = self.host.update_surface(&surface.id, &instruction) {
            tracing::warn!("Surface {} update failed: {}", surface.id, e);
        }
        Ok(())
    }

    fn push_to_surfaces(&mut self, condition: Condition, theme: Theme) {
        for surface in self.host.surfaces() {
            let instruction = render::render(condition, theme, &surface, &self.icons);
            if let Err(e) = self.host.update_surface(&surface.id, &instruction) {
                tracing::warn!("Surface {} update failed: {}", surface.id, e);
            }
        }
    }
}
