//! Weather retrieval for vane: WMO condition mapping and the
//! Open-Meteo current-conditions client.

pub mod client;
pub mod types;

pub use client::{CurrentConditions, FetchError, WeatherClient};
pub use types::{format_temperature, Condition, Reading};
