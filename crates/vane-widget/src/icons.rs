//! Themed icon resolution with a baseline fallback.
//!
//! Icons are looked up by name, `{base}{theme suffix}`. A theme's set
//! may be incomplete; the baseline (`_ml`) set is treated as complete,
//! so a missing themed icon falls back to the baseline icon for the
//! same condition. Only when even that is unregistered does the caller
//! get `None`, which renders as "no icon" and must never abort a cycle.

use std::collections::HashMap;

use vane_core::Theme;
use vane_weather::Condition;

/// Opaque icon resource reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IconId(pub u32);

/// Name → resource lookup, supplied by the host. Absence is a value,
/// not an error.
pub trait IconRegistry {
    fn lookup(&self, name: &str) -> Option<IconId>;
}

/// Base icon name for a condition. Conditions without dedicated art
/// share the unknown icon.
pub fn base_icon_name(condition: Condition) -> &'static str {
    match condition {
        Condition::Clear => "weather_clear",
        Condition::Clouds => "weather_clouds",
        Condition::Rain => "weather_rain",
        Condition::Snow => "weather_snow",
        Condition::Thunderstorm => "weather_thunder",
        Condition::Drizzle => "weather_drizzle",
        Condition::Fog => "weather_fog",
        Condition::Mist => "weather_mist",
        _ => "weather_unknown",
    }
}

/// Resolve the icon for a condition under a theme, falling back to the
/// baseline set when the themed variant is not registered.
pub fn resolve(
    condition: Condition,
    theme: Theme,
    registry: &dyn IconRegistry,
) -> Option<IconId> {
    let base = base_icon_name(condition);
    let themed = format!("{}{}", base, theme.icon_suffix());

    registry.lookup(&themed).or_else(|| {
        let baseline = format!("{}{}", base, Theme::Classic.icon_suffix());
        registry.lookup(&baseline)
    })
}

/// In-process icon registry backed by a fixed name table. Used by the
/// daemon and by tests; a real widget host would bridge to its own
/// resource system instead.
#[derive(Debug, Default, Clone)]
pub struct StaticIconRegistry {
    icons: HashMap<String, IconId>,
}

impl StaticIconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name, assigning the next sequential id. Re-registering
    /// an existing name keeps its id.
    pub fn register(&mut self, name: impl Into<String>) {
        let id = IconId(self.icons.len() as u32 + 1);
        self.icons.entry(name.into()).or_insert(id);
    }

    /// Registry with a complete baseline set and full mono/transparent
    /// sets for the daemon.
    pub fn with_builtin_sets() -> Self {
        let mut registry = Self::new();
        for base in ALL_BASE_NAMES {
            registry.register(format!("{}_ml", base));
            registry.register(format!("{}_bw", base));
            registry.register(format!("{}_tr", base));
        }
        registry
    }
}

const ALL_BASE_NAMES: [&str; 9] = [
    "weather_clear",
    "weather_clouds",
    "weather_rain",
    "weather_snow",
    "weather_thunder",
    "weather_drizzle",
    "weather_fog",
    "weather_mist",
    "weather_unknown",
];

impl IconRegistry for StaticIconRegistry {
    fn lookup(&self, name: &str) -> Option<IconId> {
        self.icons.get(name).copied()
    }
}
