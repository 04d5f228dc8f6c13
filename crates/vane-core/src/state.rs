//! Persisted widget state: coordinate, theme preference, and the last
//! shown observation.
//!
//! The store is a flat string key/value mapping (`lat`, `lon`, `theme`,
//! `last_condition`, `last_temp`) that survives process restarts.
//! Nothing is cached across calls; every reader sees the durable state.

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

const KEY_LAT: &str = "lat";
const KEY_LON: &str = "lon";
const KEY_THEME: &str = "theme";
const KEY_LAST_CONDITION: &str = "last_condition";
const KEY_LAST_TEMP: &str = "last_temp";

/// Fallback coordinate used until the location flow stores a real one.
pub const DEFAULT_COORDINATE: Coordinate = Coordinate {
    latitude: 10.0159,
    longitude: 76.3419,
};

/// Geographic coordinate for the weather lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Icon-set variant. `Classic` is the guaranteed-complete baseline set
/// that themed lookups fall back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Mono,
    Transparent,
}

impl Theme {
    /// Suffix appended to a base icon name to select this theme's set.
    pub fn icon_suffix(&self) -> &'static str {
        match self {
            Self::Classic => "_ml",
            Self::Mono => "_bw",
            Self::Transparent => "_tr",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Mono => "mono",
            Self::Transparent => "transparent",
        }
    }

    /// Parse a persisted theme name; unknown values fall back to the default.
    pub fn from_str_or_default(value: &str) -> Self {
        match value {
            "mono" => Self::Mono,
            "transparent" => Self::Transparent,
            _ => Self::Classic,
        }
    }
}

/// The most recent *significant* reading, as shown on the surfaces.
/// Before the first successful cycle the condition is `"Unknown"` and
/// the temperature is `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub condition: String,
    pub temperature_c: f64,
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            condition: "Unknown".to_string(),
            temperature_c: f64::NAN,
        }
    }
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// Durable key/value state shared by the refresh cycle and the host
/// collaborators (settings surface, location flow).
///
/// `set_last_observation` must be atomic: condition and temperature are
/// committed together or not at all.
pub trait StateStore {
    fn coordinate(&self) -> Result<Coordinate, StateError>;
    fn set_coordinate(&self, coord: Coordinate) -> Result<(), StateError>;
    fn theme(&self) -> Result<Theme, StateError>;
    fn set_theme(&self, theme: Theme) -> Result<(), StateError>;
    fn last_observation(&self) -> Result<Observation, StateError>;
    fn set_last_observation(&self, observation: &Observation) -> Result<(), StateError>;
}

/// SQLite-backed state store.
///
/// The connection is mutex-guarded so overlapping callers cannot
/// interleave the observation read-modify-write.
pub struct SqliteStateStore {
    conn: Mutex<Connection>,
}

impl SqliteStateStore {
    /// Open or create the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StateError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StateError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StateError> {
        self.conn.lock().execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS widget_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StateError> {
        let conn = self.conn.lock();
        let value = conn
            .query_row(
                "SELECT value FROM widget_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StateError> {
        self.conn.lock().execute(
            "INSERT OR REPLACE INTO widget_state (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl StateStore for SqliteStateStore {
    fn coordinate(&self) -> Result<Coordinate, StateError> {
        let lat = self.get(KEY_LAT)?.and_then(|v| v.parse::<f64>().ok());
        let lon = self.get(KEY_LON)?.and_then(|v| v.parse::<f64>().ok());
        match (lat, lon) {
            (Some(latitude), Some(longitude)) => Ok(Coordinate {
                latitude,
                longitude,
            }),
            _ => Ok(DEFAULT_COORDINATE),
        }
    }

    fn set_coordinate(&self, coord: Coordinate) -> Result<(), StateError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO widget_state (key, value) VALUES (?1, ?2)",
            params![KEY_LAT, coord.latitude.to_string()],
        )?;
        tx.execute(
            "INSERT OR REPLACE INTO widget_state (key, value) VALUES (?1, ?2)",
            params![KEY_LON, coord.longitude.to_string()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn theme(&self) -> Result<Theme, StateError> {
        Ok(self
            .get(KEY_THEME)?
            .map(|v| Theme::from_str_or_default(&v))
            .unwrap_or_default())
    }

    fn set_theme(&self, theme: Theme) -> Result<(), StateError> {
        self.set(KEY_THEME, theme.as_str())
    }

    fn last_observation(&self) -> Result<Observation, StateError> {
        let condition = self.get(KEY_LAST_CONDITION)?;
        let temperature_c = self
            .get(KEY_LAST_TEMP)?
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(f64::NAN);
        match condition {
            Some(condition) => Ok(Observation {
                condition,
                temperature_c,
            }),
            None => Ok(Observation::default()),
        }
    }

    fn set_last_observation(&self, observation: &Observation) -> Result<(), StateError> {
        // Both fields in one transaction: a crash can never leave the
        // condition and temperature disagreeing in freshness.
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO widget_state (key, value) VALUES (?1, ?2)",
            params![KEY_LAST_CONDITION, observation.condition],
        )?;
        tx.execute(
            "INSERT OR REPLACE INTO widget_state (key, value) VALUES (?1, ?2)",
            params![KEY_LAST_TEMP, observation.temperature_c.to_string()],
        )?;
        tx.commit()?;
        Ok(())
    }
}

/// In-memory state store for tests and demos. Tracks how many writes
/// it has seen so no-op paths can be asserted on.
#[derive(Default)]
pub struct MemoryStateStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write calls made against this store.
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().values.get(key).cloned()
    }

    fn set_all(&self, pairs: &[(&str, String)]) {
        let mut inner = self.inner.lock();
        for (key, value) in pairs {
            inner.values.insert((*key).to_string(), value.clone());
        }
        inner.writes += 1;
    }
}

impl StateStore for MemoryStateStore {
    fn coordinate(&self) -> Result<Coordinate, StateError> {
        let lat = self.get(KEY_LAT).and_then(|v| v.parse::<f64>().ok());
        let lon = self.get(KEY_LON).and_then(|v| v.parse::<f64>().ok());
        match (lat, lon) {
            (Some(latitude), Some(longitude)) => Ok(Coordinate {
                latitude,
                longitude,
            }),
            _ => Ok(DEFAULT_COORDINATE),
        }
    }

    fn set_coordinate(&self, coord: Coordinate) -> Result<(), StateError> {
        self.set_all(&[
            (KEY_LAT, coord.latitude.to_string()),
            (KEY_LON, coord.longitude.to_string()),
        ]);
        Ok(())
    }

    fn theme(&self) -> Result<Theme, StateError> {
        Ok(self
            .get(KEY_THEME)
            .map(|v| Theme::from_str_or_default(&v))
            .unwrap_or_default())
    }

    fn set_theme(&self, theme: Theme) -> Result<(), StateError> {
        self.set_all(&[(KEY_THEME, theme.as_str().to_string())]);
        Ok(())
    }

    fn last_observation(&self) -> Result<Observation, StateError> {
        let condition = self.get(KEY_LAST_CONDITION);
        let temperature_c = self
            .get(KEY_LAST_TEMP)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(f64::NAN);
        match condition {
            Some(condition) => Ok(Observation {
                condition,
                temperature_c,
            }),
            None => Ok(Observation::default()),
        }
    }

    fn set_last_observation(&self, observation: &Observation) -> Result<(), StateError> {
        self.set_all(&[
            (KEY_LAST_CONDITION, observation.condition.clone()),
            (KEY_LAST_TEMP, observation.temperature_c.to_string()),
        ]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_before_first_cycle() {
        let store = SqliteStateStore::open_in_memory().unwrap();

        assert_eq!(store.coordinate().unwrap(), DEFAULT_COORDINATE);
        assert_eq!(store.theme().unwrap(), Theme::Classic);

        let obs = store.last_observation().unwrap();
        assert_eq!(obs.condition, "Unknown");
        assert!(obs.temperature_c.is_nan());
    }

    #[test]
    fn test_coordinate_roundtrip() {
        let store = SqliteStateStore::open_in_memory().unwrap();
        let coord = Coordinate {
            latitude: 47.6062,
            longitude: -122.3321,
        };
        store.set_coordinate(coord).unwrap();
        assert_eq!(store.coordinate().unwrap(), coord);
    }

    #[test]
    fn test_theme_roundtrip() {
        let store = SqliteStateStore::open_in_memory().unwrap();
        store.set_theme(Theme::Transparent).unwrap();
        assert_eq!(store.theme().unwrap(), Theme::Transparent);
    }

    #[test]
    fn test_theme_unknown_value_falls_back_to_default() {
        assert_eq!(Theme::from_str_or_default("sepia"), Theme::Classic);
    }

    #[test]
    fn test_observation_written_atomically() {
        let store = SqliteStateStore::open_in_memory().unwrap();
        store
            .set_last_observation(&Observation {
                condition: "Rain".to_string(),
                temperature_c: 15.6,
            })
            .unwrap();

        let obs = store.last_observation().unwrap();
        assert_eq!(obs.condition, "Rain");
        assert!((obs.temperature_c - 15.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nan_temperature_survives_roundtrip() {
        let store = SqliteStateStore::open_in_memory().unwrap();
        store
            .set_last_observation(&Observation {
                condition: "Unknown".to_string(),
                temperature_c: f64::NAN,
            })
            .unwrap();
        assert!(store.last_observation().unwrap().temperature_c.is_nan());
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");

        {
            let store = SqliteStateStore::open(&path).unwrap();
            store.set_theme(Theme::Mono).unwrap();
            store
                .set_last_observation(&Observation {
                    condition: "Clear".to_string(),
                    temperature_c: 20.0,
                })
                .unwrap();
        }

        let store = SqliteStateStore::open(&path).unwrap();
        assert_eq!(store.theme().unwrap(), Theme::Mono);
        assert_eq!(store.last_observation().unwrap().condition, "Clear");
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let store = MemoryStateStore::new();
        assert_eq!(store.write_count(), 0);

        store.set_theme(Theme::Mono).unwrap();
        store
            .set_last_observation(&Observation {
                condition: "Clear".to_string(),
                temperature_c: 1.0,
            })
            .unwrap();

        assert_eq!(store.write_count(), 2);
        assert_eq!(store.theme().unwrap(), Theme::Mono);
    }

    #[test]
    fn test_theme_icon_suffixes() {
        assert_eq!(Theme::Classic.icon_suffix(), "_ml");
        assert_eq!(Theme::Mono.icon_suffix(), "_bw");
        assert_eq!(Theme::Transparent.icon_suffix(), "_tr");
    }
}
