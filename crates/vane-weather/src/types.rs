use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Clear,
    Clouds,
    Fog,
    Mist,
    Drizzle,
    Rain,
    FreezingRain,
    Snow,
    Thunderstorm,
    #[default]
    Unknown,
}

impl Condition {
    /// Convert a WMO weather code to a Condition. Total: every integer
    /// maps to something, unmapped codes to `Unknown`.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::Clouds,
            45 => Self::Fog,
            48 => Self::Mist,
            51 | 53 | 55 | 56 | 57 => Self::Drizzle,
            61 | 63 | 65 | 80 | 81 | 82 => Self::Rain,
            66 | 67 => Self::FreezingRain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Canonical label: first letter upper, remainder lower, so
    /// downstream comparisons never trip over casing.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Fog => "Fog",
            Self::Mist => "Mist",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::FreezingRain => "Freezing rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a persisted label back into a Condition, case-insensitively.
    /// Unrecognized labels become `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "fog" => Self::Fog,
            "mist" => Self::Mist,
            "drizzle" => Self::Drizzle,
            "rain" => Self::Rain,
            "freezing rain" => Self::FreezingRain,
            "snow" => Self::Snow,
            "thunderstorm" => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }
}

/// One normalized fetch result. Ephemeral: either folded into the
/// persisted observation as a whole or dropped as a whole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub condition: Condition,
    /// `NaN` when the provider omitted the temperature
    pub temperature_c: f64,
}

/// Display formatting: whole degrees, empty for an unset temperature.
pub fn format_temperature(temperature_c: f64) -> String {
    if temperature_c.is_nan() {
        return String::new();
    }
    format!("{}°C", temperature_c.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wmo_code_clear() {
        assert_eq!(Condition::from_wmo_code(0), Condition::Clear);
    }

    #[test]
    fn test_wmo_code_clouds() {
        assert_eq!(Condition::from_wmo_code(1), Condition::Clouds);
        assert_eq!(Condition::from_wmo_code(2), Condition::Clouds);
        assert_eq!(Condition::from_wmo_code(3), Condition::Clouds);
    }

    #[test]
    fn test_wmo_code_fog_and_mist() {
        assert_eq!(Condition::from_wmo_code(45), Condition::Fog);
        assert_eq!(Condition::from_wmo_code(48), Condition::Mist);
    }

    #[test]
    fn test_wmo_code_drizzle() {
        for code in [51, 53, 55, 56, 57] {
            assert_eq!(Condition::from_wmo_code(code), Condition::Drizzle);
        }
    }

    #[test]
    fn test_wmo_code_rain() {
        for code in [61, 63, 65, 80, 81, 82] {
            assert_eq!(Condition::from_wmo_code(code), Condition::Rain);
        }
    }

    #[test]
    fn test_wmo_code_freezing_rain() {
        assert_eq!(Condition::from_wmo_code(66), Condition::FreezingRain);
        assert_eq!(Condition::from_wmo_code(67), Condition::FreezingRain);
    }

    #[test]
    fn test_wmo_code_snow() {
        for code in [71, 73, 75, 77, 85, 86] {
            assert_eq!(Condition::from_wmo_code(code), Condition::Snow);
        }
    }

    #[test]
    fn test_wmo_code_thunderstorm() {
        for code in [95, 96, 99] {
            assert_eq!(Condition::from_wmo_code(code), Condition::Thunderstorm);
        }
    }

    #[test]
    fn test_wmo_code_unmapped_is_unknown() {
        assert_eq!(Condition::from_wmo_code(12345), Condition::Unknown);
        assert_eq!(Condition::from_wmo_code(-1), Condition::Unknown);
        assert_eq!(Condition::from_wmo_code(4), Condition::Unknown);
    }

    #[test]
    fn test_labels_are_canonically_cased() {
        assert_eq!(Condition::Clear.label(), "Clear");
        assert_eq!(Condition::FreezingRain.label(), "Freezing rain");
        assert_eq!(Condition::Unknown.label(), "Unknown");
    }

    #[test]
    fn test_from_label_is_case_insensitive() {
        assert_eq!(Condition::from_label("CLEAR"), Condition::Clear);
        assert_eq!(Condition::from_label("freezing RAIN"), Condition::FreezingRain);
        assert_eq!(Condition::from_label("haze"), Condition::Unknown);
    }

    #[test]
    fn test_label_roundtrip() {
        for condition in [
            Condition::Clear,
            Condition::Clouds,
            Condition::Fog,
            Condition::Mist,
            Condition::Drizzle,
            Condition::Rain,
            Condition::FreezingRain,
            Condition::Snow,
            Condition::Thunderstorm,
            Condition::Unknown,
        ] {
            assert_eq!(Condition::from_label(condition.label()), condition);
        }
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(15.6), "16°C");
        assert_eq!(format_temperature(-0.4), "0°C");
        assert_eq!(format_temperature(f64::NAN), "");
    }
}
