//! Decides whether a fresh reading is worth a visible update.

use vane_core::Observation;
use vane_weather::Reading;

/// Minimum temperature delta (°C) that counts as a visible change.
/// Sub-degree noise is not worth a surface redraw.
pub const SIGNIFICANT_TEMP_DELTA_C: f64 = 1.0;

/// True when the new reading should be persisted and rendered: the
/// condition label changed (case-insensitively), or there is no prior
/// temperature, or the temperature moved at least a whole degree.
pub fn is_significant(prev: &Observation, next: &Reading) -> bool {
    if !prev.condition.eq_ignore_ascii_case(next.condition.label()) {
        return true;
    }

    // A first-ever or unset observation always renders.
    if prev.temperature_c.is_nan() {
        return true;
    }

    (prev.temperature_c - next.temperature_c).abs() >= SIGNIFICANT_TEMP_DELTA_C
}

#[cfg(test)]
mod tests {
    use super::*;
    use vane_weather::Condition;

    fn obs(condition: &str, temperature_c: f64) -> Observation {
        Observation {
            condition: condition.to_string(),
            temperature_c,
        }
    }

    fn reading(condition: Condition, temperature_c: f64) -> Reading {
        Reading {
            condition,
            temperature_c,
        }
    }

    #[test]
    fn test_first_observation_is_always_significant() {
        let prev = Observation::default();
        assert!(is_significant(&prev, &reading(Condition::Clear, 20.0)));
        assert!(is_significant(&prev, &reading(Condition::Unknown, f64::NAN)));
    }

    #[test]
    fn test_sub_degree_drift_is_not_significant() {
        assert!(!is_significant(
            &obs("Clear", 20.0),
            &reading(Condition::Clear, 20.4)
        ));
        assert!(!is_significant(
            &obs("Clear", 20.0),
            &reading(Condition::Clear, 19.1)
        ));
    }

    #[test]
    fn test_whole_degree_delta_is_significant() {
        assert!(is_significant(
            &obs("Clear", 20.0),
            &reading(Condition::Clear, 21.0)
        ));
        assert!(is_significant(
            &obs("Clear", 20.0),
            &reading(Condition::Clear, 18.9)
        ));
    }

    #[test]
    fn test_condition_change_is_significant() {
        assert!(is_significant(
            &obs("Clear", 20.0),
            &reading(Condition::Clouds, 20.0)
        ));
    }

    #[test]
    fn test_condition_comparison_ignores_case() {
        assert!(!is_significant(
            &obs("clear", 20.0),
            &reading(Condition::Clear, 20.0)
        ));
        assert!(!is_significant(
            &obs("FREEZING RAIN", -2.0),
            &reading(Condition::FreezingRain, -2.0)
        ));
    }

    #[test]
    fn test_nan_previous_temperature_is_significant() {
        assert!(is_significant(
            &obs("Clear", f64::NAN),
            &reading(Condition::Clear, 20.0)
        ));
    }
}
