//! Timing thresholds for feasibility classification.

use serde::{Deserialize, Serialize};

/// Per-direction timing thresholds, all in minutes.
///
/// A `None` threshold switches off the conditions that depend on it. On the
/// JSON configuration surface a disabled threshold is written as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawThresholds", into = "RawThresholds")]
pub struct ThresholdConfig {
    /// Options departing within this many minutes of now are urgent.
    pub depart_early_minutes: Option<u32>,

    /// Margin before `last_arrival_minutes` that counts as cutting it close.
    pub arrive_early_minutes: Option<u32>,

    /// Latest acceptable arrival, as minutes since midnight.
    pub last_arrival_minutes: Option<u32>,

    /// Width of the "becoming urgent" band beyond each threshold.
    pub step_minutes: u32,
}

impl ThresholdConfig {
    /// Build from the `-1 = disabled` representation.
    pub fn from_sentinels(
        depart_early: i64,
        arrive_early: i64,
        last_arrival: i64,
        step: u32,
    ) -> Self {
        Self {
            depart_early_minutes: enabled(depart_early),
            arrive_early_minutes: enabled(arrive_early),
            last_arrival_minutes: enabled(last_arrival),
            step_minutes: step,
        }
    }

    /// Thresholds for rail-first trips: leave 15 minutes early and reach the
    /// destination with 20 minutes to spare before 09:00.
    pub fn rail_first() -> Self {
        Self {
            depart_early_minutes: Some(15),
            arrive_early_minutes: Some(20),
            last_arrival_minutes: Some(9 * 60),
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }

    /// Thresholds for high-speed-first trips: only the departure matters.
    pub fn high_speed_first() -> Self {
        Self {
            depart_early_minutes: Some(30),
            arrive_early_minutes: None,
            last_arrival_minutes: None,
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }

    /// The latest arrival that is still comfortable, if both arrival
    /// thresholds are set.
    pub fn arrival_cutoff(&self) -> Option<i64> {
        let last = self.last_arrival_minutes?;
        let early = self.arrive_early_minutes?;
        Some(i64::from(last) - i64::from(early))
    }
}

/// Default width of the "becoming urgent" band.
pub const DEFAULT_STEP_MINUTES: u32 = 10;

fn enabled(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}

fn sentinel(value: Option<u32>) -> i64 {
    value.map_or(-1, i64::from)
}

/// Wire form with `-1` for disabled thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawThresholds {
    depart_early: i64,
    arrive_early: i64,
    last_arrival_time: i64,
    #[serde(default = "default_step")]
    step: u32,
}

fn default_step() -> u32 {
    DEFAULT_STEP_MINUTES
}

impl From<RawThresholds> for ThresholdConfig {
    fn from(raw: RawThresholds) -> Self {
        Self::from_sentinels(
            raw.depart_early,
            raw.arrive_early,
            raw.last_arrival_time,
            raw.step,
        )
    }
}

impl From<ThresholdConfig> for RawThresholds {
    fn from(cfg: ThresholdConfig) -> Self {
        Self {
            depart_early: sentinel(cfg.depart_early_minutes),
            arrive_early: sentinel(cfg.arrive_early_minutes),
            last_arrival_time: sentinel(cfg.last_arrival_minutes),
            step: cfg.step_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_map_to_none() {
        let cfg = ThresholdConfig::from_sentinels(30, -1, -1, 10);
        assert_eq!(cfg, ThresholdConfig::high_speed_first());

        let cfg = ThresholdConfig::from_sentinels(-5, 0, 540, 0);
        assert_eq!(cfg.depart_early_minutes, None);
        assert_eq!(cfg.arrive_early_minutes, Some(0));
        assert_eq!(cfg.last_arrival_minutes, Some(540));
    }

    #[test]
    fn rail_first_defaults() {
        let cfg = ThresholdConfig::rail_first();
        assert_eq!(cfg.depart_early_minutes, Some(15));
        assert_eq!(cfg.arrive_early_minutes, Some(20));
        assert_eq!(cfg.last_arrival_minutes, Some(540));
        assert_eq!(cfg.step_minutes, 10);
        assert_eq!(cfg.arrival_cutoff(), Some(520));
    }

    #[test]
    fn arrival_cutoff_needs_both_thresholds() {
        assert_eq!(ThresholdConfig::high_speed_first().arrival_cutoff(), None);

        let cfg = ThresholdConfig::from_sentinels(-1, -1, 540, 10);
        assert_eq!(cfg.arrival_cutoff(), None);
    }

    #[test]
    fn json_uses_sentinels() {
        let json = serde_json::to_value(ThresholdConfig::high_speed_first()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "depart_early": 30,
                "arrive_early": -1,
                "last_arrival_time": -1,
                "step": 10,
            })
        );

        let cfg: ThresholdConfig = serde_json::from_str(
            r#"{"depart_early": 15, "arrive_early": 20, "last_arrival_time": 540}"#,
        )
        .unwrap();
        assert_eq!(cfg, ThresholdConfig::rail_first());
    }
}
