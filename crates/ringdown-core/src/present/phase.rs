use serde::{Deserialize, Serialize};

use crate::config::TimerConfig;

/// Discrete countdown phase, derived from displayed whole seconds.
///
/// Thresholds compare against absolute remaining seconds, never a percentage
/// of the initial duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Normal,
    Warning,
    Ending,
}

impl Phase {
    pub fn classify(displayed_whole_secs: u32, config: &TimerConfig) -> Self {
        if displayed_whole_secs <= config.ending_threshold_secs {
            Phase::Ending
        } else if displayed_whole_secs <= config.warning_threshold_secs {
            Phase::Warning
        } else {
            Phase::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive() {
        let config = TimerConfig::default();
        assert_eq!(Phase::classify(31, &config), Phase::Normal);
        assert_eq!(Phase::classify(30, &config), Phase::Warning);
        assert_eq!(Phase::classify(11, &config), Phase::Warning);
        assert_eq!(Phase::classify(10, &config), Phase::Ending);
        assert_eq!(Phase::classify(0, &config), Phase::Ending);
    }

    #[test]
    fn thresholds_are_absolute_not_percentage() {
        // A 10-minute countdown still warns at 30 absolute seconds.
        let config = TimerConfig {
            default_duration_secs: 600.0,
            ..TimerConfig::default()
        };
        assert_eq!(Phase::classify(300, &config), Phase::Normal);
        assert_eq!(Phase::classify(30, &config), Phase::Warning);
    }
}
