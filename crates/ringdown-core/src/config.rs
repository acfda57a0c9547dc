//! Validated timer configuration.
//!
//! A [`TimerConfig`] is assembled once per display session by the settings
//! layer and threaded explicitly into every engine and presentation call.
//! The core never reads ambient state; malformed persisted values are
//! normalized by the settings loader before a config is constructed.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Countdown starting point in seconds when nothing is configured.
pub const DEFAULT_DURATION_SECS: f64 = 60.0;
/// Minimum configurable duration in seconds.
pub const DEFAULT_MIN_DURATION_SECS: f64 = 60.0;
/// Maximum configurable duration in seconds.
pub const DEFAULT_MAX_DURATION_SECS: f64 = 59_940.0;
/// Add/subtract granularity in seconds.
pub const DEFAULT_STEP_SECS: f64 = 5.0;
/// Wall-clock interval between ticks.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
/// Amount subtracted from precise remaining time per tick.
pub const DEFAULT_TICK_DECREMENT_SECS: f64 = 0.1;
/// Displayed-seconds boundary for the warning phase.
pub const DEFAULT_WARNING_THRESHOLD_SECS: u32 = 30;
/// Displayed-seconds boundary for the ending phase.
pub const DEFAULT_ENDING_THRESHOLD_SECS: u32 = 10;

/// How the remaining time is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayFormat {
    /// Bare minute count, rounded up to the next full minute.
    MinutesOnly,
    /// `MM:SS`, zero-padded.
    #[default]
    MinutesSeconds,
    /// `HH:MM:SS`, zero-padded.
    HoursMinutesSeconds,
    /// `1h5m30s` / `5m30s` / `30s`, leading zero components omitted.
    UnitSuffixed,
}

impl DisplayFormat {
    /// Parse the settings-file key for a format. Unknown keys fall back to
    /// `MinutesSeconds`.
    pub fn parse_key(key: &str) -> Self {
        match key {
            "MM" => DisplayFormat::MinutesOnly,
            "MM:SS" => DisplayFormat::MinutesSeconds,
            "HH:MM:SS" => DisplayFormat::HoursMinutesSeconds,
            "HhMmSs" => DisplayFormat::UnitSuffixed,
            _ => DisplayFormat::MinutesSeconds,
        }
    }

    /// The settings-file key for this format.
    pub fn key(self) -> &'static str {
        match self {
            DisplayFormat::MinutesOnly => "MM",
            DisplayFormat::MinutesSeconds => "MM:SS",
            DisplayFormat::HoursMinutesSeconds => "HH:MM:SS",
            DisplayFormat::UnitSuffixed => "HhMmSs",
        }
    }
}

/// Closed set of background themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Slate,
    Purple,
    Green,
    White,
    Red,
    Blue,
}

impl Theme {
    /// Parse the settings-file key for a theme. Unknown keys fall back to
    /// the default slate palette.
    pub fn parse_key(key: &str) -> Self {
        match key {
            "purple" => Theme::Purple,
            "green" => Theme::Green,
            "white" => Theme::White,
            "red" => Theme::Red,
            "blue" => Theme::Blue,
            _ => Theme::Slate,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Theme::Slate => "slate",
            Theme::Purple => "purple",
            Theme::Green => "green",
            Theme::White => "white",
            Theme::Red => "red",
            Theme::Blue => "blue",
        }
    }
}

/// Timer digit font (without slashed zeros).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontChoice {
    #[default]
    Inter,
    Roboto,
    System,
    Arial,
}

impl FontChoice {
    /// Parse the settings-file key for a font. Unknown keys fall back to Inter.
    pub fn parse_key(key: &str) -> Self {
        match key {
            "roboto" => FontChoice::Roboto,
            "system" => FontChoice::System,
            "arial" => FontChoice::Arial,
            _ => FontChoice::Inter,
        }
    }

    /// CSS class token for the render sink.
    pub fn css_class(self) -> &'static str {
        match self {
            FontChoice::Inter => "font-sans",
            FontChoice::Roboto => "font-mono",
            FontChoice::System => "font-system",
            FontChoice::Arial => "font-arial",
        }
    }
}

/// Immutable per-session timer configuration.
///
/// Constructed by the settings loader (see [`crate::storage::Settings`]) or
/// directly for tests/embedding; [`TimerConfig::validate`] must pass before
/// the config reaches the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Countdown starting point in seconds.
    pub default_duration_secs: f64,
    /// Lower bound for the configured duration.
    pub min_duration_secs: f64,
    /// Upper bound for the configured duration.
    pub max_duration_secs: f64,
    /// Add/subtract granularity in seconds.
    pub step_secs: f64,
    /// Wall-clock interval between scheduler ticks.
    pub tick_interval_ms: u64,
    /// Amount subtracted from precise remaining time per tick.
    ///
    /// Deliberately independent of `tick_interval_ms`: the countdown tracks
    /// wall-clock time only while the two stay numerically aligned. If the
    /// host throttles the tick cadence the countdown runs slow. Inherited
    /// behavior, kept as-is.
    pub tick_decrement_secs: f64,
    /// Warning phase boundary, in displayed whole seconds.
    pub warning_threshold_secs: u32,
    /// Ending phase boundary, in displayed whole seconds.
    pub ending_threshold_secs: u32,
    pub display_format: DisplayFormat,
    pub theme: Theme,
    pub font: FontChoice,
    pub sound_enabled: bool,
    /// Sound variant set (1-3) used by the external player to pick files.
    pub sound_set: u8,
    /// Whether the caller starts the countdown immediately after creation.
    pub auto_start: bool,
    /// Whether the render sink should receive progress-ring geometry.
    pub show_progress: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_duration_secs: DEFAULT_DURATION_SECS,
            min_duration_secs: DEFAULT_MIN_DURATION_SECS,
            max_duration_secs: DEFAULT_MAX_DURATION_SECS,
            step_secs: DEFAULT_STEP_SECS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            tick_decrement_secs: DEFAULT_TICK_DECREMENT_SECS,
            warning_threshold_secs: DEFAULT_WARNING_THRESHOLD_SECS,
            ending_threshold_secs: DEFAULT_ENDING_THRESHOLD_SECS,
            display_format: DisplayFormat::default(),
            theme: Theme::default(),
            font: FontChoice::default(),
            sound_enabled: true,
            sound_set: 1,
            auto_start: false,
            show_progress: true,
        }
    }
}

impl TimerConfig {
    /// Check construction-time invalidity.
    ///
    /// Uses negated comparisons so NaN values are rejected too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_duration_secs > 0.0) {
            return Err(invalid("min_duration_secs", "must be greater than zero"));
        }
        if !(self.min_duration_secs <= self.max_duration_secs) {
            return Err(invalid(
                "max_duration_secs",
                "must be greater than or equal to min_duration_secs",
            ));
        }
        if !(self.default_duration_secs > 0.0) {
            return Err(invalid("default_duration_secs", "must be greater than zero"));
        }
        if !(self.step_secs > 0.0) {
            return Err(invalid("step_secs", "must be greater than zero"));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be greater than zero"));
        }
        if !(self.tick_decrement_secs > 0.0) {
            return Err(invalid("tick_decrement_secs", "must be greater than zero"));
        }
        if !(1..=3).contains(&self.sound_set) {
            return Err(invalid("sound_set", "must be between 1 and 3"));
        }
        Ok(())
    }

    /// Clamp a requested duration into the configured bounds.
    ///
    /// Callers must validate the config first so the bounds form a range.
    pub fn clamp_duration(&self, secs: f64) -> f64 {
        secs.clamp(self.min_duration_secs, self.max_duration_secs)
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
