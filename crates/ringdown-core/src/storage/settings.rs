//! TOML-based user settings.
//!
//! Stores the persisted widget preferences: countdown duration and bounds,
//! theme/format/font, sound set, and behavior flags. Stored at
//! `~/.config/ringdown/config.toml`.
//!
//! Corrupt persisted values degrade to their defaults instead of poisoning
//! the whole file: parsing reads the document value by value, so a
//! wrong-typed entry only loses itself, and theme/format/font are kept as
//! raw strings here and normalized when building a [`TimerConfig`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::config::{self, DisplayFormat, FontChoice, Theme, TimerConfig};
use crate::error::{ConfigError, Result};

/// `[timer]` table: durations and tick cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_duration")]
    pub default_duration_secs: f64,
    #[serde(default = "default_min_duration")]
    pub min_duration_secs: f64,
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f64,
    #[serde(default = "default_step")]
    pub step_secs: f64,
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_tick_decrement")]
    pub tick_decrement_secs: f64,
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold_secs: u32,
    #[serde(default = "default_ending_threshold")]
    pub ending_threshold_secs: u32,
}

/// `[display]` table: appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Theme key; unknown values fall back to slate.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Format key (`MM`, `MM:SS`, `HH:MM:SS`, `HhMmSs`).
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

/// `[sound]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Variant set 1-3; out-of-range values fall back to 1.
    #[serde(default = "default_sound_set")]
    pub set: u8,
}

/// `[behavior]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSettings {
    #[serde(default)]
    pub auto_start: bool,
}

/// Persisted user settings.
///
/// Serialized to/from TOML at `~/.config/ringdown/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub timer: TimerSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub sound: SoundSettings,
    #[serde(default)]
    pub behavior: BehaviorSettings,
}

// Default functions
fn default_duration() -> f64 {
    config::DEFAULT_DURATION_SECS
}
fn default_min_duration() -> f64 {
    config::DEFAULT_MIN_DURATION_SECS
}
fn default_max_duration() -> f64 {
    config::DEFAULT_MAX_DURATION_SECS
}
fn default_step() -> f64 {
    config::DEFAULT_STEP_SECS
}
fn default_tick_interval() -> u64 {
    config::DEFAULT_TICK_INTERVAL_MS
}
fn default_tick_decrement() -> f64 {
    config::DEFAULT_TICK_DECREMENT_SECS
}
fn default_warning_threshold() -> u32 {
    config::DEFAULT_WARNING_THRESHOLD_SECS
}
fn default_ending_threshold() -> u32 {
    config::DEFAULT_ENDING_THRESHOLD_SECS
}
fn default_theme() -> String {
    Theme::Slate.key().to_string()
}
fn default_format() -> String {
    DisplayFormat::MinutesSeconds.key().to_string()
}
fn default_font() -> String {
    "inter".to_string()
}
fn default_true() -> bool {
    true
}
fn default_sound_set() -> u8 {
    1
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_duration_secs: default_duration(),
            min_duration_secs: default_min_duration(),
            max_duration_secs: default_max_duration(),
            step_secs: default_step(),
            tick_interval_ms: default_tick_interval(),
            tick_decrement_secs: default_tick_decrement(),
            warning_threshold_secs: default_warning_threshold(),
            ending_threshold_secs: default_ending_threshold(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            format: default_format(),
            font: default_font(),
            show_progress: true,
        }
    }
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            set: default_sound_set(),
        }
    }
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self { auto_start: false }
    }
}

impl Settings {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults when no file exists yet.
    ///
    /// A document that cannot even be tokenized degrades wholesale to
    /// defaults rather than locking every command behind a hand-edit.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, or if the
    /// default settings cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Self::parse(&content).unwrap_or_default()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.save()?;
                Ok(settings)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Parse a TOML document, field by field.
    ///
    /// Each value is deserialized independently; a wrong-typed or otherwise
    /// corrupt value degrades to its default without discarding the rest of
    /// the document.
    ///
    /// # Errors
    /// Returns an error only when the content is not valid TOML at all.
    pub fn parse(content: &str) -> Result<Self> {
        let doc: toml::Table =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(Self::from_document(&doc))
    }

    fn from_document(doc: &toml::Table) -> Self {
        let empty = toml::Table::new();
        let timer = sub_table(doc, "timer", &empty);
        let display = sub_table(doc, "display", &empty);
        let sound = sub_table(doc, "sound", &empty);
        let behavior = sub_table(doc, "behavior", &empty);
        Self {
            timer: TimerSettings {
                default_duration_secs: field(timer, "default_duration_secs", default_duration()),
                min_duration_secs: field(timer, "min_duration_secs", default_min_duration()),
                max_duration_secs: field(timer, "max_duration_secs", default_max_duration()),
                step_secs: field(timer, "step_secs", default_step()),
                tick_interval_ms: field(timer, "tick_interval_ms", default_tick_interval()),
                tick_decrement_secs: field(
                    timer,
                    "tick_decrement_secs",
                    default_tick_decrement(),
                ),
                warning_threshold_secs: field(
                    timer,
                    "warning_threshold_secs",
                    default_warning_threshold(),
                ),
                ending_threshold_secs: field(
                    timer,
                    "ending_threshold_secs",
                    default_ending_threshold(),
                ),
            },
            display: DisplaySettings {
                theme: field(display, "theme", default_theme()),
                format: field(display, "format", default_format()),
                font: field(display, "font", default_font()),
                show_progress: field(display, "show_progress", true),
            },
            sound: SoundSettings {
                enabled: field(sound, "enabled", true),
                set: field(sound, "set", default_sound_set()),
            },
            behavior: BehaviorSettings {
                auto_start: field(behavior, "auto_start", false),
            },
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Build a validated [`TimerConfig`] from these settings.
    ///
    /// This is the normalization boundary: the duration is clamped into the
    /// configured bounds and string keys degrade to their defaults, so the
    /// core never sees a malformed value. Only structurally impossible
    /// settings (an inverted bounds range, a zero step) surface as errors.
    pub fn timer_config(&self) -> Result<TimerConfig, ConfigError> {
        let t = &self.timer;
        if !(t.min_duration_secs > 0.0) || !(t.min_duration_secs <= t.max_duration_secs) {
            return Err(ConfigError::InvalidValue {
                key: "timer.min_duration_secs".to_string(),
                message: format!(
                    "bounds {}..{} do not form a valid range",
                    t.min_duration_secs, t.max_duration_secs
                ),
            });
        }
        let mut config = TimerConfig {
            default_duration_secs: t.default_duration_secs,
            min_duration_secs: t.min_duration_secs,
            max_duration_secs: t.max_duration_secs,
            step_secs: t.step_secs,
            tick_interval_ms: t.tick_interval_ms,
            tick_decrement_secs: t.tick_decrement_secs,
            warning_threshold_secs: t.warning_threshold_secs,
            ending_threshold_secs: t.ending_threshold_secs,
            display_format: DisplayFormat::parse_key(&self.display.format),
            theme: Theme::parse_key(&self.display.theme),
            font: FontChoice::parse_key(&self.display.font),
            sound_enabled: self.sound.enabled,
            sound_set: if (1..=3).contains(&self.sound.set) {
                self.sound.set
            } else {
                default_sound_set()
            },
            auto_start: self.behavior.auto_start,
            show_progress: self.display.show_progress,
        };
        config.default_duration_secs = config.clamp_duration(config.default_duration_secs);
        config.validate()?;
        Ok(config)
    }
}

fn sub_table<'a>(doc: &'a toml::Table, key: &str, empty: &'a toml::Table) -> &'a toml::Table {
    doc.get(key).and_then(toml::Value::as_table).unwrap_or(empty)
}

fn field<T: serde::de::DeserializeOwned>(table: &toml::Table, key: &str, fallback: T) -> T {
    table
        .get(key)
        .cloned()
        .and_then(|value| T::deserialize(value).ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_a_valid_config() {
        let config = Settings::default().timer_config().unwrap();
        assert_eq!(config.default_duration_secs, 60.0);
        assert_eq!(config.step_secs, 5.0);
        assert_eq!(config.theme, Theme::Slate);
        assert_eq!(config.display_format, DisplayFormat::MinutesSeconds);
    }

    #[test]
    fn missing_tables_fall_back_to_defaults() {
        let settings = Settings::parse("[display]\ntheme = \"purple\"\n").unwrap();
        assert_eq!(settings.timer, TimerSettings::default());
        let config = settings.timer_config().unwrap();
        assert_eq!(config.theme, Theme::Purple);
        assert!(config.sound_enabled);
    }

    #[test]
    fn unknown_string_keys_degrade_to_defaults() {
        let mut settings = Settings::default();
        settings.display.theme = "neon".to_string();
        settings.display.format = "SS:MM".to_string();
        settings.display.font = "wingdings".to_string();
        settings.sound.set = 9;
        let config = settings.timer_config().unwrap();
        assert_eq!(config.theme, Theme::Slate);
        assert_eq!(config.display_format, DisplayFormat::MinutesSeconds);
        assert_eq!(config.font, FontChoice::Inter);
        assert_eq!(config.sound_set, 1);
    }

    #[test]
    fn duration_is_clamped_into_bounds() {
        let mut settings = Settings::default();
        settings.timer.default_duration_secs = 5.0;
        assert_eq!(settings.timer_config().unwrap().default_duration_secs, 60.0);

        settings.timer.default_duration_secs = 1_000_000.0;
        assert_eq!(
            settings.timer_config().unwrap().default_duration_secs,
            59_940.0
        );
    }

    #[test]
    fn inverted_bounds_are_an_error() {
        let mut settings = Settings::default();
        settings.timer.min_duration_secs = 100.0;
        settings.timer.max_duration_secs = 50.0;
        assert!(settings.timer_config().is_err());
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let mut settings = Settings::default();
        settings.timer.default_duration_secs = 45.0;
        settings.display.theme = "green".to_string();
        settings.behavior.auto_start = true;
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert_eq!(Settings::parse(&toml).unwrap(), settings);
    }

    #[test]
    fn wrong_typed_values_degrade_per_field() {
        let settings = Settings::parse(
            "[timer]\n\
             default_duration_secs = \"soon\"\n\
             step_secs = 2.5\n\n\
             [display]\n\
             show_progress = \"yes\"\n\
             theme = \"red\"\n",
        )
        .unwrap();
        // The corrupt entries fall back alone; their neighbors survive.
        assert_eq!(settings.timer.default_duration_secs, 60.0);
        assert_eq!(settings.timer.step_secs, 2.5);
        assert!(settings.display.show_progress);
        assert_eq!(settings.display.theme, "red");
        assert!(settings.timer_config().is_ok());
    }

    #[test]
    fn wrong_typed_table_degrades_wholesale() {
        let settings = Settings::parse("timer = \"soon\"\n\n[sound]\nset = 2\n").unwrap();
        assert_eq!(settings.timer, TimerSettings::default());
        assert_eq!(settings.sound.set, 2);
    }

    #[test]
    fn integer_durations_are_accepted() {
        let settings = Settings::parse("[timer]\ndefault_duration_secs = 90\n").unwrap();
        assert_eq!(settings.timer.default_duration_secs, 90.0);
    }

    #[test]
    fn unreadable_document_is_a_parse_error() {
        assert!(Settings::parse("not [valid toml").is_err());
    }
}
