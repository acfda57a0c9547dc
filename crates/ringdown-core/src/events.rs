//! Engine events and sound-sink requests.
//!
//! Every state change in the engine produces an [`Event`]. The render layer
//! polls snapshots; the sound sink maps events to [`SoundRequest`]s. The core
//! never performs I/O itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TimerConfig;
use crate::timer::TimerState;

/// State-change notification emitted by engine operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        remaining_secs: f64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: f64,
        at: DateTime<Utc>,
    },
    TimerReset {
        duration_secs: f64,
        at: DateTime<Utc>,
    },
    TimeAdded {
        remaining_secs: f64,
        initial_secs: f64,
        at: DateTime<Utc>,
    },
    TimeSubtracted {
        remaining_secs: f64,
        at: DateTime<Utc>,
    },
    /// Displayed seconds first reached the ending threshold.
    EndingWarning {
        displayed_secs: u32,
        at: DateTime<Utc>,
    },
    TimerFinished {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        precise_remaining_secs: f64,
        displayed_whole_secs: u32,
        initial_secs: f64,
        is_running: bool,
        is_finished: bool,
        at: DateTime<Utc>,
    },
}

/// The three sound cues the widget knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Start,
    Warning,
    Finished,
}

impl SoundCue {
    /// Base file name in the sound asset directory.
    pub fn base_name(self) -> &'static str {
        match self {
            SoundCue::Start => "start-sound",
            SoundCue::Warning => "warn-end-sound",
            SoundCue::Finished => "end-sound",
        }
    }
}

/// A request for the external audio player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundRequest {
    pub cue: SoundCue,
    /// Sound variant set (1-3).
    pub sound_set: u8,
}

impl SoundRequest {
    /// Map an event to a sound request, honoring the sound settings.
    ///
    /// Returns `None` when sound is disabled, when the event carries no cue,
    /// or for a start with nothing left to count down.
    pub fn for_event(event: &Event, config: &TimerConfig) -> Option<Self> {
        if !config.sound_enabled {
            return None;
        }
        let cue = match event {
            Event::TimerStarted { remaining_secs, .. } if *remaining_secs > 0.0 => SoundCue::Start,
            Event::EndingWarning { .. } => SoundCue::Warning,
            Event::TimerFinished { .. } => SoundCue::Finished,
            _ => return None,
        };
        Some(Self {
            cue,
            sound_set: config.sound_set,
        })
    }

    /// Asset file name, with the set suffix for variant sets beyond the first
    /// (`end-sound.mp3`, `end-sound2.mp3`, ...).
    pub fn file_name(&self) -> String {
        if self.sound_set > 1 {
            format!("{}{}.mp3", self.cue.base_name(), self.sound_set)
        } else {
            format!("{}.mp3", self.cue.base_name())
        }
    }
}
