//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads or read the clock for countdown progress - the caller is
//! responsible for calling `tick()` at the configured cadence while running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Idle | Finished) -> Idle
//! ```
//!
//! Every operation is total: invalid transitions are no-ops returning `None`,
//! never errors. This matches a UI control surface where every button is
//! always clickable.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(&config);
//! engine.start();
//! // In a loop, every config.tick_interval_ms:
//! engine.tick(&config); // Returns Some(Event) on warning/finish
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::TimerConfig;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    /// Countdown reached zero. Terminal until reset.
    Finished,
}

/// Core countdown engine.
///
/// The precise remaining time is the source of truth; the displayed whole
/// seconds (`ceil` of precise) drive every discrete UI decision so the
/// visible digits only change on whole-second boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerEngine {
    /// Continuous countdown value in seconds.
    precise_remaining_secs: f64,
    /// `ceil(precise_remaining_secs)`, recomputed on every mutation.
    displayed_whole_secs: u32,
    /// Duration progress is measured against. Always positive.
    initial_secs: f64,
    is_running: bool,
    is_finished: bool,
}

impl TimerEngine {
    /// Create a new engine from the configured default duration.
    ///
    /// Starts paused; callers honoring `auto_start` call [`start`](Self::start)
    /// themselves.
    pub fn new(config: &TimerConfig) -> Self {
        let initial = config.default_duration_secs;
        Self {
            precise_remaining_secs: initial,
            displayed_whole_secs: ceil_secs(initial),
            initial_secs: initial,
            is_running: false,
            is_finished: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.is_finished {
            TimerState::Finished
        } else if self.is_running {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    pub fn precise_remaining_secs(&self) -> f64 {
        self.precise_remaining_secs
    }

    pub fn displayed_whole_secs(&self) -> u32 {
        self.displayed_whole_secs
    }

    pub fn initial_secs(&self) -> f64 {
        self.initial_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            precise_remaining_secs: self.precise_remaining_secs,
            displayed_whole_secs: self.displayed_whole_secs,
            initial_secs: self.initial_secs,
            is_running: self.is_running,
            is_finished: self.is_finished,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume the countdown. No-op while running or finished
    /// (finished requires a reset first).
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running || self.is_finished {
            return None;
        }
        self.is_running = true;
        Some(Event::TimerStarted {
            remaining_secs: self.precise_remaining_secs,
            at: Utc::now(),
        })
    }

    /// Halt the countdown. No-op unless running.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.precise_remaining_secs,
            at: Utc::now(),
        })
    }

    /// Start when idle, pause when running. On a finished timer this resets
    /// and stays paused - it never auto-starts.
    pub fn toggle(&mut self, config: &TimerConfig) -> Option<Event> {
        if self.is_finished {
            self.reset(config)
        } else if self.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Re-initialize from the *current* configured default, so settings
    /// changes take effect on reset.
    pub fn reset(&mut self, config: &TimerConfig) -> Option<Event> {
        let initial = config.default_duration_secs;
        self.precise_remaining_secs = initial;
        self.displayed_whole_secs = ceil_secs(initial);
        self.initial_secs = initial;
        self.is_running = false;
        self.is_finished = false;
        Some(Event::TimerReset {
            duration_secs: initial,
            at: Utc::now(),
        })
    }

    /// Add one step, capped at the configured default duration.
    ///
    /// A candidate beyond the default is rejected silently (state unchanged);
    /// on accept, `initial_secs` is raised to cover the candidate so the
    /// progress fraction stays in `[0, 1]`. Intentionally asymmetric with
    /// [`subtract_time`](Self::subtract_time). Ignored once finished.
    pub fn add_time(&mut self, config: &TimerConfig) -> Option<Event> {
        if self.is_finished {
            return None;
        }
        let candidate = self.precise_remaining_secs + config.step_secs;
        if candidate > config.default_duration_secs {
            return None;
        }
        self.precise_remaining_secs = candidate;
        self.displayed_whole_secs = ceil_secs(candidate);
        self.initial_secs = self.initial_secs.max(candidate);
        Some(Event::TimeAdded {
            remaining_secs: self.precise_remaining_secs,
            initial_secs: self.initial_secs,
            at: Utc::now(),
        })
    }

    /// Subtract one step, floored at zero. Always applied (no rejection);
    /// `initial_secs` is left unchanged. Ignored once finished.
    pub fn subtract_time(&mut self, config: &TimerConfig) -> Option<Event> {
        if self.is_finished {
            return None;
        }
        let candidate = (self.precise_remaining_secs - config.step_secs).max(0.0);
        self.precise_remaining_secs = candidate;
        self.displayed_whole_secs = ceil_secs(candidate);
        Some(Event::TimeSubtracted {
            remaining_secs: candidate,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one tick decrement.
    ///
    /// No-op unless running with time left. Returns `Event::TimerFinished`
    /// when the countdown floors at zero, and `Event::EndingWarning` exactly
    /// once per countdown, at the tick where the displayed seconds first
    /// equal the ending threshold. The equality test (not `<=`) is what keeps
    /// the warning from re-firing on every subsequent tick; the decrement is
    /// below one second, so no integer boundary is ever skipped.
    pub fn tick(&mut self, config: &TimerConfig) -> Option<Event> {
        if !self.is_running || self.precise_remaining_secs <= 0.0 {
            return None;
        }
        let next = self.precise_remaining_secs - config.tick_decrement_secs;
        if next <= 0.0 {
            self.precise_remaining_secs = 0.0;
            self.displayed_whole_secs = 0;
            self.is_running = false;
            self.is_finished = true;
            return Some(Event::TimerFinished { at: Utc::now() });
        }
        self.precise_remaining_secs = next;
        let displayed = ceil_secs(next);
        if displayed != self.displayed_whole_secs {
            self.displayed_whole_secs = displayed;
            if displayed == config.ending_threshold_secs {
                return Some(Event::EndingWarning {
                    displayed_secs: displayed,
                    at: Utc::now(),
                });
            }
        }
        None
    }
}

fn ceil_secs(secs: f64) -> u32 {
    secs.ceil().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{SoundCue, SoundRequest};
    use proptest::prelude::*;

    fn config() -> TimerConfig {
        TimerConfig::default()
    }

    /// Run the engine to completion, returning (warning count, finish count,
    /// tick count).
    fn run_to_finish(engine: &mut TimerEngine, config: &TimerConfig) -> (usize, usize, usize) {
        let mut warnings = 0;
        let mut finishes = 0;
        let mut ticks = 0;
        while engine.is_running() {
            ticks += 1;
            match engine.tick(config) {
                Some(Event::EndingWarning { .. }) => warnings += 1,
                Some(Event::TimerFinished { .. }) => finishes += 1,
                _ => {}
            }
            assert!(ticks <= 100_000, "countdown did not terminate");
        }
        (warnings, finishes, ticks)
    }

    #[test]
    fn create_initializes_paused() {
        let config = config();
        let engine = TimerEngine::new(&config);
        assert_eq!(engine.precise_remaining_secs(), 60.0);
        assert_eq!(engine.initial_secs(), 60.0);
        assert_eq!(engine.displayed_whole_secs(), 60);
        assert!(!engine.is_running());
        assert!(!engine.is_finished());
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn start_pause_transitions() {
        let config = config();
        let mut engine = TimerEngine::new(&config);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);

        // Starting again is a no-op.
        assert!(engine.start().is_none());

        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn pause_is_idempotent() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        let before = engine.clone();
        assert!(engine.pause().is_none());
        assert_eq!(engine, before);
    }

    #[test]
    fn tick_noop_when_paused() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        let before = engine.clone();
        assert!(engine.tick(&config).is_none());
        assert_eq!(engine, before);
    }

    #[test]
    fn ticks_decrement_precisely() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        engine.start();
        for _ in 0..10 {
            engine.tick(&config);
        }
        assert!((engine.precise_remaining_secs() - 59.0).abs() < 1e-9);
        assert_eq!(engine.displayed_whole_secs(), 59);
    }

    #[test]
    fn full_run_emits_warning_and_finish_once() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        let start = engine.start().unwrap();
        assert_eq!(
            SoundRequest::for_event(&start, &config).map(|r| r.cue),
            Some(SoundCue::Start)
        );

        let (warnings, finishes, ticks) = run_to_finish(&mut engine, &config);
        assert_eq!(warnings, 1);
        assert_eq!(finishes, 1);
        // 60s at 0.1s per tick; float rounding may shave one tick.
        assert!((599..=600).contains(&ticks), "took {ticks} ticks");

        assert_eq!(engine.precise_remaining_secs(), 0.0);
        assert_eq!(engine.displayed_whole_secs(), 0);
        assert_eq!(engine.state(), TimerState::Finished);
    }

    #[test]
    fn warning_fires_when_displayed_first_hits_threshold() {
        let config = TimerConfig {
            default_duration_secs: 45.0,
            ..TimerConfig::default()
        };
        let mut engine = TimerEngine::new(&config);
        engine.start();
        let mut warning_at_displayed = None;
        let mut warnings = 0;
        while engine.is_running() {
            if let Some(Event::EndingWarning { displayed_secs, .. }) = engine.tick(&config) {
                warnings += 1;
                warning_at_displayed = Some(displayed_secs);
            }
        }
        assert_eq!(warnings, 1);
        assert_eq!(warning_at_displayed, Some(config.ending_threshold_secs));
    }

    #[test]
    fn toggle_on_finished_resets_without_starting() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        engine.start();
        run_to_finish(&mut engine, &config);
        assert!(engine.is_finished());

        assert!(matches!(
            engine.toggle(&config),
            Some(Event::TimerReset { .. })
        ));
        assert!(!engine.is_running());
        assert!(!engine.is_finished());
        assert_eq!(engine.precise_remaining_secs(), engine.initial_secs());
        assert_eq!(engine.precise_remaining_secs(), 60.0);
    }

    #[test]
    fn toggle_starts_and_pauses() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        assert!(matches!(
            engine.toggle(&config),
            Some(Event::TimerStarted { .. })
        ));
        assert!(matches!(
            engine.toggle(&config),
            Some(Event::TimerPaused { .. })
        ));
    }

    #[test]
    fn reset_picks_up_new_default() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        engine.start();
        for _ in 0..100 {
            engine.tick(&config);
        }
        let changed = TimerConfig {
            default_duration_secs: 90.0,
            ..config
        };
        engine.reset(&changed);
        assert_eq!(engine.precise_remaining_secs(), 90.0);
        assert_eq!(engine.initial_secs(), 90.0);
        assert_eq!(engine.displayed_whole_secs(), 90);
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn add_time_rejected_past_default() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        engine.start();
        // 20 ticks -> ~58s remaining; 58 + 5 > 60 must reject.
        for _ in 0..20 {
            engine.tick(&config);
        }
        let before = engine.clone();
        assert!(engine.add_time(&config).is_none());
        assert_eq!(engine, before);
    }

    #[test]
    fn add_time_restores_subtracted_step() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        engine.subtract_time(&config);
        assert_eq!(engine.precise_remaining_secs(), 55.0);
        let event = engine.add_time(&config);
        assert!(matches!(event, Some(Event::TimeAdded { .. })));
        assert_eq!(engine.precise_remaining_secs(), 60.0);
        assert_eq!(engine.initial_secs(), 60.0);
        assert_eq!(engine.displayed_whole_secs(), 60);
    }

    #[test]
    fn subtract_floors_at_zero() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        for _ in 0..13 {
            assert!(engine.subtract_time(&config).is_some());
            assert!(engine.precise_remaining_secs() >= 0.0);
        }
        assert_eq!(engine.precise_remaining_secs(), 0.0);
        assert_eq!(engine.displayed_whole_secs(), 0);
        // Floored but not finished: only a tick can finish the countdown.
        assert!(!engine.is_finished());
    }

    #[test]
    fn add_and_subtract_ignored_once_finished() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        engine.start();
        run_to_finish(&mut engine, &config);
        let before = engine.clone();
        assert!(engine.add_time(&config).is_none());
        assert!(engine.subtract_time(&config).is_none());
        assert!(engine.start().is_none());
        assert_eq!(engine, before);
    }

    #[test]
    fn engine_survives_json_round_trip() {
        let config = config();
        let mut engine = TimerEngine::new(&config);
        engine.start();
        for _ in 0..42 {
            engine.tick(&config);
        }
        let json = serde_json::to_string(&engine).unwrap();
        let restored: TimerEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, engine);
    }

    proptest! {
        #[test]
        fn subtract_never_goes_negative(
            duration in 1.0f64..600.0,
            subs in 0usize..64,
        ) {
            let config = TimerConfig {
                default_duration_secs: duration,
                min_duration_secs: 1.0,
                ..TimerConfig::default()
            };
            let mut engine = TimerEngine::new(&config);
            for _ in 0..subs {
                engine.subtract_time(&config);
                prop_assert!(engine.precise_remaining_secs() >= 0.0);
            }
        }

        #[test]
        fn invariants_hold_under_arbitrary_operations(ops in prop::collection::vec(0u8..6, 0..200)) {
            let config = TimerConfig::default();
            let mut engine = TimerEngine::new(&config);
            for op in ops {
                match op {
                    0 => { engine.start(); }
                    1 => { engine.pause(); }
                    2 => { engine.toggle(&config); }
                    3 => { engine.reset(&config); }
                    4 => { engine.add_time(&config); }
                    _ => { engine.subtract_time(&config); }
                }
                prop_assert!(engine.precise_remaining_secs() >= 0.0);
                prop_assert!(engine.precise_remaining_secs() <= engine.initial_secs());
                prop_assert!(engine.initial_secs() > 0.0);
                prop_assert!(!(engine.is_running() && engine.is_finished()));
                prop_assert_eq!(
                    engine.displayed_whole_secs(),
                    engine.precise_remaining_secs().ceil() as u32
                );
            }
        }

        #[test]
        fn running_ticks_subtract_exactly_n_decrements(ticks in 1usize..500) {
            let config = TimerConfig::default();
            let mut engine = TimerEngine::new(&config);
            engine.start();
            for _ in 0..ticks {
                engine.tick(&config);
            }
            let expected = config.default_duration_secs - ticks as f64 * config.tick_decrement_secs;
            prop_assert!((engine.precise_remaining_secs() - expected).abs() < 1e-6);
        }
    }
}
