//! # Ringdown Core Library
//!
//! This library provides the core logic for the Ringdown countdown timer.
//! It implements a CLI-first philosophy where every timer operation is
//! available via a standalone CLI binary, with any GUI shell being a thin
//! rendering layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine that requires the caller
//!   to periodically invoke `tick()` for countdown progress
//! - **Presentation**: pure derivation of render-sink values (phase, palette,
//!   ring geometry, formatted digits) from an engine snapshot
//! - **Storage**: TOML-based settings and a small SQLite key/value store for
//!   persisting engine state between invocations
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core countdown state machine
//! - [`TimerConfig`]: validated per-session configuration
//! - [`DisplaySnapshot`]: render-sink output assembled per tick/operation
//! - [`Settings`]: persisted user preferences

pub mod config;
pub mod error;
pub mod events;
pub mod present;
pub mod storage;
pub mod timer;

pub use config::{DisplayFormat, FontChoice, Theme, TimerConfig};
pub use error::{ConfigError, CoreError, DatabaseError};
pub use events::{Event, SoundCue, SoundRequest};
pub use present::{DisplaySnapshot, Palette, Phase, ProgressGeometry};
pub use storage::{Database, Settings};
pub use timer::{TimerEngine, TimerState};
