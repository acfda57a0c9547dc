//! Presentation mapping.
//!
//! Pure, stateless derivation of render-sink values from an engine snapshot
//! plus configuration. Nothing in this module mutates state or performs I/O;
//! identical inputs always produce identical outputs.

mod format;
mod geometry;
mod palette;
mod phase;

pub use format::{font_size_for, format_time};
pub use geometry::{ProgressGeometry, DEFAULT_CIRCLE_RADIUS};
pub use palette::{resolve as resolve_palette, Palette};
pub use phase::Phase;

use serde::Serialize;

use crate::config::TimerConfig;
use crate::timer::TimerEngine;

/// Everything the render layer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct DisplaySnapshot {
    pub formatted_time: String,
    pub phase: Phase,
    pub palette: Palette,
    /// `None` when the progress ring is hidden by settings.
    pub geometry: Option<ProgressGeometry>,
    /// Viewport-width size token for the digits.
    pub font_size: &'static str,
    pub font_class: &'static str,
}

/// Assemble the render-sink snapshot for the current engine state.
pub fn display_snapshot(engine: &TimerEngine, config: &TimerConfig) -> DisplaySnapshot {
    let displayed = engine.displayed_whole_secs();
    let phase = Phase::classify(displayed, config);
    let formatted_time = format_time(displayed, config.display_format);
    DisplaySnapshot {
        phase,
        palette: palette::resolve(phase, config.theme),
        geometry: config
            .show_progress
            .then(|| ProgressGeometry::compute(engine, DEFAULT_CIRCLE_RADIUS)),
        font_size: font_size_for(config.display_format, formatted_time.len()),
        font_class: config.font.css_class(),
        formatted_time,
    }
}
