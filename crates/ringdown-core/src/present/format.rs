//! Time formatting and digit sizing.
//!
//! Everything here derives from displayed whole seconds, never the precise
//! remaining time, so the visible digits only change on whole-second
//! boundaries.

use crate::config::DisplayFormat;

/// Render the remaining time under the configured format.
pub fn format_time(displayed_whole_secs: u32, format: DisplayFormat) -> String {
    let hours = displayed_whole_secs / 3600;
    let mins = (displayed_whole_secs % 3600) / 60;
    let secs = displayed_whole_secs % 60;
    match format {
        DisplayFormat::MinutesOnly => format!("{}", displayed_whole_secs.div_ceil(60)),
        DisplayFormat::MinutesSeconds => format!("{mins:02}:{secs:02}"),
        DisplayFormat::HoursMinutesSeconds => format!("{hours:02}:{mins:02}:{secs:02}"),
        DisplayFormat::UnitSuffixed => {
            if hours > 0 {
                format!("{hours}h{mins}m{secs}s")
            } else if mins > 0 {
                format!("{mins}m{secs}s")
            } else {
                format!("{secs}s")
            }
        }
    }
}

/// Viewport-width size token for the digits, keyed by format and rendered
/// text length. Purely cosmetic, but the table must stay reproducible.
pub fn font_size_for(format: DisplayFormat, text_len: usize) -> &'static str {
    match format {
        // Short format like "5" or "15".
        DisplayFormat::MinutesOnly => {
            if text_len <= 2 {
                "32vw"
            } else {
                "28vw"
            }
        }
        // Standard format like "05:30".
        DisplayFormat::MinutesSeconds => "20vw",
        // Long format like "01:05:30".
        DisplayFormat::HoursMinutesSeconds => {
            if text_len <= 7 {
                "14vw"
            } else {
                "12vw"
            }
        }
        // Unit format like "1h5m30s" or "5m30s" or "30s".
        DisplayFormat::UnitSuffixed => {
            if text_len <= 3 {
                "24vw"
            } else if text_len <= 6 {
                "18vw"
            } else {
                "14vw"
            }
        }
    }
}
