//! Theme palettes as utility-class tokens.
//!
//! The render sink consumes class names directly; the core only chooses
//! which set applies.

use serde::Serialize;

use super::phase::Phase;
use crate::config::Theme;

/// Class tokens for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub bg: &'static str,
    pub ring: &'static str,
    pub text: &'static str,
    pub timer_text: &'static str,
    pub glow: &'static str,
}

/// Resolve the palette for a phase and theme.
///
/// Warning and ending phases keep the theme's background but override the
/// ring and digit colors with fixed alert colors.
pub fn resolve(phase: Phase, theme: Theme) -> Palette {
    let base = theme_palette(theme);
    match phase {
        Phase::Normal => base,
        Phase::Warning => Palette {
            ring: "stroke-amber-400",
            timer_text: "text-amber-300",
            ..base
        },
        Phase::Ending => Palette {
            ring: "stroke-red-700",
            timer_text: "text-red-600",
            ..base
        },
    }
}

fn theme_palette(theme: Theme) -> Palette {
    match theme {
        Theme::Slate => Palette {
            bg: "from-slate-900 via-slate-800 to-slate-900",
            ring: "stroke-emerald-400",
            text: "text-emerald-100",
            timer_text: "text-white",
            glow: "shadow-emerald-500/50",
        },
        Theme::Purple => Palette {
            bg: "from-purple-900 via-purple-800 to-purple-900",
            ring: "stroke-purple-400",
            text: "text-purple-100",
            timer_text: "text-white",
            glow: "shadow-purple-500/50",
        },
        Theme::Green => Palette {
            bg: "from-green-900 via-green-800 to-green-900",
            ring: "stroke-green-400",
            text: "text-green-100",
            timer_text: "text-white",
            glow: "shadow-green-500/50",
        },
        Theme::White => Palette {
            bg: "from-gray-100 via-gray-200 to-gray-100",
            ring: "stroke-gray-700",
            text: "text-black",
            timer_text: "text-black-900",
            glow: "shadow-gray-500/50",
        },
        Theme::Red => Palette {
            bg: "from-red-900 via-red-800 to-red-900",
            ring: "stroke-red-400",
            text: "text-red-100",
            timer_text: "text-white",
            glow: "shadow-red-500/50",
        },
        Theme::Blue => Palette {
            bg: "from-blue-900 via-blue-800 to-blue-900",
            ring: "stroke-blue-400",
            text: "text-blue-100",
            timer_text: "text-white",
            glow: "shadow-blue-500/50",
        },
    }
}
