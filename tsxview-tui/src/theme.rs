//! Neon theme tokens for the TsxView TUI.
//!
//! One palette, exposed as style helpers:
//! - **Accent**: electric cyan (focus, highlights)
//! - **Positive**: neon green (fetched, success)
//! - **Negative**: hot pink (failures)
//! - **Warning**: neon orange (partial results, thresholds)
//! - **Neutral**: cool purple (secondary info)
//! - **Muted**: steel blue (hints, disabled)
//! - **Pinned**: plain red, reserved for the pinned ticker everywhere

use ratatui::style::{Color, Modifier, Style};

/// Electric cyan accent.
pub const ACCENT: Color = Color::Rgb(0, 255, 255);

/// The pinned ticker is always this color, in the chart and in lists.
pub const PINNED: Color = Color::Red;

const POSITIVE: Color = Color::Rgb(0, 255, 128);
const NEGATIVE: Color = Color::Rgb(255, 20, 147);
const WARNING: Color = Color::Rgb(255, 140, 0);
const NEUTRAL: Color = Color::Rgb(147, 112, 219);
const MUTED: Color = Color::Rgb(100, 149, 237);

/// Palette for unpinned chart series. Red is excluded so the pinned
/// ticker stays unambiguous.
const SERIES: [Color; 6] = [
    ACCENT,
    POSITIVE,
    NEUTRAL,
    WARNING,
    Color::Rgb(255, 255, 102),
    MUTED,
];

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn pinned() -> Style {
    Style::default().fg(PINNED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Color for the i-th unpinned series on a page.
pub fn series_color(i: usize) -> Color {
    SERIES[i % SERIES.len()]
}
