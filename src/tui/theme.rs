//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::scoring::DISCOUNT_BASELINE;

pub const TITLE_COLOR: Color = Color::Cyan;
pub const MUTED: Color = Color::Gray;
pub const INDEX_COLOR: Color = Color::DarkGray;
pub const ROW_ALT_BG: Color = Color::Indexed(235);
pub const BAR_EMPTY: Color = Color::DarkGray;
pub const STATUS_BAR_BG: Color = Color::Indexed(236);
pub const STATUS_KEY_COLOR: Color = Color::Cyan;
pub const FLASH_SUCCESS: Color = Color::Green;
pub const FLASH_ERROR: Color = Color::Red;
pub const BANNER_COLOR: Color = Color::Cyan;
pub const AUDIT_CLEARED_COLOR: Color = Color::Green;
pub const AUDIT_PENDING_COLOR: Color = Color::Yellow;

pub fn header_style() -> Style {
    Style::new().bold()
}

pub fn row_selected() -> Style {
    Style::new().reversed()
}

/// Color for a departmental score on the 0-100 scale.
///
/// Safety scoring is green-high: strong scores are good news, unlike an
/// urgency triage where hot items glow red.
pub fn score_color(score: f64) -> Color {
    if score >= 70.0 {
        Color::Green
    } else if score >= 40.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Color for the headline RRI value: green at or above the discount
/// baseline, yellow in the middle band, red below.
pub fn rri_color(rri: f64) -> Color {
    if rri >= DISCOUNT_BASELINE {
        Color::Green
    } else if rri >= 0.40 {
        Color::Yellow
    } else {
        Color::Red
    }
}
