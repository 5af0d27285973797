//! SilkCircuit Neon palette and semantic styling for the dialog.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic Styles ───────────────────────────────────────────────────

/// Dialog title.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Dialog border.
pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

/// Label of the focused row.
pub fn label_active() -> Style {
    Style::default().fg(NEON_CYAN)
}

/// Label of any other row.
pub fn label_default() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Value of the focused row.
pub fn value_active() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Value of any other row.
pub fn value_default() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selector arrows and checkbox brackets of the focused row.
pub fn marker_active() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

/// Checked checkbox on an unfocused row.
pub fn marker_on() -> Style {
    Style::default().fg(SUCCESS_GREEN)
}

/// Unchecked checkbox or arrows on an unfocused row.
pub fn marker_off() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// "No selection" placeholder.
pub fn placeholder() -> Style {
    Style::default().fg(CORAL).add_modifier(Modifier::ITALIC)
}

/// Text cursor inside an edited value.
pub fn cursor() -> Style {
    Style::default().fg(BG_DARK).bg(NEON_CYAN)
}

/// Key hint text (e.g., "Enter save  Esc cancel").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}
