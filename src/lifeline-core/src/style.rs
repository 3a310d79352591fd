//! Lifeline palette.
//!
//! Safety-orange accents on a charcoal base. Every component draws with these
//! constants; nothing in the component crate hardcodes a color.

use ratatui::style::{Color, Modifier, Style};

// ============================================================
// ACCENT COLORS
// ============================================================

/// Primary accent - safety orange
pub const ACCENT: Color = Color::Rgb(255, 140, 26); // #FF8C1A

// ============================================================
// BACKGROUND COLORS
// ============================================================

/// Surface level 0 - table body and field background
pub const SURFACE_0: Color = Color::Rgb(24, 26, 31); // #181A1F

/// Surface level 1 - header rows, dropdown background
pub const SURFACE_1: Color = Color::Rgb(36, 39, 46); // #24272E

/// Surface level 2 - highlighted rows
pub const SURFACE_2: Color = Color::Rgb(52, 57, 67); // #343943

// ============================================================
// TEXT COLORS
// ============================================================

/// Primary text
pub const TEXT: Color = Color::Rgb(236, 238, 241); // #ECEEF1

/// Dimmed text - placeholders, secondary labels
pub const TEXT_DIM: Color = Color::Rgb(150, 156, 168); // #969CA8

/// Muted text - disabled controls, ellipses
pub const TEXT_MUTED: Color = Color::Rgb(96, 102, 114); // #606672

// ============================================================
// SEMANTIC COLORS
// ============================================================

/// Error - render faults, validation messages
pub const ERROR: Color = Color::Rgb(239, 83, 80); // #EF5350

/// Border around focused components
pub const BORDER_FOCUS: Color = ACCENT;

/// Border around idle components
pub const BORDER: Color = Color::Rgb(70, 76, 88); // #464C58

// ============================================================
// COMPOSED STYLES
// ============================================================

/// Style for header rows.
pub fn header() -> Style {
    Style::default()
        .fg(TEXT)
        .bg(SURFACE_1)
        .add_modifier(Modifier::BOLD)
}

/// Style for the highlighted dropdown option or focused header.
pub fn highlighted() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(SURFACE_2)
        .add_modifier(Modifier::BOLD)
}

/// Style for placeholder text.
pub fn placeholder() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::ITALIC)
}

/// Style for the inline error badge drawn in place of a faulted cell.
pub fn error_badge() -> Style {
    Style::default()
        .fg(SURFACE_0)
        .bg(ERROR)
        .add_modifier(Modifier::BOLD)
}

/// Style for disabled controls.
pub fn disabled() -> Style {
    Style::default().fg(TEXT_MUTED)
}
