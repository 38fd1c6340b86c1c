//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::BadgeStyle;

/// Focused field border
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Urgent badge (High priority)
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Caution badge (Medium priority)
pub const AMBER: Color = Color::Rgb(181, 137, 0);
/// Normal badge (Low priority)
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Label chips
pub const LABEL_BLUE: Color = Color::Rgb(30, 64, 175);

/// Background colour of a priority badge.
pub fn badge_color(style: BadgeStyle) -> Color {
    match style {
        BadgeStyle::Urgent => DARK_RED,
        BadgeStyle::Caution => AMBER,
        BadgeStyle::Normal => DARK_GREEN,
    }
}
