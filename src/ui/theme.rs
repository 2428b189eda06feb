//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::VitalStatus;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for values in the warning band.
    pub warning: Color,
    /// Color for values outside the warning band.
    pub critical: Color,
    /// Color for values in the normal range.
    pub normal: Color,
    /// Color for placeholders and unclassifiable values.
    pub muted: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            normal: Color::Green,
            muted: Color::DarkGray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            normal: Color::Green,
            muted: Color::Gray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Pick light or dark from the terminal's background luminance.
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a vital status; `None` is an unclassifiable value.
    pub fn status_style(&self, status: Option<VitalStatus>) -> Style {
        match status {
            Some(VitalStatus::Normal) => Style::default().fg(self.normal),
            Some(VitalStatus::Warning) => Style::default().fg(self.warning),
            Some(VitalStatus::Critical) => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            None => Style::default().fg(self.muted),
        }
    }

    pub fn status_color(&self, status: Option<VitalStatus>) -> Color {
        match status {
            Some(VitalStatus::Normal) => self.normal,
            Some(VitalStatus::Warning) => self.warning,
            Some(VitalStatus::Critical) => self.critical,
            None => self.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.status_color(Some(VitalStatus::Normal)), theme.normal);
        assert_eq!(theme.status_color(Some(VitalStatus::Critical)), theme.critical);
        assert_eq!(theme.status_color(None), theme.muted);
        assert!(theme
            .status_style(Some(VitalStatus::Critical))
            .add_modifier
            .contains(Modifier::BOLD));
    }
}
