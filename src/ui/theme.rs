//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{CheckStatus, Verdict};
use crate::scene::Tint;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for unreadable values.
    pub warning: Color,
    /// Color for out-of-range values and failures.
    pub critical: Color,
    /// Color for in-range values.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Color the neutral model tint is drawn in.
    pub neutral: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            neutral: Color::Rgb(0xff, 0xff, 0xff),
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            // white would vanish on a light background
            neutral: Color::Reset,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for the outcome of a range check
    pub fn status_style(&self, status: CheckStatus) -> Style {
        match status {
            CheckStatus::InRange => Style::default().fg(self.healthy),
            CheckStatus::Unreadable => Style::default().fg(self.warning),
            CheckStatus::OutOfRange => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
        }
    }

    pub fn verdict_style(&self, verdict: Verdict) -> Style {
        match verdict {
            Verdict::Normal => Style::default().fg(self.healthy),
            Verdict::Abnormal => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
        }
    }

    /// Terminal color for a model tint.
    pub fn tint_color(&self, tint: Tint) -> Color {
        if tint == Tint::NEUTRAL {
            return self.neutral;
        }
        let (r, g, b) = tint.rgb();
        Color::Rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_colors() {
        let dark = Theme::dark();
        assert_eq!(dark.tint_color(Tint::NEUTRAL), Color::Rgb(255, 255, 255));
        assert_eq!(dark.tint_color(Tint::WARNING), Color::Rgb(255, 0, 0));

        let light = Theme::light();
        assert_eq!(light.tint_color(Tint::NEUTRAL), Color::Reset);
        assert_eq!(light.tint_color(Tint::WARNING), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_out_of_range_is_bold() {
        let theme = Theme::dark();
        let style = theme.status_style(CheckStatus::OutOfRange);
        assert_eq!(style.fg, Some(Color::Red));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }
}
