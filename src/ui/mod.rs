//! Terminal UI rendering using ratatui.
//!
//! Each panel is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`vitals`]: The four vital-sign slots with range, trend and status
//! - [`model`]: The tinted figure, or a progress gauge while it loads
//! - [`recommendations`]: Scrollable list of analysis results
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls into these modules:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├────────────────────────┬─────────────┤
//! │ vitals::render         │ model::     │
//! │                        │   render    │
//! ├────────────────────────┴─────────────┤
//! │ recommendations::render              │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod common;
pub mod model;
pub mod recommendations;
pub mod theme;
pub mod vitals;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal size for usable display
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;

/// Draw the whole dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, area.height.saturating_sub(5) / 2, area.width, 5.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let [header, top, bottom, status] = Layout::vertical([
        Constraint::Length(1),      // Header bar
        Constraint::Percentage(55), // Vitals and model
        Constraint::Min(5),         // Recommendations
        Constraint::Length(1),      // Status bar
    ])
    .areas(area);

    let [vitals_area, model_area] =
        Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).areas(top);

    common::render_header(frame, app, header);
    vitals::render(frame, app, vitals_area);
    model::render(frame, app, model_area);
    recommendations::render(frame, app, bottom);
    common::render_status_bar(frame, app, status);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
