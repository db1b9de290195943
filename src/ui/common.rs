//! Common UI components shared across panels.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the header bar with the current verdict.
///
/// Displays: verdict indicator, source, number of readings received.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled("VITALWATCH ", Style::default().add_modifier(Modifier::BOLD));

    let Some(verdict) = app.display.verdict() else {
        let line = Line::from(vec![
            Span::raw(" ○ "),
            title,
            Span::raw("│ Waiting for first reading │ "),
            Span::raw(app.source_description().to_string()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let style = app.theme.verdict_style(verdict);
    let line = Line::from(vec![
        Span::styled(" ● ", style),
        title,
        Span::raw("│ "),
        Span::styled(verdict.symbol(), style),
        Span::raw(" │ "),
        Span::raw(app.source_description().to_string()),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", app.display.updates),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" readings"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows time since last update, requests in flight, and available
/// controls. Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut activity = String::new();
    let fetching = app.fetches_in_flight();
    if fetching > 0 {
        activity.push_str(&format!(" | Fetching ({})", fetching));
    }
    let pending = app.analyses_pending();
    if pending > 0 {
        activity.push_str(&format!(" | Analyzing ({})", pending));
    }

    let controls = "a:analyze r:poll ↑↓:scroll ?:help q:quit";

    let (status, style) = if let Some(ref err) = app.load_error {
        (
            format!(" Error: {}{} | {}", err, activity, controls),
            Style::default().fg(app.theme.critical),
        )
    } else if let Some(updated) = app.display.last_updated {
        (
            format!(
                " Updated {:.1}s ago{} | {}",
                updated.elapsed().as_secs_f64(),
                activity,
                controls
            ),
            Style::default().add_modifier(Modifier::DIM),
        )
    } else {
        (
            format!(" Waiting for sensor...{} | {}", activity, controls),
            Style::default().add_modifier(Modifier::DIM),
        )
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |name: &'static str| {
        Line::from(vec![Span::styled(name, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Readings"),
        Line::from("  a           Analyze displayed readings"),
        Line::from("  r           Poll the sensor now"),
        Line::from(""),
        section(" Recommendations"),
        Line::from("  ↑/↓ j/k     Scroll list"),
        Line::from("  PgUp/PgDn   Jump 10 entries"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from(""),
        section(" General"),
        Line::from("  e           Export to JSON"),
        Line::from("  ?           Toggle help"),
        Line::from("  q Ctrl-C    Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 19u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
