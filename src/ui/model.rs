//! Model panel.
//!
//! Draws the loaded figure in its current tint. Until the figure has loaded
//! a progress gauge takes its place.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::scene::{LoadState, SceneModel};
use crate::ui::Theme;

/// Render the model panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.context.model() {
        Some(model) => format!(" Model: {} ", model.name),
        None => " Model ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(model) = app.context.model() {
        // Center the figure as a block so its lines stay aligned
        let width = (model.width() as u16).min(inner.width);
        let x = inner.x + (inner.width - width) / 2;
        let figure_area = Rect::new(x, inner.y, width, inner.height);
        frame.render_widget(Paragraph::new(figure_lines(model, &app.theme)), figure_area);
        return;
    }

    let [gauge_area] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(inner);

    let gauge = match app.model_state() {
        Some(LoadState::Loading(pct)) => Gauge::default()
            .gauge_style(Style::default().fg(app.theme.highlight))
            .percent(pct.clamp(0.0, 100.0) as u16)
            .label(format!("Loading {:.0}%", pct)),
        Some(LoadState::Failed(err)) => Gauge::default()
            .gauge_style(Style::default().fg(app.theme.critical))
            .percent(0)
            .label(format!("Failed: {}", err)),
        // Loaded but not yet handed over, or no loader at all
        Some(LoadState::Loaded) | None => Gauge::default()
            .gauge_style(Style::default().fg(app.theme.border))
            .percent(0)
            .label("No model"),
    };
    frame.render_widget(gauge, gauge_area);
}

/// Figure lines, each styled with the tint of its part.
fn figure_lines<'a>(model: &'a SceneModel, theme: &Theme) -> Vec<Line<'a>> {
    model
        .parts
        .iter()
        .flat_map(|part| {
            let style = Style::default().fg(theme.tint_color(part.tint));
            part.lines
                .iter()
                .map(move |line| Line::from(Span::styled(line.as_str(), style)))
        })
        .collect()
}
