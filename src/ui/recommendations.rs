//! Recommendation list.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::Recommendation;
use crate::ui::Theme;

/// Render the scrollable list of analysis results, oldest first.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.recommendations.len();
    let position_info = if count > 0 {
        format!(" [{}/{}]", app.selected_recommendation + 1, count)
    } else {
        String::new()
    };
    let block = Block::default()
        .title(format!(" Recommendations ({}){} ", count, position_info))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if count == 0 {
        let hint = Paragraph::new(" Press 'a' to analyze the current readings")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    // borders and highlight symbol
    let text_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .recommendations
        .iter()
        .map(|entry| entry_item(entry, &app.theme, text_width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected)
        .highlight_symbol("▶");

    let mut state = ListState::default();
    state.select(Some(app.selected_recommendation.min(count - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn entry_item<'a>(entry: &'a Recommendation, theme: &Theme, width: usize) -> ListItem<'a> {
    let style = if entry.is_error() {
        Style::default().fg(theme.critical)
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("#{}", entry.id),
        Style::default().add_modifier(Modifier::DIM),
    ))];
    for paragraph in entry.text.lines() {
        for line in wrap(paragraph, width) {
            lines.push(Line::from(Span::styled(line, style)));
        }
    }
    lines.push(Line::from(""));
    ListItem::new(lines)
}

/// Greedy word wrap. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { word.len() + 1 };
        if current_len + needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
