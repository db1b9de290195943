//! Vital-sign slots.
//!
//! One row per sensor field: the displayed text, its normal range, a trend
//! sparkline and the outcome of the range check.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};
use vitalwatch_types::{Metric, NormalRanges};

use crate::app::App;
use crate::data::{Assessment, CheckStatus, MetricCheck, Quantity};

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Width of the trend column, in characters.
const TREND_WIDTH: usize = 12;

/// Render the vital-sign table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Vital", "Value", "Normal", "Trend", "Status"])
        .height(1)
        .style(app.theme.header);

    let assessment = app.display.assessment();
    let rows: Vec<Row> = app
        .display
        .slots()
        .map(|(metric, text)| {
            let status = assessment.map(|a| a.metric_status(metric));
            let style = status
                .map(|s| app.theme.status_style(s))
                .unwrap_or_default();

            Row::new(vec![
                Cell::from(metric.label()),
                Cell::from(text.to_string()).style(style),
                Cell::from(range_text(metric, app.context.ranges())),
                Cell::from(render_sparkline(&app.history.sparkline(trend_quantity(metric)))),
                Cell::from(assessment.map(|a| status_label(a, metric)).unwrap_or("-"))
                    .style(style),
            ])
            .height(1)
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Min(TREND_WIDTH as u16),
        Constraint::Min(6),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(" Vitals ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);
}

/// Quantity whose history is drawn for `metric`.
fn trend_quantity(metric: Metric) -> Quantity {
    match metric {
        Metric::BloodPressure => Quantity::Systolic,
        Metric::OxygenSaturation => Quantity::OxygenSaturation,
        Metric::HeartRate => Quantity::HeartRate,
        Metric::Glucose => Quantity::Glucose,
    }
}

fn range_text(metric: Metric, ranges: &NormalRanges) -> String {
    match metric {
        Metric::BloodPressure => format!(
            "{}/{} {}",
            ranges.systolic,
            ranges.diastolic,
            metric.unit()
        ),
        _ => {
            let quantity = trend_quantity(metric);
            format!("{} {}", quantity.bounds(ranges), metric.unit())
        }
    }
}

/// Short label for the worst check of `metric`.
fn status_label(assessment: &Assessment, metric: Metric) -> &'static str {
    let worst = assessment
        .checks
        .iter()
        .filter(|c| c.quantity.metric() == metric)
        .max_by_key(|c| c.status);
    match worst {
        Some(check) => check_label(check),
        None => "-",
    }
}

fn check_label(check: &MetricCheck) -> &'static str {
    match (check.status, check.value) {
        (CheckStatus::InRange, _) => "OK",
        (CheckStatus::Unreadable, _) => "??",
        (CheckStatus::OutOfRange, Some(v)) if v < check.bounds.min => "LOW",
        (CheckStatus::OutOfRange, _) => "HIGH",
    }
}

fn render_sparkline(data: &[u8]) -> String {
    if data.is_empty() {
        return " ".repeat(TREND_WIDTH);
    }

    // Take the most recent values
    let skip = data.len().saturating_sub(TREND_WIDTH);
    data[skip..].iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}
