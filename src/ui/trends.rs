//! Trends view rendering.
//!
//! One line chart per charted metric for the selected window, plus the
//! hydration gauge for the latest bucket. While a window is loading the
//! charts are replaced by a placeholder.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, Gauge, GraphType, Paragraph, Tabs},
    Frame,
};

use super::common::themed_block;
use crate::aggregator::TrendState;
use crate::app::App;
use crate::data::{Metric, TrendSeries, TrendWindow};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(6)]).split(area);
    let state = app.dashboard.trend_state();

    render_window_tabs(frame, app, state.window(), chunks[0]);

    match state {
        TrendState::Loading { window } => render_loading(frame, app, window, chunks[1]),
        TrendState::Ready(series) => {
            let body = Layout::horizontal([Constraint::Fill(3), Constraint::Fill(1)])
                .split(chunks[1]);
            render_charts(frame, app, &series, body[0]);
            render_hydration(frame, app, body[1]);
        }
    }
}

fn render_window_tabs(frame: &mut Frame, app: &App, window: TrendWindow, area: Rect) {
    let titles: Vec<Line> =
        TrendWindow::ALL.iter().map(|w| Line::from(format!(" {} ", w.label()))).collect();
    let selected = TrendWindow::ALL.iter().position(|w| *w == window).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");
    frame.render_widget(tabs, area);
}

fn render_loading(frame: &mut Frame, app: &App, window: TrendWindow, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("    Loading {} of data...", window.label()),
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
        )]),
    ];
    let paragraph = Paragraph::new(lines).block(themed_block(app, " Trends "));
    frame.render_widget(paragraph, area);
}

fn render_charts(frame: &mut Frame, app: &App, series: &TrendSeries, area: Rect) {
    if series.is_empty() {
        let paragraph = Paragraph::new("  No trend data for this window.")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(themed_block(app, format!(" Trends: {} ", series.window().label())));
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = Layout::vertical(Metric::CHARTED.map(|_| Constraint::Fill(1))).split(area);
    let colors = [app.theme.critical, app.theme.highlight, app.theme.warning];

    for ((metric, color), row) in Metric::CHARTED.iter().zip(colors).zip(rows.iter()) {
        let points = series.metric_points(*metric);
        let Some((min, max)) = series.metric_bounds(*metric) else {
            continue;
        };
        // Pad flat series so the line sits mid-chart.
        let pad = ((max - min) * 0.1).max(0.5);
        let (low, high) = (min - pad, max + pad);

        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&points);

        let first = series.points().first().map_or("", |p| p.bucket_label.as_str());
        let last = series.points().last().map_or("", |p| p.bucket_label.as_str());
        let x_max = (points.len().saturating_sub(1)).max(1) as f64;

        let chart = Chart::new(vec![dataset])
            .block(themed_block(app, format!(" {} ", metric.label())))
            .x_axis(
                Axis::default()
                    .bounds([0.0, x_max])
                    .labels([first.to_string(), last.to_string()])
                    .style(Style::default().add_modifier(Modifier::DIM)),
            )
            .y_axis(
                Axis::default()
                    .bounds([low, high])
                    .labels([format!("{:.1}", low), format!("{:.1}", high)])
                    .style(Style::default().add_modifier(Modifier::DIM)),
            );

        frame.render_widget(chart, *row);
    }
}

fn render_hydration(frame: &mut Frame, app: &App, area: Rect) {
    let split = app.dashboard.hydration_split();
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(area);

    let gauge = Gauge::default()
        .block(themed_block(app, " Hydration "))
        .gauge_style(Style::default().fg(app.theme.highlight))
        .percent(u16::from(split.hydrated))
        .label(format!("{}%", split.hydrated));
    frame.render_widget(gauge, chunks[0]);

    let lines = vec![
        Line::from(vec![
            Span::raw(" Hydrated:   "),
            Span::styled(
                format!("{}%", split.hydrated),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(" Dehydrated: "),
            Span::styled(
                format!("{}%", split.dehydrated),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(themed_block(app, " Split ")), chunks[1]);
}
