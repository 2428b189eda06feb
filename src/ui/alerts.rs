use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::common::themed_block;
use crate::app::App;
use crate::data::VitalStatus;

/// Render active alerts, critical first.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let alerts = app.dashboard.alerts();

    if alerts.is_empty() {
        render_all_clear(frame, app, area);
        return;
    }

    let critical = alerts.iter().filter(|a| a.status == VitalStatus::Critical).count();
    let warning = alerts.len() - critical;

    let header = Row::new(vec![Cell::from("Status"), Cell::from("Alert")])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = alerts
        .iter()
        .map(|alert| {
            let style = app.theme.status_style(Some(alert.status));
            Row::new(vec![
                Cell::from(alert.status.symbol()).style(style),
                Cell::from(alert.message.clone()),
            ])
        })
        .collect();

    let selected = app.selected_alert_index.min(alerts.len().saturating_sub(1));
    let dismissed = app.dashboard.dismissed_count();
    let title = if dismissed > 0 {
        format!(
            " Alerts: {} critical, {} warning ({} dismissed) [d:dismiss] ",
            critical, warning, dismissed
        )
    } else {
        format!(" Alerts: {} critical, {} warning [d:dismiss] ", critical, warning)
    };

    let table = Table::new(rows, [Constraint::Min(6), Constraint::Fill(1)])
        .header(header)
        .block(themed_block(app, title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_all_clear(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Alerts ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.normal));

    let detail = match app.dashboard.dismissed_count() {
        0 => "      All vitals are within their normal ranges.".to_string(),
        n => format!("      {} dismissed alert(s) hidden for this session.", n),
    };

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("    ✓ ", Style::default().fg(app.theme.normal)),
            Span::styled(
                "No active alerts",
                Style::default().fg(app.theme.normal).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            detail,
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
