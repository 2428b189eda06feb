//! Vitals view rendering.
//!
//! Displays a table of all vitals with value, status, sparkline trend,
//! normal range and time since the reading.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::common::themed_block;
use super::render_sparkline;
use crate::app::App;

/// Render the vitals table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let cards = app.dashboard.cards();

    if cards.is_empty() {
        let paragraph = Paragraph::new("  No vitals available.")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(themed_block(app, " Vitals "));
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Vital"),
        Cell::from("Value"),
        Cell::from("Status"),
        Cell::from("Trend"),
        Cell::from("Normal"),
        Cell::from("Updated"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = cards
        .iter()
        .map(|card| {
            let status_style = app.theme.status_style(card.status);
            let value_style = if card.outside_normal {
                status_style.add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(card.name.clone()),
                Cell::from(format!("{} {}", card.value_text, card.unit)).style(value_style),
                Cell::from(card.status_symbol()).style(status_style),
                Cell::from(render_sparkline(&card.levels))
                    .style(Style::default().fg(app.theme.status_color(card.status))),
                Cell::from(format!("{} {}", card.normal_range, card.unit)),
                Cell::from(card.updated.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Min(6),
        Constraint::Min(9),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];

    let selected = app.selected_vital_index.min(cards.len().saturating_sub(1));
    let title = format!(" Vitals [{}/{}] ", selected + 1, cards.len());

    let table = Table::new(rows, widths)
        .header(header)
        .block(themed_block(app, title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}
