//! Detail overlay rendering.
//!
//! Displays a modal overlay with the ranges, history and sparkline
//! coordinates of the selected vital.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::common::themed_block;
use super::render_sparkline;
use crate::app::App;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Render the vital detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(card) = app.selected_card() else {
        return;
    };

    let overlay_width = (area.width * 90 / 100).clamp(MIN_OVERLAY_WIDTH, 90);
    let overlay_height = (area.height * 80 / 100).clamp(MIN_OVERLAY_HEIGHT, 30);
    let overlay_area = super::common::centered(area, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(7), // Header with value and ranges
        Constraint::Min(6),    // History table
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let status_style = app.theme.status_style(card.status);
    let status_label = card.status.map_or("Unknown", |s| s.label());
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let header_lines = vec![
        Line::from(vec![Span::styled(format!(" {} ", card.name), bold)]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Value: "),
            Span::styled(format!("{} {}", card.value_text, card.unit), bold),
            Span::raw("    Status: "),
            Span::styled(
                format!("{} {}", card.status_symbol(), status_label),
                status_style.add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("    Updated {}", card.updated)),
        ]),
        Line::from(vec![
            Span::raw(" Normal: "),
            Span::styled(format!("{} {}", card.normal_range, card.unit), bold),
            Span::raw("    Warning: "),
            Span::styled(format!("{} {}", card.warning_range, card.unit), bold),
        ]),
        Line::from(vec![
            Span::raw(" Trend: "),
            Span::styled(
                render_sparkline(&card.levels),
                Style::default().fg(app.theme.status_color(card.status)),
            ),
        ]),
    ];

    let header_block = Block::default()
        .title(" Vital Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // ===== HISTORY TABLE =====
    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Reading"),
        Cell::from("x"),
        Cell::from("y"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = card
        .history
        .iter()
        .zip(&card.sparkline)
        .enumerate()
        .map(|(i, (value, (x, y)))| {
            let style = if card.normal_range.contains(*value) {
                Style::default()
            } else {
                Style::default().fg(app.theme.warning)
            };
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(value.to_string()).style(style),
                Cell::from(format!("{:.1}", x)),
                Cell::from(format!("{:.1}", y)),
            ])
        })
        .collect();

    let frame_info = app.dashboard.sparkline_frame();
    let title = format!(
        " History ({}) [frame {}x{}, padding {}] ",
        card.history.len(),
        frame_info.width,
        frame_info.height,
        frame_info.padding
    );

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];
    let table = Table::new(rows, widths).header(header).block(themed_block(app, title));
    frame.render_widget(table, chunks[1]);

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}
