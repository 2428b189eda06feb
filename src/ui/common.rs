//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with the vitals overview.
///
/// Displays: worst-status indicator, vital counts by status, data source.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let counts = app.dashboard.status_counts();
    let worst = counts.worst();

    let count_span = |n: usize, status| {
        if n > 0 {
            Span::styled(n.to_string(), app.theme.status_style(Some(status)))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let mut spans = vec![
        Span::styled(" ● ", app.theme.status_style(worst)),
        Span::styled("VITALWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        count_span(counts.normal, crate::data::VitalStatus::Normal),
        Span::raw(" ok "),
        count_span(counts.warning, crate::data::VitalStatus::Warning),
        Span::raw(" warn "),
        count_span(counts.critical, crate::data::VitalStatus::Critical),
        Span::raw(" crit "),
    ];
    if counts.unknown > 0 {
        spans.push(Span::styled(
            format!("{} ?", counts.unknown),
            app.theme.status_style(None),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(format!("│ {}", app.source_description())));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view. The alerts tab shows the number of
/// active alerts.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let alerts = app.dashboard.alerts().len();
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| match view {
            View::Alerts if alerts > 0 => {
                Line::from(format!(" {}:{} ({}) ", i + 1, view.label(), alerts))
            }
            _ => Line::from(format!(" {}:{} ", i + 1, view.label())),
        })
        .collect();

    let selected = View::ALL.iter().position(|v| *v == app.current_view).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the rotating recommendation and the controls for the current view.
/// Temporary status messages and errors take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(err) = app.dashboard.last_error() {
        let paragraph = Paragraph::new(format!(" Error: {} | r:retry q:quit", err))
            .style(Style::default().fg(app.theme.critical));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Vitals => "↑↓:select Enter:detail Tab:switch ?:help q:quit",
        View::Trends => "w/W:window Tab:switch ?:help q:quit",
        View::Alerts => "↑↓:select d:dismiss Tab:switch ?:help q:quit",
        View::Care => "Tab:switch ?:help q:quit",
    };

    let line = match app.dashboard.current_recommendation() {
        Some(text) => Line::from(vec![
            Span::styled(" ✦ ", Style::default().fg(app.theme.highlight)),
            Span::raw(text.to_string()),
            Span::styled(
                format!(" | {}", controls),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        None => Line::from(Span::styled(
            format!(" {}", controls),
            Style::default().add_modifier(Modifier::DIM),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  1-4         Jump to view"),
        Line::from("  Tab/←/→     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  Enter       Vital detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Trends & Alerts"),
        Line::from("  w / W       Next / previous window"),
        Line::from("  d           Dismiss selected alert"),
        Line::from(""),
        section(" General"),
        Line::from("  r           Refresh vitals"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
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

    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let help_area = centered(area, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// A `width` x `height` rectangle centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Bordered block in the theme's style.
pub fn themed_block<'a>(app: &App, title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}
