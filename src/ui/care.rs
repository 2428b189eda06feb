//! Care view: upcoming appointments and past consultations.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use super::common::themed_block;
use crate::app::App;
use crate::data::elapsed::format_date;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_appointments(frame, app, chunks[0]);
    render_consultations(frame, app, chunks[1]);
}

fn render_appointments(frame: &mut Frame, app: &App, area: Rect) {
    let upcoming = app.dashboard.upcoming_appointments();
    let block = themed_block(app, format!(" Upcoming Appointments ({}) ", upcoming.len()));

    if upcoming.is_empty() {
        let paragraph = Paragraph::new("  No upcoming appointments.")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec!["Date", "Time", "Doctor", "Specialty", "Type"])
        .style(app.theme.header);

    let rows: Vec<Row> = upcoming
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::from(format_date(a.date)),
                Cell::from(a.time.clone()),
                Cell::from(a.doctor_name.clone()),
                Cell::from(a.specialty.clone()),
                Cell::from(if a.is_video_call { "video" } else { "in person" }),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Length(9),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(10),
    ];

    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn render_consultations(frame: &mut Frame, app: &App, area: Rect) {
    let consultations = app.dashboard.care().recent_consultations();
    let block = themed_block(app, format!(" Consultations ({}) ", consultations.len()));

    if consultations.is_empty() {
        let paragraph = Paragraph::new("  No past consultations.")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec!["Date", "Doctor", "Notes", "Prescriptions", "PDF"])
        .style(app.theme.header);

    let rows: Vec<Row> = consultations
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(format_date(c.date)),
                Cell::from(format!("{} ({})", c.doctor_name, c.specialty)),
                Cell::from(c.notes.clone()),
                Cell::from(c.prescriptions.join(", ")),
                Cell::from(if c.has_pdf { "✓" } else { "-" }),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Fill(5),
        Constraint::Fill(3),
        Constraint::Length(4),
    ];

    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
