//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`vitals`]: Table of current vitals with status, sparkline and range
//! - [`trends`]: Window tabs, metric chart and hydration gauge
//! - [`alerts`]: Vitals outside their normal range
//! - [`care`]: Upcoming appointments and past consultations
//! - [`detail`]: Modal overlay with one vital's ranges and history
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (vitals/trends/alerts/care::render)  │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod alerts;
pub mod care;
pub mod common;
pub mod detail;
pub mod theme;
pub mod trends;
pub mod vitals;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::app::{App, View};

/// Sparkline characters (8 levels of height).
pub const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render a row of bar levels (0-7) as block characters.
pub fn render_sparkline(levels: &[u8]) -> String {
    levels.iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}

/// Draw one full frame: header, tabs, the current view, status bar and overlays.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Tabs
        Constraint::Min(5),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match app.current_view {
        View::Vitals => vitals::render(frame, app, chunks[2]),
        View::Trends => trends::render(frame, app, chunks[2]),
        View::Alerts => alerts::render(frame, app, chunks[2]),
        View::Care => care::render(frame, app, chunks[2]),
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_detail_overlay {
        detail::render_overlay(frame, app, frame.area());
    }
    if app.show_help {
        common::render_help(frame, app, frame.area());
    }
}
