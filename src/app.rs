//! Application state and navigation logic.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::dashboard::Dashboard;
use crate::data::VitalCard;
use crate::ui::Theme;

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
///
/// Vital detail is shown as an overlay (controlled by `App::show_detail_overlay`)
/// rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Current vitals with status and sparkline.
    Vitals,
    /// Windowed charts and the hydration gauge.
    Trends,
    /// Vitals outside their normal range.
    Alerts,
    /// Appointments and past consultations.
    Care,
}

impl View {
    pub const ALL: [View; 4] = [View::Vitals, View::Trends, View::Alerts, View::Care];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Vitals => View::Trends,
            View::Trends => View::Alerts,
            View::Alerts => View::Care,
            View::Care => View::Vitals,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Vitals => View::Care,
            View::Trends => View::Vitals,
            View::Alerts => View::Trends,
            View::Care => View::Alerts,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Vitals => "Vitals",
            View::Trends => "Trends",
            View::Alerts => "Alerts",
            View::Care => "Care",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    pub dashboard: Dashboard,

    // Navigation state
    pub selected_vital_index: usize,
    pub selected_alert_index: usize,

    // UI
    pub theme: Theme,
    export_path: PathBuf,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App around a started dashboard.
    pub fn new(dashboard: Dashboard, theme: Theme, export_path: PathBuf) -> Self {
        Self {
            running: true,
            current_view: View::Vitals,
            show_help: false,
            show_detail_overlay: false,
            dashboard,
            selected_vital_index: 0,
            selected_alert_index: 0,
            theme,
            export_path,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.dashboard.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Advance timers. Returns true if a redraw is needed.
    pub fn tick(&mut self) -> bool {
        self.dashboard.tick()
    }

    /// Re-fetch vitals, reporting the outcome in the status bar.
    pub fn refresh(&mut self) {
        match self.dashboard.refresh() {
            Ok(()) => self.clamp_selection(),
            Err(e) => self.set_status_message(format!("Refresh failed: {}", e)),
        }
    }

    fn clamp_selection(&mut self) {
        let vitals = self.dashboard.vitals().samples.len();
        self.selected_vital_index = self.selected_vital_index.min(vitals.saturating_sub(1));
        let alerts = self.dashboard.alerts().len();
        self.selected_alert_index = self.selected_alert_index.min(alerts.saturating_sub(1));
    }

    /// Switch to the next view (cycles through Vitals → Trends → Alerts → Care).
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.show_detail_overlay = false;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        match self.current_view {
            View::Vitals => {
                let max = self.dashboard.vitals().samples.len().saturating_sub(1);
                self.selected_vital_index = (self.selected_vital_index + 1).min(max);
            }
            View::Alerts => {
                let max = self.dashboard.alerts().len().saturating_sub(1);
                self.selected_alert_index = (self.selected_alert_index + 1).min(max);
            }
            View::Trends | View::Care => {}
        }
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        match self.current_view {
            View::Vitals => self.selected_vital_index = self.selected_vital_index.saturating_sub(1),
            View::Alerts => self.selected_alert_index = self.selected_alert_index.saturating_sub(1),
            View::Trends | View::Care => {}
        }
    }

    /// The card under the cursor in the vitals view.
    pub fn selected_card(&self) -> Option<VitalCard> {
        self.dashboard.cards().into_iter().nth(self.selected_vital_index)
    }

    /// Cycle the trend window forward (or backward) and jump to the trends view.
    pub fn cycle_window(&mut self, forward: bool) {
        let current = self.dashboard.trend_window();
        let window = if forward {
            current.next()
        } else {
            current.prev()
        };
        self.current_view = View::Trends;
        self.dashboard.select_window(window);
    }

    /// Dismiss the selected alert for the rest of the session.
    pub fn dismiss_selected_alert(&mut self) {
        if self.current_view != View::Alerts {
            return;
        }
        let Some(alert) = self.dashboard.alerts().into_iter().nth(self.selected_alert_index) else {
            return;
        };
        if self.dashboard.dismiss_alert(&alert.vital_id) {
            self.set_status_message(format!("Dismissed alert for {}", alert.name));
            self.clamp_selection();
        }
    }

    /// Open the detail overlay for the currently selected vital.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Vitals && !self.dashboard.vitals().samples.is_empty() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlays first, then return to the vitals view.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else if self.show_detail_overlay {
            self.show_detail_overlay = false;
        } else {
            self.current_view = View::Vitals;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export to the configured path and report the result.
    pub fn export(&mut self) {
        let path = self.export_path.clone();
        match self.export_state(&path) {
            Ok(()) => self.set_status_message(format!("Exported to {}", path.display())),
            Err(e) => self.set_status_message(format!("Export failed: {:#}", e)),
        }
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let json = self.dashboard.export_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
