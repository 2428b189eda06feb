//! Dashboard state shared by the TUI and the export command.
//!
//! [`Dashboard`] owns the latest vitals snapshot, the care lists, the
//! rotating recommendations and the [`TrendAggregator`]. Renderers only read
//! from it; every mutation goes through `refresh`, `tick`, `select_window`
//! or `dismiss_alert`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::aggregator::{TrendAggregator, TrendState};
use crate::clock::Clock;
use crate::config::DashboardConfig;
use crate::data::{
    AggregatePoint, Alert, Appointment, CareData, HydrationSplit, Recommendations,
    SparklineFrame, StatusCounts, TrendSeries, TrendWindow, VitalCard, VitalStatus, VitalsData,
};
use crate::error::Result;
use crate::source::VitalsRepository;

/// Serializable view of the whole dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub exported_at: DateTime<Utc>,
    pub source: String,
    pub summary: StatusCounts,
    pub vitals: Vec<VitalCard>,
    pub alerts: Vec<String>,
    pub trend: TrendSnapshot,
    pub hydration: HydrationSplit,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendSnapshot {
    pub window: TrendWindow,
    pub loading: bool,
    pub points: Vec<AggregatePoint>,
}

#[derive(Debug)]
pub struct Dashboard {
    repository: Arc<dyn VitalsRepository>,
    clock: Arc<dyn Clock>,
    frame: SparklineFrame,

    vitals: VitalsData,
    care: CareData,
    recommendations: Recommendations,
    trends: TrendAggregator,

    /// Dismissed alerts and the status they had when dismissed.
    dismissed: HashMap<String, VitalStatus>,
    last_error: Option<String>,
}

impl Dashboard {
    pub fn new(
        repository: Arc<dyn VitalsRepository>,
        clock: Arc<dyn Clock>,
        config: &DashboardConfig,
        window: TrendWindow,
    ) -> Self {
        let trends = TrendAggregator::new(Arc::clone(&repository), Arc::clone(&clock))
            .with_latency(config.load_latency())
            .with_default_hydration(config.default_hydration)
            .with_window(window);
        let now = clock.now();

        Self {
            repository,
            clock,
            frame: config.sparkline,
            vitals: VitalsData::new(Vec::new(), now),
            care: CareData::default(),
            recommendations: Recommendations::new(Vec::new(), config.rotation_interval()),
            trends,
            dismissed: HashMap::new(),
            last_error: None,
        }
    }

    /// Fetch the first snapshot and start loading the initial trend window.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<()> {
        info!(
            source = %self.repository.description(),
            window = %self.trends.window(),
            "starting dashboard"
        );
        self.trends.reload();
        self.refresh()
    }

    /// Re-fetch vitals, care lists and recommendations.
    ///
    /// On failure the previous snapshot stays visible.
    pub fn refresh(&mut self) -> Result<()> {
        match self.fetch_all() {
            Ok(()) => {
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "refresh failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn fetch_all(&mut self) -> Result<()> {
        let now = self.clock.now();
        let samples = self.repository.fetch_vitals(now)?;
        let care = self.repository.fetch_care(now)?;
        let recommendations = self.repository.fetch_recommendations()?;

        self.vitals = VitalsData::new(samples, now);
        self.care = care;
        self.recommendations.replace(recommendations);
        self.prune_dismissed();
        Ok(())
    }

    /// Forget dismissals for vitals that are back to normal or gone.
    fn prune_dismissed(&mut self) {
        let vitals = &self.vitals;
        self.dismissed.retain(|id, _| {
            vitals
                .get(id)
                .and_then(|s| s.status())
                .is_some_and(|s| s != VitalStatus::Normal)
        });
    }

    /// Advance timers: applies finished trend loads and rotates the
    /// recommendation. Returns `true` if anything visible changed.
    pub fn tick(&mut self) -> bool {
        let trends_changed = self.trends.poll();
        let rotated = self.recommendations.tick(self.clock.now());
        trends_changed || rotated
    }

    pub fn description(&self) -> &str {
        self.repository.description()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref().or(self.trends.last_error())
    }

    pub fn vitals(&self) -> &VitalsData {
        &self.vitals
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.vitals.refreshed_at
    }

    pub fn sparkline_frame(&self) -> &SparklineFrame {
        &self.frame
    }

    /// Display cards with elapsed labels relative to the clock's now.
    pub fn cards(&self) -> Vec<VitalCard> {
        self.vitals.cards(self.clock.now(), &self.frame)
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.vitals.status_counts()
    }

    /// Active alerts, excluding dismissed ones that have not worsened.
    pub fn alerts(&self) -> Vec<Alert> {
        self.vitals
            .alerts()
            .into_iter()
            .filter(|alert| {
                self.dismissed
                    .get(&alert.vital_id)
                    .is_none_or(|&dismissed_at| alert.status > dismissed_at)
            })
            .collect()
    }

    /// Hide the alert for `vital_id` until its status worsens. Returns
    /// `false` if there is no active alert for it.
    pub fn dismiss_alert(&mut self, vital_id: &str) -> bool {
        let Some(status) = self
            .vitals
            .get(vital_id)
            .and_then(|s| s.status())
            .filter(|&s| s != VitalStatus::Normal)
        else {
            return false;
        };
        info!(vital = vital_id, %status, "alert dismissed");
        self.dismissed.insert(vital_id.to_string(), status);
        true
    }

    pub fn dismissed_count(&self) -> usize {
        self.dismissed.len()
    }

    pub fn trends(&self) -> &TrendAggregator {
        &self.trends
    }

    pub fn trend_state(&self) -> TrendState {
        self.trends.state()
    }

    pub fn trend_series(&self) -> Arc<TrendSeries> {
        self.trends.series()
    }

    pub fn trend_window(&self) -> TrendWindow {
        self.trends.window()
    }

    /// Must be called from within a tokio runtime.
    pub fn select_window(&mut self, window: TrendWindow) -> bool {
        self.trends.select_window(window)
    }

    /// Wait for the pending trend load, if any.
    pub async fn wait_for_trends(&mut self) {
        self.trends.wait_ready().await;
    }

    pub fn hydration_split(&self) -> HydrationSplit {
        self.trends.hydration_split()
    }

    pub fn current_recommendation(&self) -> Option<&str> {
        self.recommendations.current()
    }

    pub fn care(&self) -> &CareData {
        &self.care
    }

    pub fn upcoming_appointments(&self) -> Vec<&Appointment> {
        self.care.upcoming(self.clock.now())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let state = self.trends.state();
        let series = self.trends.series();
        DashboardSnapshot {
            exported_at: self.clock.now(),
            source: self.description().to_string(),
            summary: self.status_counts(),
            vitals: self.cards(),
            alerts: self.alerts().into_iter().map(|a| a.message).collect(),
            trend: TrendSnapshot {
                window: state.window(),
                loading: state.is_loading(),
                points: series.points().to_vec(),
            },
            hydration: self.hydration_split(),
            recommendation: self.current_recommendation().map(str::to_string),
        }
    }

    /// Pretty JSON of [`snapshot`](Self::snapshot).
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::source::{FileRepository, MockRepository};
    use chrono::TimeZone;
    use std::io::Write;
    use std::time::SystemTime;
    use tempfile::NamedTempFile;

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()))
    }

    fn mock_dashboard(clock: Arc<ManualClock>) -> Dashboard {
        Dashboard::new(
            Arc::new(MockRepository::seeded(5)),
            clock,
            &DashboardConfig::default(),
            TrendWindow::SevenDays,
        )
    }

    fn vital(id: &str, name: &str, value: &str, normal: [f64; 2], warning: [f64; 2]) -> String {
        format!(
            r#"{{ "id": "{id}", "name": "{name}", "value": {value}, "unit": "u",
                 "captured_at": "2026-10-16T08:30:00Z", "history": [1, 2, 3],
                 "ranges": {{ "normal": {normal:?}, "warning": {warning:?} }} }}"#
        )
    }

    fn dataset_file(vitals: &[String]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "vitals": [{}] }}"#, vitals.join(",")).unwrap();
        file.flush().unwrap();
        file
    }

    /// Replace the dataset and push its mtime `ahead_secs` into the future
    /// so the file cache sees the change.
    fn rewrite_dataset(file: &NamedTempFile, vitals: &[String], ahead_secs: u64) {
        std::fs::write(file.path(), format!(r#"{{ "vitals": [{}] }}"#, vitals.join(","))).unwrap();
        std::fs::File::options()
            .write(true)
            .open(file.path())
            .unwrap()
            .set_modified(SystemTime::now() + std::time::Duration::from_secs(ahead_secs))
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_loads_vitals_and_trends() {
        let mut dashboard = mock_dashboard(clock());
        dashboard.start().unwrap();

        assert_eq!(dashboard.vitals().samples.len(), 4);
        assert!(dashboard.trend_state().is_loading());
        assert!(dashboard.current_recommendation().is_some_and(|s| !s.is_empty()));

        dashboard.wait_for_trends().await;
        assert_eq!(dashboard.trend_series().len(), 7);

        let cards = dashboard.cards();
        assert_eq!(cards[0].value_text, "72");
        assert_eq!(cards[0].updated, "0 mins ago");
        assert_eq!(dashboard.status_counts().normal, 4);
        assert!(dashboard.alerts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_label_follows_clock() {
        let clock = clock();
        let mut dashboard = mock_dashboard(Arc::clone(&clock));
        dashboard.start().unwrap();

        clock.advance(chrono::Duration::seconds(150));
        assert_eq!(dashboard.cards()[0].updated, "3 mins ago");
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_switch_through_dashboard() {
        let mut dashboard = mock_dashboard(clock());
        dashboard.start().unwrap();
        dashboard.select_window(TrendWindow::ThirtyDays);
        dashboard.select_window(TrendWindow::OneYear);
        dashboard.wait_for_trends().await;

        assert_eq!(dashboard.trend_window(), TrendWindow::OneYear);
        assert_eq!(dashboard.trend_series().len(), 12);
        let split = dashboard.hydration_split();
        assert_eq!(split.hydrated + split.dehydrated, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_dismissal_and_reappearance() {
        let warning = dataset_file(&[
            vital("hr", "Heart Rate", "110", [60.0, 100.0], [50.0, 120.0]),
            vital("bp", "Blood Pressure", "\"abc/80\"", [90.0, 120.0], [80.0, 140.0]),
        ]);
        let mut dashboard = Dashboard::new(
            Arc::new(FileRepository::new(warning.path())),
            clock(),
            &DashboardConfig::default(),
            TrendWindow::SevenDays,
        );
        dashboard.start().unwrap();

        let alerts = dashboard.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].message, "Heart Rate is warning: 110 u (normal 60-100 u)");
        assert_eq!(dashboard.status_counts().unknown, 1);
        assert_eq!(dashboard.cards()[1].value_text, "—");

        assert!(dashboard.dismiss_alert("hr"));
        assert!(!dashboard.dismiss_alert("bp"));
        assert!(dashboard.alerts().is_empty());

        // Same status after refresh stays dismissed.
        dashboard.refresh().unwrap();
        assert!(dashboard.alerts().is_empty());
        assert_eq!(dashboard.dismissed_count(), 1);

        // Worsening to critical brings it back.
        rewrite_dataset(
            &warning,
            &[vital("hr", "Heart Rate", "130", [60.0, 100.0], [50.0, 120.0])],
            60,
        );
        dashboard.refresh().unwrap();
        let alerts = dashboard.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].vital_id, "hr");
        assert_eq!(alerts[0].status, VitalStatus::Critical);
        assert_eq!(dashboard.dismissed_count(), 1);

        // Back to normal forgets the dismissal.
        rewrite_dataset(
            &warning,
            &[vital("hr", "Heart Rate", "72", [60.0, 100.0], [50.0, 120.0])],
            120,
        );
        dashboard.refresh().unwrap();
        assert!(dashboard.alerts().is_empty());
        assert_eq!(dashboard.dismissed_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_care_follows_injected_clock() {
        let far_future = Utc.with_ymd_and_hms(2031, 5, 20, 8, 0, 0).unwrap();
        let mut dashboard = mock_dashboard(Arc::new(ManualClock::new(far_future)));
        dashboard.start().unwrap();

        let upcoming = dashboard.upcoming_appointments();
        assert_eq!(upcoming.len(), 3);
        assert!(upcoming.iter().all(|a| a.date > far_future));
        assert_eq!(dashboard.care().consultations.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_failure_keeps_snapshot() {
        let file = dataset_file(&[vital(
            "hr",
            "Heart Rate",
            "72",
            [60.0, 100.0],
            [50.0, 120.0],
        )]);
        let path = file.path().to_path_buf();
        let mut dashboard = Dashboard::new(
            Arc::new(FileRepository::new(&path)),
            clock(),
            &DashboardConfig::default(),
            TrendWindow::SevenDays,
        );
        dashboard.start().unwrap();
        drop(file);

        assert!(dashboard.refresh().is_err());
        assert!(dashboard.last_error().is_some());
        assert_eq!(dashboard.vitals().samples.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_start_leaves_usable_dashboard() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        drop(file);

        let mut dashboard = Dashboard::new(
            Arc::new(FileRepository::new(&path)),
            clock(),
            &DashboardConfig::default(),
            TrendWindow::SevenDays,
        );
        assert!(dashboard.start().is_err());
        assert!(dashboard.last_error().is_some());
        assert!(dashboard.cards().is_empty());
        assert!(dashboard.alerts().is_empty());
        dashboard.wait_for_trends().await;
        assert!(dashboard.trend_series().is_empty());

        // A later refresh recovers once the file shows up.
        std::fs::write(
            &path,
            format!(
                r#"{{ "vitals": [{}] }}"#,
                vital("hr", "Heart Rate", "72", [60.0, 100.0], [50.0, 120.0])
            ),
        )
        .unwrap();
        dashboard.refresh().unwrap();
        assert_eq!(dashboard.vitals().samples.len(), 1);
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_json() {
        let mut dashboard = mock_dashboard(clock());
        dashboard.start().unwrap();
        dashboard.wait_for_trends().await;

        let exported = dashboard.export_json().unwrap();
        let json: serde_json::Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(json["summary"]["normal"], 4);
        assert_eq!(json["vitals"][3]["value_text"], "120/80");
        assert_eq!(json["vitals"][0]["status"], "normal");
        assert_eq!(json["trend"]["window"], "7days");
        assert_eq!(json["trend"]["points"].as_array().unwrap().len(), 7);
        let hydrated = json["hydration"]["hydrated"].as_u64().unwrap();
        let dehydrated = json["hydration"]["dehydrated"].as_u64().unwrap();
        assert_eq!(hydrated + dehydrated, 100);
    }
}
