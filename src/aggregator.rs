//! Trend window selection and series loading.
//!
//! Selecting a window starts a background load that waits out the
//! configured latency and then asks the repository for the window's points.
//! Every load carries the selection generation it was started for; results
//! from an older generation are dropped on receipt, so the last requested
//! window always wins.
//!
//! ```text
//!            select_window(w)
//!   Ready ─────────────────────▶ Loading { w }
//!     ▲                              │
//!     │     poll() / wait_ready()    │ result for current generation
//!     └──────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::data::{
    hydration_gauge_split, AggregatePoint, HydrationSplit, TrendSeries, TrendWindow,
    DEFAULT_HYDRATION,
};
use crate::error::{Error, Result};
use crate::source::VitalsRepository;

/// Simulated load latency used when none is configured.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

/// What the trends view should show.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendState {
    /// A load for `window` is in flight.
    Loading { window: TrendWindow },
    /// The series for the current window.
    Ready(Arc<TrendSeries>),
}

impl TrendState {
    pub fn window(&self) -> TrendWindow {
        match self {
            TrendState::Loading { window } => *window,
            TrendState::Ready(series) => series.window(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, TrendState::Loading { .. })
    }
}

/// Result of one background load.
#[derive(Debug)]
struct LoadResult {
    generation: u64,
    window: TrendWindow,
    today: NaiveDate,
    outcome: Result<Vec<AggregatePoint>>,
}

/// Owns the selected trend window and its series.
#[derive(Debug)]
pub struct TrendAggregator {
    repository: Arc<dyn VitalsRepository>,
    clock: Arc<dyn Clock>,
    latency: Duration,
    default_hydration: u8,

    window: TrendWindow,
    generation: u64,
    loading: bool,
    series: Arc<TrendSeries>,
    last_error: Option<String>,

    tx: mpsc::UnboundedSender<LoadResult>,
    rx: mpsc::UnboundedReceiver<LoadResult>,
    pending: Option<JoinHandle<()>>,
}

impl TrendAggregator {
    /// Create an idle aggregator on the default window. Nothing is loaded
    /// until [`select_window`](Self::select_window) or
    /// [`reload`](Self::reload) is called.
    pub fn new(repository: Arc<dyn VitalsRepository>, clock: Arc<dyn Clock>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let window = TrendWindow::default();
        Self {
            repository,
            clock,
            latency: DEFAULT_LATENCY,
            default_hydration: DEFAULT_HYDRATION,
            window,
            generation: 0,
            loading: false,
            series: Arc::new(TrendSeries::empty(window)),
            last_error: None,
            tx,
            rx,
            pending: None,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_default_hydration(mut self, pct: u8) -> Self {
        self.default_hydration = pct.min(100);
        self
    }

    /// Set the initial window without loading it.
    pub fn with_window(mut self, window: TrendWindow) -> Self {
        self.window = window;
        self.series = Arc::new(TrendSeries::empty(window));
        self
    }

    /// The most recently requested window.
    pub fn window(&self) -> TrendWindow {
        self.window
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last load failure, cleared by the next successful load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn state(&self) -> TrendState {
        if self.loading {
            TrendState::Loading {
                window: self.window,
            }
        } else {
            TrendState::Ready(Arc::clone(&self.series))
        }
    }

    /// The last series that finished loading. While a load is in flight this
    /// may belong to the previous window.
    pub fn series(&self) -> Arc<TrendSeries> {
        Arc::clone(&self.series)
    }

    /// Hydration of the latest bucket, or the configured default when the
    /// series is empty.
    pub fn current_hydration(&self) -> u8 {
        match self.series.latest() {
            Ok(point) => point.hydration_pct.min(100),
            Err(Error::EmptySeries(window)) => {
                debug!(
                    window,
                    default = self.default_hydration,
                    "empty series, using default hydration"
                );
                self.default_hydration
            }
            Err(_) => self.default_hydration,
        }
    }

    pub fn hydration_split(&self) -> HydrationSplit {
        hydration_gauge_split(self.current_hydration())
    }

    /// Request `window`. Returns `false` when it has already loaded and no
    /// load is pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn select_window(&mut self, window: TrendWindow) -> bool {
        // Generation 0 means nothing was ever requested.
        if window == self.window && !self.loading && self.generation > 0 {
            return false;
        }

        info!(from = %self.window, to = %window, "trend window selected");
        self.window = window;
        self.start_load();
        true
    }

    /// Reload the current window.
    ///
    /// Must be called from within a tokio runtime.
    pub fn reload(&mut self) {
        self.start_load();
    }

    fn start_load(&mut self) {
        self.generation += 1;
        self.loading = true;

        if let Some(task) = self.pending.take() {
            task.abort();
        }

        let generation = self.generation;
        let window = self.window;
        let today = self.clock.today();
        let latency = self.latency;
        let repository = Arc::clone(&self.repository);
        let tx = self.tx.clone();

        debug!(generation, %window, %today, "starting trend load");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let outcome = repository.fetch_series(window, today);
            // The receiver lives as long as the aggregator.
            let _ = tx.send(LoadResult {
                generation,
                window,
                today,
                outcome,
            });
        }));
    }

    /// Apply any finished loads without blocking. Returns `true` if the
    /// visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.rx.try_recv() {
            changed |= self.apply(result);
        }
        changed
    }

    /// Wait until the current selection has finished loading.
    pub async fn wait_ready(&mut self) {
        while self.loading {
            match self.rx.recv().await {
                Some(result) => {
                    self.apply(result);
                }
                None => break,
            }
        }
    }

    /// Select `window`, wait for it to load and return its series.
    pub async fn series_for(&mut self, window: TrendWindow) -> Arc<TrendSeries> {
        self.select_window(window);
        self.wait_ready().await;
        self.series()
    }

    fn apply(&mut self, result: LoadResult) -> bool {
        if result.generation != self.generation {
            debug!(
                generation = result.generation,
                current = self.generation,
                window = %result.window,
                "discarding stale trend load"
            );
            return false;
        }

        self.loading = false;
        self.pending = None;

        match result.outcome {
            Ok(points) => {
                self.series =
                    Arc::new(TrendSeries::for_window(result.window, result.today, points));
                self.last_error = None;
                debug!(window = %result.window, points = self.series.len(), "trend series loaded");
            }
            Err(e) => {
                warn!(window = %result.window, error = %e, "trend load failed");
                self.series = Arc::new(TrendSeries::empty(result.window));
                self.last_error = Some(e.to_string());
            }
        }
        true
    }
}

impl Drop for TrendAggregator {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
