//! Request timing collection with rolling averages.
//!
//! Every call to the analysis service is timed and recorded into a global
//! collector (`global_metrics()`), which the app's status strip reads to
//! show average latency per request kind. Samples older than the window are
//! ignored by the rolling statistics; lifetime counters are kept forever.
//!
//! Timing uses `instant::Instant` so the same code runs on wasm32, where
//! `std::time::Instant` is unavailable.

use instant::Instant;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Default window for rolling averages (60 seconds).
const DEFAULT_WINDOW_SECS: u64 = 60;

/// Maximum samples kept per request kind.
const MAX_SAMPLES: usize = 500;

/// The request classes that are timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Upload,
    History,
    Result,
}

#[derive(Clone, Debug)]
struct TimingSample {
    timestamp: Instant,
    duration_ms: f64,
}

#[derive(Debug, Default)]
struct MetricData {
    samples: VecDeque<TimingSample>,
    total_count: u64,
    failure_count: u64,
}

impl MetricData {
    fn record(&mut self, duration_ms: f64, succeeded: bool) {
        self.total_count += 1;
        if !succeeded {
            self.failure_count += 1;
        }

        self.samples.push_back(TimingSample {
            timestamp: Instant::now(),
            duration_ms,
        });
        while self.samples.len() > MAX_SAMPLES {
            self.samples.pop_front();
        }
    }

    fn prune(&mut self, window: Duration) {
        // checked_sub: on wasm the clock starts at page load
        let Some(cutoff) = Instant::now().checked_sub(window) else {
            return;
        };

        while self
            .samples
            .front()
            .is_some_and(|front| front.timestamp < cutoff)
        {
            self.samples.pop_front();
        }
    }

    fn in_window(&self, window: Duration) -> impl Iterator<Item = &TimingSample> {
        let cutoff = Instant::now().checked_sub(window);
        self.samples
            .iter()
            .filter(move |sample| cutoff.is_none_or(|c| sample.timestamp >= c))
    }

    fn rolling_avg(&self, window: Duration) -> Option<f64> {
        let (sum, count) = self
            .in_window(window)
            .fold((0.0, 0usize), |(sum, count), sample| {
                (sum + sample.duration_ms, count + 1)
            });
        (count > 0).then(|| sum / count as f64)
    }

    fn rolling_count(&self, window: Duration) -> usize {
        self.in_window(window).count()
    }

    fn snapshot(&self, window: Duration) -> RequestSnapshot {
        RequestSnapshot {
            avg_ms: self.rolling_avg(window),
            count: self.rolling_count(window),
            total: self.total_count,
            failures: self.failure_count,
        }
    }
}

/// Statistics for one request kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestSnapshot {
    /// Average latency over the window
    pub avg_ms: Option<f64>,
    /// Requests in the window
    pub count: usize,
    /// Requests since startup
    pub total: u64,
    /// Failed requests since startup
    pub failures: u64,
}

/// Point-in-time view of all request metrics, for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub upload: RequestSnapshot,
    pub history: RequestSnapshot,
    pub result: RequestSnapshot,
}

#[derive(Debug, Default)]
struct MetricsInner {
    upload: MetricData,
    history: MetricData,
    result: MetricData,
}

impl MetricsInner {
    fn data_mut(&mut self, kind: RequestKind) -> &mut MetricData {
        match kind {
            RequestKind::Upload => &mut self.upload,
            RequestKind::History => &mut self.history,
            RequestKind::Result => &mut self.result,
        }
    }
}

/// Thread-safe request timing collector.
#[derive(Clone, Debug)]
pub struct RequestMetrics {
    inner: Arc<RwLock<MetricsInner>>,
    window: Duration,
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW_SECS)
    }

    /// Collector with a custom window (for testing).
    pub fn with_window(window_secs: u64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsInner::default())),
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn record(&self, kind: RequestKind, duration_ms: f64, succeeded: bool) {
        if let Ok(mut inner) = self.inner.write() {
            inner.data_mut(kind).record(duration_ms, succeeded);
        }
    }

    /// Times `started` until now and records the sample.
    pub fn record_since(&self, kind: RequestKind, started: Instant, succeeded: bool) {
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.record(kind, duration_ms, succeeded);
    }

    /// Drops samples older than the window.
    pub fn prune(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.upload.prune(self.window);
            inner.history.prune(self.window);
            inner.result.prune(self.window);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let Ok(inner) = self.inner.read() else {
            return MetricsSnapshot::default();
        };

        MetricsSnapshot {
            upload: inner.upload.snapshot(self.window),
            history: inner.history.snapshot(self.window),
            result: inner.result.snapshot(self.window),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            *inner = MetricsInner::default();
        }
    }
}

impl Default for RequestMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_METRICS: Lazy<RequestMetrics> = Lazy::new(RequestMetrics::new);

/// Get the global request metrics collector.
pub fn global_metrics() -> &'static RequestMetrics {
    &GLOBAL_METRICS
}
