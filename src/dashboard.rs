//! Dashboard orchestration
//!
//! Startup is strictly ordered: populate the filter dropdowns, issue one
//! refresh of every panel, then register one recurring timer per panel.
//! Panels never wait on each other. A refresh still in flight when its next
//! tick fires keeps running, and whichever finishes last owns the container.

use crate::api::AnalyticsApi;
use crate::document::Document;
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{EventSender, EventType};
use crate::panels::{PanelKind, PanelRefresh, RefreshOutcome};
use crate::selectors::initialize_selectors;
use futures::future::join_all;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, Instant, MissedTickBehavior};

pub struct Dashboard {
    api: Arc<dyn AnalyticsApi>,
    document: Document,
    panels: Vec<Arc<dyn PanelRefresh>>,
    event_sender: EventSender,
    error_classifier: ErrorClassifier,
    refresh_interval: Duration,
    selectors_ready: AtomicBool,
}

impl Dashboard {
    /// # Panics
    /// Panics if `refresh_interval` is zero.
    pub fn new(
        api: Arc<dyn AnalyticsApi>,
        document: Document,
        panels: Vec<Arc<dyn PanelRefresh>>,
        event_sender: EventSender,
        refresh_interval: Duration,
    ) -> Self {
        assert!(
            !refresh_interval.is_zero(),
            "refresh interval must be non-zero"
        );
        Self {
            api,
            document,
            panels,
            event_sender,
            error_classifier: ErrorClassifier::new(),
            refresh_interval,
            selectors_ready: AtomicBool::new(false),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Populate the filter dropdowns. Only the first call has an effect, so
    /// selections made afterwards survive a restart.
    pub fn prepare(&self) {
        if !self.selectors_ready.swap(true, Ordering::SeqCst) {
            initialize_selectors(&self.document);
        }
    }

    /// One fetch-then-render cycle for `panel`, reading the filters afresh.
    pub async fn refresh_panel(&self, panel: &dyn PanelRefresh) {
        let kind = panel.kind();
        self.event_sender
            .send_panel_event(
                kind,
                "Refreshing...".to_string(),
                EventType::Refresh,
                LogLevel::Debug,
            )
            .await;

        let filters = self.document.filter_selection();
        let outcome = panel
            .refresh(self.api.as_ref(), self.document.container(kind), &filters)
            .await;
        self.report(kind, outcome).await;
    }

    async fn report(&self, kind: PanelKind, outcome: RefreshOutcome) {
        let (message, event_type, log_level) = match outcome {
            RefreshOutcome::Rendered => {
                ("Updated".to_string(), EventType::Success, LogLevel::Info)
            }
            RefreshOutcome::Empty => (
                "No data available".to_string(),
                EventType::Empty,
                LogLevel::Info,
            ),
            RefreshOutcome::Failed(e) => (
                format!("Failed to refresh: {}", e),
                EventType::Error,
                self.error_classifier.classify_refresh_error(&e),
            ),
        };
        self.event_sender
            .send_panel_event(kind, message, event_type, log_level)
            .await;
    }

    /// Refresh every panel once and wait for all of them.
    pub async fn refresh_all(&self) {
        join_all(
            self.panels
                .iter()
                .map(|panel| self.refresh_panel(panel.as_ref())),
        )
        .await;
    }

    /// Start polling. Calling this again after [`PollHandle::stop`] restarts
    /// the timers without touching the filter selection.
    pub fn start(self: &Arc<Self>) -> PollHandle {
        self.prepare();

        // Issue every first load before any timer exists.
        let first_loads: Vec<JoinSet<()>> = self
            .panels
            .iter()
            .map(|panel| {
                let mut in_flight = JoinSet::new();
                in_flight.spawn(Self::refresh_owned(Arc::clone(self), Arc::clone(panel)));
                in_flight
            })
            .collect();

        let (shutdown_sender, _) = broadcast::channel(1);
        let join_handles = self
            .panels
            .iter()
            .zip(first_loads)
            .map(|(panel, in_flight)| {
                tokio::spawn(Self::poll_panel(
                    Arc::clone(self),
                    Arc::clone(panel),
                    in_flight,
                    shutdown_sender.subscribe(),
                ))
            })
            .collect();

        PollHandle {
            shutdown_sender,
            join_handles,
        }
    }

    async fn refresh_owned(dashboard: Arc<Self>, panel: Arc<dyn PanelRefresh>) {
        dashboard.refresh_panel(panel.as_ref()).await;
    }

    async fn poll_panel(
        dashboard: Arc<Self>,
        panel: Arc<dyn PanelRefresh>,
        mut in_flight: JoinSet<()>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let period = dashboard.refresh_interval;
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {
                    in_flight.spawn(Self::refresh_owned(Arc::clone(&dashboard), Arc::clone(&panel)));
                }
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }

        in_flight.shutdown().await;
    }
}

/// Running panel timers. Dropping the handle also stops them.
#[derive(Debug)]
pub struct PollHandle {
    shutdown_sender: broadcast::Sender<()>,
    join_handles: Vec<JoinHandle<()>>,
}

impl PollHandle {
    /// Number of recurring timers, one per panel.
    pub fn timer_count(&self) -> usize {
        self.join_handles.len()
    }

    /// Cancel every timer and every refresh still in flight.
    pub async fn stop(self) {
        let _ = self.shutdown_sender.send(());
        for handle in self.join_handles {
            let _ = handle.await;
        }
    }
}
