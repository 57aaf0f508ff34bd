//! Background refresh driver.
//!
//! A spawned task owns the API client and the polling interval, and the
//! view polls results back over a channel. One refresh cycle fans out to
//! the metadata, series, and latest-check fetchers concurrently and joins
//! them; each fetcher's failure is contained to its own events.
//!
//! The series fetch resolves its parameters (monitor id, range, request
//! generation) through a `watch` cell at call time, so the long-lived
//! driver never captures a stale range: the view updates the cell and the
//! next fetch, however it is triggered, sees the latest window.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, warn};

use super::state::FetchEvent;
use crate::api::{ApiError, MonitorApi};
use crate::data::{MonitorId, TimeRange};

/// Parameters a series fetch resolves when it runs, not when it is queued.
#[derive(Debug, Clone)]
pub struct FetchParams {
    pub monitor_id: Option<MonitorId>,
    pub range: TimeRange,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Refresh,
    FetchSeries,
}

/// Handle to the background refresh task.
///
/// Dropping the handle stops the task; [`shutdown`](Self::shutdown) stops
/// it eagerly.
#[derive(Debug)]
pub struct Refresher {
    commands: mpsc::Sender<Command>,
    params: watch::Sender<FetchParams>,
    enabled: watch::Sender<bool>,
    events: mpsc::Receiver<FetchEvent>,
    task: JoinHandle<()>,
}

impl Refresher {
    /// Spawn the driver task.
    ///
    /// While `enabled`, a full refresh runs immediately and then every
    /// `interval`; commands queued through the handle run regardless of
    /// the gate (a manual refresh still works while polling is paused).
    pub fn spawn(
        api: Arc<dyn MonitorApi>,
        params: FetchParams,
        interval: Duration,
        enabled: bool,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(64);
        let (param_tx, param_rx) = watch::channel(params);
        let (enabled_tx, enabled_rx) = watch::channel(enabled);

        let task = tokio::spawn(run(api, command_rx, event_tx, param_rx, enabled_rx, interval));

        Self {
            commands: command_tx,
            params: param_tx,
            enabled: enabled_tx,
            events: event_rx,
            task,
        }
    }

    /// Non-blocking poll for the next fetch event.
    pub fn try_next_event(&mut self) -> Option<FetchEvent> {
        self.events.try_recv().ok()
    }

    /// Await the next fetch event. Returns `None` once the driver is gone.
    pub async fn next_event(&mut self) -> Option<FetchEvent> {
        self.events.recv().await
    }

    /// Queue a full refresh cycle.
    pub fn refresh_now(&self) {
        let _ = self.commands.try_send(Command::Refresh);
    }

    /// Queue a series-only fetch for the current parameters.
    pub fn fetch_series(&self) {
        let _ = self.commands.try_send(Command::FetchSeries);
    }

    /// Update the window the next series fetch will load.
    pub fn set_range(&self, range: TimeRange, generation: u64) {
        self.params.send_modify(|p| {
            p.range = range;
            p.generation = generation;
        });
    }

    /// Gate the interval-driven refreshes (the edit dialog disables them).
    pub fn set_enabled(&self, enabled: bool) {
        let _ = self.enabled.send(enabled);
    }

    pub fn shutdown(self) {
        self.task.abort();
    }
}

async fn run(
    api: Arc<dyn MonitorApi>,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::Sender<FetchEvent>,
    params: watch::Receiver<FetchParams>,
    enabled: watch::Receiver<bool>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Refresh) => refresh(api.as_ref(), &params, &events).await,
                Some(Command::FetchSeries) => fetch_series(api.as_ref(), &params, &events).await,
                None => break,
            },
            _ = ticker.tick() => {
                if *enabled.borrow() {
                    refresh(api.as_ref(), &params, &events).await;
                }
            }
        }
    }
}

/// One orchestrated refresh cycle: all three fetchers run concurrently and
/// the cycle settles only once each has, success or failure.
async fn refresh(
    api: &dyn MonitorApi,
    params: &watch::Receiver<FetchParams>,
    events: &mpsc::Sender<FetchEvent>,
) {
    let monitor_id = params.borrow().monitor_id.clone();
    let Some(id) = monitor_id else {
        debug!("refresh skipped: no monitor selected");
        return;
    };

    tokio::join!(
        fetch_metadata(api, &id, events),
        fetch_series(api, params, events),
        fetch_latest(api, &id, events),
    );

    let _ = events.send(FetchEvent::RefreshFinished).await;
}

async fn fetch_metadata(
    api: &dyn MonitorApi,
    id: &MonitorId,
    events: &mpsc::Sender<FetchEvent>,
) {
    let _ = events.send(FetchEvent::MetadataStarted).await;

    match api.monitor(id).await {
        Ok(monitor) => {
            let _ = events.send(FetchEvent::MetadataLoaded(monitor)).await;
        }
        Err(ApiError::NotFound) => {
            warn!(monitor = %id, "monitor no longer exists");
            let _ = events.send(FetchEvent::MetadataMissing).await;
        }
        Err(err) => {
            error!(monitor = %id, error = %err, "failed to fetch monitor");
            let _ = events.send(FetchEvent::MetadataFailed(err.to_string())).await;
        }
    }
}

async fn fetch_series(
    api: &dyn MonitorApi,
    params: &watch::Receiver<FetchParams>,
    events: &mpsc::Sender<FetchEvent>,
) {
    // Resolved at call time: a refresh queued before a range change still
    // loads the window that is current when it actually runs.
    let (monitor_id, range, generation) = {
        let p = params.borrow();
        (p.monitor_id.clone(), p.range, p.generation)
    };
    let Some(id) = monitor_id else {
        return;
    };

    let _ = events.send(FetchEvent::SeriesStarted { generation }).await;

    match api.series(&id, range).await {
        Ok(checks) => {
            let _ = events
                .send(FetchEvent::SeriesLoaded { generation, checks })
                .await;
        }
        Err(err) => {
            error!(monitor = %id, range = %range, error = %err, "failed to fetch uptime series");
            let _ = events
                .send(FetchEvent::SeriesFailed {
                    generation,
                    message: format!("Failed to load uptime data: {}", err),
                })
                .await;
        }
    }
}

async fn fetch_latest(api: &dyn MonitorApi, id: &MonitorId, events: &mpsc::Sender<FetchEvent>) {
    let event = match api.latest(id).await {
        Ok(check) => FetchEvent::LatestLoaded(check),
        // No checks yet is a valid state, not an error
        Err(ApiError::NotFound) => FetchEvent::LatestLoaded(None),
        Err(err) => {
            warn!(monitor = %id, error = %err, "failed to fetch latest check");
            FetchEvent::LatestLoaded(None)
        }
    };
    let _ = events.send(event).await;
}
