//! Application state and view-loop logic for the detail view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::MonitorApi;
use crate::controller::{
    DetailState, FetchParams, Followup, Phase, Refresher, TransitionScheduler,
};
use crate::data::{Check, MonitorId, TimeRange};
use crate::route::{Location, Route};
use crate::ui::Theme;

/// Content injected into the shared header region.
///
/// The view fills this from monitor state while mounted and resets it to
/// the default on teardown.
#[derive(Debug, Clone, Default)]
pub struct HeaderContent {
    /// Left slot: the monitor's display name.
    pub left: Option<String>,
    /// Right slot: the live/paused status indicator.
    pub right: HeaderStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum HeaderStatus {
    #[default]
    Empty,
    Paused,
    Live {
        check_interval: u32,
        latest: Option<Check>,
    },
}

/// Snapshot of the state the charts render from.
///
/// Reconciled from the authoritative state once per view-loop pass (after
/// drawing), so the rendered series, range, and dim flag lag by exactly
/// one pass and a range switch never blocks on chart work.
#[derive(Debug, Clone)]
pub struct Presented {
    pub series: Vec<Check>,
    pub range: TimeRange,
    pub dimmed: bool,
    version: u64,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub edit_open: bool,
    pub theme: Theme,

    pub monitor_id: MonitorId,
    pub state: DetailState,
    pub presented: Presented,
    pub location: Location,
    pub header: HeaderContent,

    transition: TransitionScheduler,
    refresher: Refresher,
    exit_note: Option<String>,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create the app and spawn its refresh driver.
    ///
    /// `location_range` is the recognized `range` parameter from the
    /// initial location, if any.
    pub fn new(
        api: Arc<dyn MonitorApi>,
        monitor_id: MonitorId,
        location_range: Option<TimeRange>,
        refresh_interval: Duration,
    ) -> Self {
        let state = DetailState::new(location_range);
        let refresher = Refresher::spawn(
            api,
            FetchParams {
                monitor_id: Some(monitor_id.clone()),
                range: state.range,
                generation: state.generation,
            },
            refresh_interval,
            true,
        );
        let presented = Presented {
            series: Vec::new(),
            range: state.range,
            dimmed: false,
            version: state.series_version(),
        };
        let location = Location::new(Route::MonitorDetail {
            id: monitor_id.clone(),
            range: location_range,
        });

        Self {
            running: true,
            show_help: false,
            edit_open: false,
            theme: Theme::auto_detect(),
            monitor_id,
            state,
            presented,
            location,
            header: HeaderContent::default(),
            transition: TransitionScheduler::new(),
            refresher,
            exit_note: None,
            status_message: None,
        }
    }

    /// The range the tabs highlight: the requested target while a change
    /// is in flight, the committed range otherwise.
    pub fn selected_range(&self) -> TimeRange {
        self.transition.target().unwrap_or(self.state.range)
    }

    /// User-initiated range change; commits on the next pass.
    pub fn request_range(&mut self, target: TimeRange) {
        if target != self.selected_range() {
            self.transition.request(target);
        }
    }

    pub fn transition_phase(&self) -> Phase {
        self.transition.phase()
    }

    /// Queue an immediate full refresh.
    pub fn refresh_now(&self) {
        self.refresher.refresh_now();
    }

    /// Open the edit dialog; polling is suspended while it is open so a
    /// refresh cannot clobber in-flight edits.
    pub fn open_edit(&mut self) {
        self.edit_open = true;
        self.refresher.set_enabled(false);
    }

    pub fn close_edit(&mut self) {
        self.edit_open = false;
        self.refresher.set_enabled(true);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Drain fetch events and advance the transition machine.
    ///
    /// Called once per view-loop pass, after input handling and before the
    /// presented snapshot is reconciled.
    pub fn pump(&mut self) {
        self.pump_at(Instant::now());
    }

    pub(crate) fn pump_at(&mut self, now: Instant) {
        while let Some(event) = self.refresher.try_next_event() {
            if let Some(Followup::RefetchSeries) = self.state.apply(event) {
                self.refresher.set_range(self.state.range, self.state.generation);
                self.refresher.fetch_series();
            }
        }

        if let Some(target) = self.transition.tick(now) {
            self.commit_range(target);
        }

        if let Some(route) = self.state.take_redirect() {
            self.exit_note = Some("Monitor not found; returning to the dashboard".to_string());
            self.location.replace(route);
            self.running = false;
        }

        self.sync_header();
    }

    /// Apply a transitioned range change to the authoritative state, the
    /// location history, and the fetch parameters.
    fn commit_range(&mut self, target: TimeRange) {
        let generation = self.state.set_range(target);
        self.refresher.set_range(target, generation);
        self.location.push(Route::detail(self.monitor_id.clone(), target));
        self.refresher.fetch_series();
    }

    /// Reconcile the presented snapshot from the authoritative state.
    ///
    /// The series is only re-cloned when its version changed; range and
    /// dim flag are cheap and copied every pass.
    pub fn present(&mut self) {
        if self.presented.version != self.state.series_version() {
            self.presented.series = self.state.series.clone();
            self.presented.version = self.state.series_version();
        }
        self.presented.range = self.state.range;
        self.presented.dimmed = self.transition.is_active();
    }

    fn sync_header(&mut self) {
        if let Some(monitor) = &self.state.monitor {
            self.header.left = Some(monitor.name.clone());
            self.header.right = if monitor.is_running {
                HeaderStatus::Live {
                    check_interval: monitor.check_interval,
                    latest: self.state.latest.clone(),
                }
            } else {
                HeaderStatus::Paused
            };
        }
    }

    /// Restore the shared header to its default content on teardown.
    pub fn reset_header(&mut self) {
        self.header = HeaderContent::default();
    }

    pub fn exit_note(&self) -> Option<&str> {
        self.exit_note.as_deref()
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Stop the refresh driver and hand back the exit note, if any.
    pub fn shutdown(mut self) -> Option<String> {
        self.reset_header();
        self.refresher.shutdown();
        self.exit_note
    }
}
