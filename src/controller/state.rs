//! Authoritative state for the monitor detail view.
//!
//! The refresh driver pushes [`FetchEvent`]s over a channel; the view loop
//! drains them and applies each one here. All mutation happens on the view
//! loop, so the state needs no further synchronization: each fetcher owns
//! its own slice and the last applied event for a slice wins.

use std::time::Instant;

use chrono::Utc;
use tracing::debug;

use crate::data::{Check, DerivedMetrics, Monitor, TimeRange};
use crate::route::Route;

/// Result of one fetch attempt, as applied to the view state.
///
/// Series events carry the request generation current when the fetch was
/// issued; responses for a superseded generation are discarded rather than
/// allowed to overwrite a newer window's data.
#[derive(Debug, Clone)]
pub enum FetchEvent {
    MetadataStarted,
    MetadataLoaded(Monitor),
    /// The monitor no longer exists; the view should redirect away.
    MetadataMissing,
    MetadataFailed(String),
    SeriesStarted {
        generation: u64,
    },
    SeriesLoaded {
        generation: u64,
        checks: Vec<Check>,
    },
    SeriesFailed {
        generation: u64,
        message: String,
    },
    /// `None` covers both "no checks yet" and a degraded lookup failure.
    LatestLoaded(Option<Check>),
    /// All three fetchers of a refresh cycle have settled.
    RefreshFinished,
}

/// Follow-up work the owner must schedule after applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    /// The age-based default changed the active range; the series must be
    /// refetched for the new window.
    RefetchSeries,
}

/// Loading flag and error message for one fetcher.
///
/// Independent per fetcher so one source's failure never blanks another
/// source's display.
#[derive(Debug, Clone, Default)]
pub struct FetcherStatus {
    pub loading: bool,
    pub error: Option<String>,
}

/// The reconciled view state for one monitored endpoint.
pub struct DetailState {
    pub monitor: Option<Monitor>,
    pub metadata: FetcherStatus,

    /// Check series for the active window, timestamp ascending. Replaced
    /// wholesale on success; retained through failed refreshes.
    pub series: Vec<Check>,
    pub series_status: FetcherStatus,
    /// Latched true on the first successful series fetch, never reset.
    /// Gates "keep showing old charts while loading" against "show the
    /// empty-state placeholder".
    pub has_loaded_once: bool,

    pub latest: Option<Check>,
    pub metrics: DerivedMetrics,

    pub range: TimeRange,
    /// The location state carried a recognized range at mount, so the
    /// age-based default never applies.
    explicit_range: bool,
    /// One-shot: the age-based default has been resolved (or consumed by a
    /// user choice). Never reset for the lifetime of the view.
    default_range_applied: bool,

    /// Bumped on every committed range change; stale series responses are
    /// recognized by carrying an older value.
    pub generation: u64,

    pub last_refresh: Option<Instant>,

    series_version: u64,
    redirect: Option<Route>,
}

impl DetailState {
    /// Create the state for a freshly mounted view.
    ///
    /// `location_range` is the recognized range carried by the location
    /// state, if any; without one the view starts at the 1d default until
    /// metadata resolves the age-based window.
    pub fn new(location_range: Option<TimeRange>) -> Self {
        Self {
            monitor: None,
            metadata: FetcherStatus {
                loading: true,
                error: None,
            },
            series: Vec::new(),
            series_status: FetcherStatus::default(),
            has_loaded_once: false,
            latest: None,
            metrics: DerivedMetrics::default(),
            range: location_range.unwrap_or_default(),
            explicit_range: location_range.is_some(),
            default_range_applied: false,
            generation: 0,
            last_refresh: None,
            series_version: 0,
            redirect: None,
        }
    }

    /// Commit a user-initiated range change.
    ///
    /// Consumes the one-shot default (a later metadata load must not
    /// override the user's choice) and bumps the request generation.
    /// Returns the new generation for the fetch parameters.
    pub fn set_range(&mut self, range: TimeRange) -> u64 {
        self.default_range_applied = true;
        self.range = range;
        self.generation += 1;
        self.generation
    }

    /// Monotonic counter identifying the current series contents; used by
    /// the presented buffer to skip redundant snapshots.
    pub fn series_version(&self) -> u64 {
        self.series_version
    }

    /// The pending navigation redirect, if a fetch produced one.
    pub fn take_redirect(&mut self) -> Option<Route> {
        self.redirect.take()
    }

    /// Apply one fetch event.
    pub fn apply(&mut self, event: FetchEvent) -> Option<Followup> {
        match event {
            FetchEvent::MetadataStarted => {
                self.metadata.loading = true;
                None
            }
            FetchEvent::MetadataLoaded(monitor) => {
                self.metadata.loading = false;
                self.metadata.error = None;
                let followup = self.resolve_default_range(&monitor);
                self.monitor = Some(monitor);
                followup
            }
            FetchEvent::MetadataMissing => {
                self.metadata.loading = false;
                self.redirect = Some(Route::Dashboard);
                None
            }
            FetchEvent::MetadataFailed(message) => {
                // Prior metadata stays untouched; the poll simply failed.
                self.metadata.loading = false;
                self.metadata.error = Some(message);
                None
            }
            FetchEvent::SeriesStarted { generation } => {
                if generation == self.generation {
                    self.series_status.loading = true;
                    self.series_status.error = None;
                }
                None
            }
            FetchEvent::SeriesLoaded { generation, checks } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "discarding stale series response");
                    return None;
                }
                self.series = checks;
                self.series_version += 1;
                self.metrics = DerivedMetrics::from_series(&self.series);
                self.series_status.loading = false;
                self.series_status.error = None;
                self.has_loaded_once = true;
                None
            }
            FetchEvent::SeriesFailed { generation, message } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "discarding stale series failure");
                    return None;
                }
                self.series_status.loading = false;
                if self.series.is_empty() {
                    // Nothing was on screen; make the empty state explicit
                    self.metrics = DerivedMetrics::default();
                    self.series_version += 1;
                }
                self.series_status.error = Some(message);
                None
            }
            FetchEvent::LatestLoaded(check) => {
                self.latest = check;
                None
            }
            FetchEvent::RefreshFinished => {
                self.last_refresh = Some(Instant::now());
                None
            }
        }
    }

    /// One-shot age-based default for the display window (runs on the
    /// first metadata load, unless the location pinned a range).
    fn resolve_default_range(&mut self, monitor: &Monitor) -> Option<Followup> {
        if self.explicit_range || self.default_range_applied {
            return None;
        }
        self.default_range_applied = true;

        let default = TimeRange::default_for_age(monitor.age(Utc::now()));
        if default == self.range {
            return None;
        }

        self.range = default;
        self.generation += 1;
        Some(Followup::RefetchSeries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MonitorId;
    use chrono::Duration;

    fn monitor_with_age(age: Duration) -> Monitor {
        Monitor {
            id: MonitorId::new("mon-1"),
            name: "Homepage".to_string(),
            url: "https://example.com".to_string(),
            is_running: true,
            check_interval: 30,
            created_at: Utc::now() - age,
        }
    }

    fn check(is_expected: bool) -> Check {
        Check {
            endpoint_monitor_id: MonitorId::new("mon-1"),
            timestamp: Utc::now(),
            status: if is_expected { 200 } else { 500 },
            is_expected_status: is_expected,
            response_time: Some(120),
        }
    }

    fn loaded(generation: u64, checks: Vec<Check>) -> FetchEvent {
        FetchEvent::SeriesLoaded { generation, checks }
    }

    fn failed(generation: u64) -> FetchEvent {
        FetchEvent::SeriesFailed {
            generation,
            message: "Failed to load uptime data: unexpected status 503".to_string(),
        }
    }

    #[test]
    fn test_failed_refresh_retains_existing_series() {
        let mut state = DetailState::new(None);
        state.apply(loaded(0, vec![check(true), check(true)]));
        assert_eq!(state.series.len(), 2);

        state.apply(failed(0));
        assert_eq!(state.series.len(), 2);
        assert!(state.series_status.error.is_some());
        assert!(state.metrics.uptime_percentage.is_some());
    }

    #[test]
    fn test_failed_refresh_without_data_clears_metrics() {
        let mut state = DetailState::new(None);
        state.apply(failed(0));
        assert!(state.series.is_empty());
        assert_eq!(state.metrics, DerivedMetrics::default());
        assert!(state.series_status.error.is_some());
    }

    #[test]
    fn test_loaded_once_latch_never_resets() {
        let mut state = DetailState::new(None);
        assert!(!state.has_loaded_once);

        state.apply(loaded(0, vec![check(true)]));
        assert!(state.has_loaded_once);

        state.apply(failed(0));
        assert!(state.has_loaded_once);
    }

    #[test]
    fn test_stale_generation_response_discarded() {
        let mut state = DetailState::new(None);
        state.apply(loaded(0, vec![check(true)]));

        let generation = state.set_range(TimeRange::SevenDays);
        assert_eq!(generation, 1);

        // A late response for the old window must not overwrite anything
        state.apply(loaded(0, vec![check(false), check(false)]));
        assert_eq!(state.series.len(), 1);
        assert_eq!(state.metrics.uptime_percentage, Some(100.0));

        state.apply(loaded(1, vec![check(false), check(false)]));
        assert_eq!(state.series.len(), 2);
        assert_eq!(state.metrics.uptime_percentage, Some(0.0));
    }

    #[test]
    fn test_stale_failure_does_not_flag_error() {
        let mut state = DetailState::new(None);
        state.apply(loaded(0, vec![check(true)]));
        state.set_range(TimeRange::SevenDays);

        state.apply(failed(0));
        assert!(state.series_status.error.is_none());
    }

    #[test]
    fn test_metadata_missing_produces_redirect_only() {
        let mut state = DetailState::new(None);
        state.apply(FetchEvent::MetadataMissing);
        assert_eq!(state.take_redirect(), Some(Route::Dashboard));
        assert!(state.monitor.is_none());
        assert!(!state.metadata.loading);
        // The signal is consumed exactly once
        assert_eq!(state.take_redirect(), None);
    }

    #[test]
    fn test_metadata_failure_leaves_prior_monitor() {
        let mut state = DetailState::new(None);
        state.apply(FetchEvent::MetadataLoaded(monitor_with_age(Duration::days(3))));
        assert!(state.monitor.is_some());

        state.apply(FetchEvent::MetadataFailed("unexpected status 500".to_string()));
        assert!(state.monitor.is_some());
        assert!(state.metadata.error.is_some());
    }

    #[test]
    fn test_default_range_resolved_once_from_age() {
        let mut state = DetailState::new(None);
        assert_eq!(state.range, TimeRange::OneDay);

        let followup = state.apply(FetchEvent::MetadataLoaded(monitor_with_age(Duration::hours(2))));
        assert_eq!(followup, Some(Followup::RefetchSeries));
        assert_eq!(state.range, TimeRange::ThreeHours);
        assert_eq!(state.generation, 1);

        // Later metadata loads never re-derive the default
        let followup = state.apply(FetchEvent::MetadataLoaded(monitor_with_age(Duration::minutes(5))));
        assert_eq!(followup, None);
        assert_eq!(state.range, TimeRange::ThreeHours);
    }

    #[test]
    fn test_default_range_no_refetch_when_unchanged() {
        let mut state = DetailState::new(None);
        // A 7h-old monitor defaults to the same 1d the view started at
        let followup = state.apply(FetchEvent::MetadataLoaded(monitor_with_age(Duration::hours(7))));
        assert_eq!(followup, None);
        assert_eq!(state.range, TimeRange::OneDay);
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn test_explicit_location_range_skips_default() {
        let mut state = DetailState::new(Some(TimeRange::SevenDays));
        let followup = state.apply(FetchEvent::MetadataLoaded(monitor_with_age(Duration::minutes(10))));
        assert_eq!(followup, None);
        assert_eq!(state.range, TimeRange::SevenDays);
    }

    #[test]
    fn test_user_choice_consumes_default() {
        let mut state = DetailState::new(None);
        state.set_range(TimeRange::SixHours);

        let followup = state.apply(FetchEvent::MetadataLoaded(monitor_with_age(Duration::minutes(10))));
        assert_eq!(followup, None);
        assert_eq!(state.range, TimeRange::SixHours);
    }

    #[test]
    fn test_series_started_sets_loading_and_clears_error() {
        let mut state = DetailState::new(None);
        state.apply(failed(0));
        assert!(state.series_status.error.is_some());

        state.apply(FetchEvent::SeriesStarted { generation: 0 });
        assert!(state.series_status.loading);
        assert!(state.series_status.error.is_none());
    }

    #[test]
    fn test_latest_check_degrades_to_none() {
        let mut state = DetailState::new(None);
        state.apply(FetchEvent::LatestLoaded(Some(check(true))));
        assert!(state.latest.is_some());

        state.apply(FetchEvent::LatestLoaded(None));
        assert!(state.latest.is_none());
        // Latest-check failures never touch the series slice
        assert!(state.series_status.error.is_none());
    }
}
