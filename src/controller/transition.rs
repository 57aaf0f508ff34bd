//! Range-switch transition scheduling.
//!
//! A user time-range change does not re-render immediately: the charts
//! first dim (showing the stale window), the new range is committed on the
//! next view-loop pass, and the dimming holds for a fixed settle window so
//! the tab animation finishes before the new data lands.

use std::time::{Duration, Instant};

use crate::data::TimeRange;

/// How long the view keeps rendering dimmed after a range change is
/// committed. Matches the tab animation duration.
pub const RANGE_SETTLE: Duration = Duration::from_millis(300);

/// Observable phase of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A change was requested but not yet committed.
    Transitioning,
    /// The change is committed; waiting out the settle window.
    Pending,
}

#[derive(Debug)]
enum Inner {
    Idle,
    Transitioning { target: TimeRange },
    Pending { until: Instant },
}

/// State machine driving deferred range switches.
///
/// The owner calls [`request`](Self::request) on user input and
/// [`tick`](Self::tick) once per view-loop pass; a returned range must be
/// committed to the authoritative state by the caller.
#[derive(Debug)]
pub struct TransitionScheduler {
    inner: Inner,
}

impl Default for TransitionScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionScheduler {
    pub fn new() -> Self {
        Self { inner: Inner::Idle }
    }

    pub fn phase(&self) -> Phase {
        match self.inner {
            Inner::Idle => Phase::Idle,
            Inner::Transitioning { .. } => Phase::Transitioning,
            Inner::Pending { .. } => Phase::Pending,
        }
    }

    /// True while the view should render dimmed/stale charts.
    pub fn is_active(&self) -> bool {
        !matches!(self.inner, Inner::Idle)
    }

    /// The requested range that has not been committed yet.
    pub fn target(&self) -> Option<TimeRange> {
        match self.inner {
            Inner::Transitioning { target } => Some(target),
            _ => None,
        }
    }

    /// Register a user range change. A request arriving mid-transition
    /// replaces the previous target.
    pub fn request(&mut self, target: TimeRange) {
        self.inner = Inner::Transitioning { target };
    }

    /// Advance the machine by one view-loop pass.
    ///
    /// Returns `Some(range)` exactly once per request, on the pass after
    /// it was made; the settle timer then runs out regardless of how long
    /// the resulting fetch takes.
    pub fn tick(&mut self, now: Instant) -> Option<TimeRange> {
        match self.inner {
            Inner::Idle => None,
            Inner::Transitioning { target } => {
                self.inner = Inner::Pending {
                    until: now + RANGE_SETTLE,
                };
                Some(target)
            }
            Inner::Pending { until } => {
                if now >= until {
                    self.inner = Inner::Idle;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let scheduler = TransitionScheduler::new();
        assert_eq!(scheduler.phase(), Phase::Idle);
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_request_enters_transitioning_immediately() {
        let mut scheduler = TransitionScheduler::new();
        scheduler.request(TimeRange::SevenDays);
        assert_eq!(scheduler.phase(), Phase::Transitioning);
        assert!(scheduler.is_active());
        assert_eq!(scheduler.target(), Some(TimeRange::SevenDays));
    }

    #[test]
    fn test_range_applies_only_on_tick() {
        let mut scheduler = TransitionScheduler::new();
        scheduler.request(TimeRange::SevenDays);

        let now = Instant::now();
        assert_eq!(scheduler.tick(now), Some(TimeRange::SevenDays));
        assert_eq!(scheduler.phase(), Phase::Pending);

        // The commit is delivered exactly once
        assert_eq!(scheduler.tick(now), None);
    }

    #[test]
    fn test_idle_no_earlier_than_settle_window() {
        let mut scheduler = TransitionScheduler::new();
        scheduler.request(TimeRange::OneHour);

        let start = Instant::now();
        scheduler.tick(start);

        scheduler.tick(start + RANGE_SETTLE - Duration::from_millis(1));
        assert_eq!(scheduler.phase(), Phase::Pending);
        assert!(scheduler.is_active());

        scheduler.tick(start + RANGE_SETTLE);
        assert_eq!(scheduler.phase(), Phase::Idle);
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_rerequest_mid_transition_replaces_target() {
        let mut scheduler = TransitionScheduler::new();
        scheduler.request(TimeRange::OneHour);

        let start = Instant::now();
        scheduler.tick(start);
        assert_eq!(scheduler.phase(), Phase::Pending);

        scheduler.request(TimeRange::SevenDays);
        assert_eq!(scheduler.phase(), Phase::Transitioning);
        assert_eq!(
            scheduler.tick(start + Duration::from_millis(50)),
            Some(TimeRange::SevenDays)
        );
    }
}
