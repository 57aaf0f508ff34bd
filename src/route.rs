//! Navigable location state.
//!
//! The detail view mirrors its active time range into a location entry so
//! the selection survives reload and sharing, the same way the web
//! dashboard encodes it in the URL. Routes are typed values; the current
//! path is shown in the status bar and accepted via `--route`-style deep
//! links (`--range` on the CLI).

use crate::data::{MonitorId, TimeRange};

/// A navigable location within the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The dashboard root listing all monitors.
    Dashboard,
    /// The detail view for one monitor, with an optional explicit range.
    MonitorDetail {
        id: MonitorId,
        range: Option<TimeRange>,
    },
}

impl Route {
    /// Detail route for a monitor. The 1d default is encoded as "no
    /// parameter" so default links stay canonical.
    pub fn detail(id: MonitorId, range: TimeRange) -> Route {
        let range = (range != TimeRange::default()).then_some(range);
        Route::MonitorDetail { id, range }
    }

    /// Render the route as a path string.
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::MonitorDetail { id, range: None } => format!("/endpoint-monitors/{}", id),
            Route::MonitorDetail {
                id,
                range: Some(range),
            } => format!("/endpoint-monitors/{}?range={}", id, range),
        }
    }

    /// Parse a path string. Unrecognized range values are dropped, not
    /// rejected: the view falls back to its default until metadata loads.
    pub fn parse(s: &str) -> Option<Route> {
        if s == "/" {
            return Some(Route::Dashboard);
        }

        let rest = s.strip_prefix("/endpoint-monitors/")?;
        let (id, query) = match rest.split_once('?') {
            Some((id, query)) => (id, Some(query)),
            None => (rest, None),
        };
        if id.is_empty() {
            return None;
        }

        let range = query
            .and_then(|q| {
                q.split('&')
                    .find_map(|pair| pair.strip_prefix("range="))
            })
            .and_then(TimeRange::parse);

        Some(Route::MonitorDetail {
            id: MonitorId::new(id),
            range,
        })
    }

    /// The explicit range carried by this route, if any.
    pub fn range(&self) -> Option<TimeRange> {
        match self {
            Route::MonitorDetail { range, .. } => *range,
            Route::Dashboard => None,
        }
    }
}

/// In-process location history.
///
/// Range changes push a new entry (back navigation would restore the old
/// window); redirects replace the current one.
#[derive(Debug)]
pub struct Location {
    entries: Vec<Route>,
}

impl Location {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    pub fn current(&self) -> &Route {
        self.entries.last().expect("location history is never empty")
    }

    /// Push a new entry, unless it equals the current one.
    pub fn push(&mut self, route: Route) {
        if self.current() != &route {
            self.entries.push(route);
        }
    }

    /// Replace the current entry without growing the history.
    pub fn replace(&mut self, route: Route) {
        *self.entries.last_mut().expect("location history is never empty") = route;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_path_without_range_for_default() {
        let route = Route::detail(MonitorId::new("mon-1"), TimeRange::OneDay);
        assert_eq!(route.path(), "/endpoint-monitors/mon-1");
    }

    #[test]
    fn test_detail_path_with_range() {
        let route = Route::detail(MonitorId::new("mon-1"), TimeRange::SevenDays);
        assert_eq!(route.path(), "/endpoint-monitors/mon-1?range=7d");
    }

    #[test]
    fn test_parse_round_trip() {
        for path in ["/", "/endpoint-monitors/mon-1", "/endpoint-monitors/mon-1?range=3h"] {
            let route = Route::parse(path).unwrap();
            assert_eq!(route.path(), path);
        }
    }

    #[test]
    fn test_parse_drops_unrecognized_range() {
        let route = Route::parse("/endpoint-monitors/mon-1?range=90m").unwrap();
        assert_eq!(route.range(), None);
    }

    #[test]
    fn test_parse_rejects_other_paths() {
        assert_eq!(Route::parse("/settings"), None);
        assert_eq!(Route::parse("/endpoint-monitors/"), None);
    }

    #[test]
    fn test_location_push_and_replace() {
        let mut location = Location::new(Route::parse("/endpoint-monitors/mon-1").unwrap());
        assert_eq!(location.len(), 1);

        location.push(Route::detail(MonitorId::new("mon-1"), TimeRange::SevenDays));
        assert_eq!(location.len(), 2);
        assert_eq!(location.current().range(), Some(TimeRange::SevenDays));

        // Pushing the same route again is a no-op
        location.push(Route::detail(MonitorId::new("mon-1"), TimeRange::SevenDays));
        assert_eq!(location.len(), 2);

        location.replace(Route::Dashboard);
        assert_eq!(location.len(), 2);
        assert_eq!(location.current(), &Route::Dashboard);
    }
}
