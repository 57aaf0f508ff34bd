//! Wire types for the uptime-monitoring API.
//!
//! These structs match the JSON produced by the status service. Both are
//! read-only to this client: a `Monitor` is only replaced wholesale when
//! metadata is refetched, and individual `Check`s are immutable once
//! recorded.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier of an endpoint monitor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonitorId(String);

impl MonitorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MonitorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MonitorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A configured endpoint under periodic observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    pub id: MonitorId,
    pub name: String,
    pub url: String,
    pub is_running: bool,
    /// Seconds between server-side checks.
    pub check_interval: u32,
    pub created_at: DateTime<Utc>,
}

impl Monitor {
    /// Time elapsed since the monitor was created.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }
}

/// One observation of a monitor at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    pub endpoint_monitor_id: MonitorId,
    pub timestamp: DateTime<Utc>,
    /// HTTP status code returned by the probed endpoint.
    pub status: u16,
    pub is_expected_status: bool,
    /// Response time in milliseconds; absent when the probe never connected.
    pub response_time: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_monitor() {
        let json = r#"{
            "id": "mon-1",
            "name": "Homepage",
            "url": "https://example.com",
            "isRunning": true,
            "checkInterval": 30,
            "createdAt": "2026-07-01T12:00:00Z"
        }"#;

        let monitor: Monitor = serde_json::from_str(json).unwrap();
        assert_eq!(monitor.id.as_str(), "mon-1");
        assert_eq!(monitor.name, "Homepage");
        assert!(monitor.is_running);
        assert_eq!(monitor.check_interval, 30);
    }

    #[test]
    fn test_deserialize_check_with_null_latency() {
        let json = r#"{
            "endpointMonitorId": "mon-1",
            "timestamp": "2026-07-01T12:00:30Z",
            "status": 503,
            "isExpectedStatus": false,
            "responseTime": null
        }"#;

        let check: Check = serde_json::from_str(json).unwrap();
        assert_eq!(check.status, 503);
        assert!(!check.is_expected_status);
        assert_eq!(check.response_time, None);
    }

    #[test]
    fn test_monitor_age() {
        let monitor: Monitor = serde_json::from_str(
            r#"{
                "id": "mon-1",
                "name": "Homepage",
                "url": "https://example.com",
                "isRunning": false,
                "checkInterval": 60,
                "createdAt": "2026-07-01T00:00:00Z"
            }"#,
        )
        .unwrap();

        let now = "2026-07-02T00:00:00Z".parse().unwrap();
        assert_eq!(monitor.age(now), Duration::days(1));
    }
}
