//! Status-API abstraction for fetching monitor data.
//!
//! The controller talks to the uptime service exclusively through the
//! [`MonitorApi`] trait so that tests can substitute an in-memory
//! implementation for the HTTP client in [`http`].

mod http;

pub use http::HttpApi;

use async_trait::async_trait;
use thiserror::Error;

use crate::data::{Check, Monitor, MonitorId, TimeRange};

/// Failure modes of a single API request.
///
/// `NotFound` is separated from the other HTTP failures because the
/// fetchers treat it structurally: a missing monitor triggers a redirect,
/// a missing latest check means "no checks yet".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("unexpected status {0}")]
    Http(u16),
    #[error("network error: {0}")]
    Network(String),
}

/// Client interface to the uptime-monitoring service.
///
/// Each method maps to one endpoint of the service. Implementations must
/// be cheap to share behind an `Arc` since the refresh driver holds one
/// for the lifetime of the view.
#[async_trait]
pub trait MonitorApi: Send + Sync {
    /// Fetch the monitor resource itself.
    async fn monitor(&self, id: &MonitorId) -> Result<Monitor, ApiError>;

    /// Fetch the check series for the given window, ordered by timestamp
    /// ascending.
    async fn series(&self, id: &MonitorId, range: TimeRange) -> Result<Vec<Check>, ApiError>;

    /// Fetch the single most recent check. `Ok(None)` means the monitor
    /// has no checks yet.
    async fn latest(&self, id: &MonitorId) -> Result<Option<Check>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ApiError::NotFound.to_string(), "not found");
        assert_eq!(ApiError::Http(503).to_string(), "unexpected status 503");
        assert_eq!(
            ApiError::Network("connection refused".into()).to_string(),
            "network error: connection refused"
        );
    }
}
