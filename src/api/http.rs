//! HTTP implementation of the status-API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};

use super::{ApiError, MonitorApi};
use crate::data::{Check, Monitor, MonitorId, TimeRange};

/// Per-request timeout. Polling cadence is seconds, so anything slower
/// than this counts as a failed cycle rather than a stalled view.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A [`MonitorApi`] backed by the uptime service's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for the service rooted at `base_url`
    /// (e.g. `http://localhost:3000/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, ApiError> {
        self.client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

/// Map a response status to the error taxonomy.
fn check_status(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::NOT_FOUND {
        Err(ApiError::NotFound)
    } else {
        Err(ApiError::Http(status.as_u16()))
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check_status(response.status())?;
    response
        .json()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

#[async_trait]
impl MonitorApi for HttpApi {
    async fn monitor(&self, id: &MonitorId) -> Result<Monitor, ApiError> {
        let response = self.get(&format!("endpoint-monitors/{}", id), &[]).await?;
        decode(response).await
    }

    async fn series(&self, id: &MonitorId, range: TimeRange) -> Result<Vec<Check>, ApiError> {
        let response = self
            .get(
                &format!("endpoint-monitors/{}/uptime/range", id),
                &[("range", range.as_str())],
            )
            .await?;
        decode(response).await
    }

    async fn latest(&self, id: &MonitorId) -> Result<Option<Check>, ApiError> {
        let response = self
            .get(&format!("endpoint-monitors/{}/uptime", id), &[])
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpApi::new("http://localhost:3000/api/").unwrap();
        assert_eq!(
            api.url("endpoint-monitors/mon-1"),
            "http://localhost:3000/api/endpoint-monitors/mon-1"
        );
    }

    #[test]
    fn test_check_status_mapping() {
        assert_eq!(check_status(StatusCode::OK), Ok(()));
        assert_eq!(check_status(StatusCode::NO_CONTENT), Ok(()));
        assert_eq!(
            check_status(StatusCode::NOT_FOUND),
            Err(ApiError::NotFound)
        );
        assert_eq!(
            check_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(ApiError::Http(500))
        );
        assert_eq!(
            check_status(StatusCode::BAD_GATEWAY),
            Err(ApiError::Http(502))
        );
    }
}
