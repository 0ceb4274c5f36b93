//! Typed access to the backend REST endpoints.

use std::time::Duration;

use buildinghub_models::{Issue, Resident};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ClientError, Result};

/// Residents listing, wrapped in a `{ "data": [...] }` envelope.
pub const RESIDENTS_PATH: &str = "api/v1/residents";

/// Issues listing, a bare JSON array.
pub const ISSUES_PATH: &str = "api/issues";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Client for the BuildingHub backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Creates a client for `base` with a per-request `timeout`.
    pub fn new(base: Url, timeout: Duration) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base.to_string()));
        }
        let mut base = base;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", self.base, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "GET");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request failed");
            ClientError::Request(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Backend returned an error status");
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(url = %url, error = %e, "Response did not match the expected shape");
            ClientError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Fetch all residents.
    pub async fn fetch_residents(&self) -> Result<Vec<Resident>> {
        let envelope: Envelope<Vec<Resident>> = self.get_json(RESIDENTS_PATH).await?;
        debug!(count = envelope.data.len(), "Residents fetched");
        Ok(envelope.data)
    }

    /// Fetch all issues.
    pub async fn fetch_issues(&self) -> Result<Vec<Issue>> {
        let issues: Vec<Issue> = self.get_json(ISSUES_PATH).await?;
        debug!(count = issues.len(), "Issues fetched");
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_under_base_path() {
        let c = client("http://localhost:8081");
        assert_eq!(
            c.endpoint(RESIDENTS_PATH).unwrap().as_str(),
            "http://localhost:8081/api/v1/residents"
        );

        let c = client("https://example.vn/backend");
        assert_eq!(c.base_url().path(), "/backend/");
        assert_eq!(
            c.endpoint(ISSUES_PATH).unwrap().as_str(),
            "https://example.vn/backend/api/issues"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        let url = Url::parse("mailto:admin@buildinghub.vn").unwrap();
        let err = ApiClient::new(url, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_envelope_shape() {
        let json = r#"{"data": [], "message": "ok"}"#;
        let envelope: Envelope<Vec<Resident>> = serde_json::from_str(json).unwrap();
        assert!(envelope.data.is_empty());
    }
}
