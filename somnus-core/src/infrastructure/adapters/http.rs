// somnus-core/src/infrastructure/adapters/http.rs

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::infrastructure::error::InfrastructureError;
use crate::ports::fetcher::{FetchOutcome, Fetcher};

const USER_AGENT: &str = concat!("somnus/", env!("CARGO_PKG_VERSION"));

/// GETs raw datasets over HTTP(S). Classifies every response into a
/// [`FetchOutcome`]; retrying is the caller's business.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

/// Maps a non-success HTTP status to its outcome.
pub fn classify_status(status: StatusCode, location: &str) -> FetchOutcome {
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => FetchOutcome::NotFound(location.to_string()),
        StatusCode::TOO_MANY_REQUESTS | StatusCode::REQUEST_TIMEOUT => {
            FetchOutcome::Transient(format!("HTTP {}", status))
        }
        s if s.is_server_error() => FetchOutcome::Transient(format!("HTTP {}", s)),
        s => FetchOutcome::Rejected {
            status: s.as_u16(),
            location: location.to_string(),
        },
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, location: &str) -> FetchOutcome {
        let response = match self.client.get(location).send().await {
            Ok(r) => r,
            // Connection refused, DNS, TLS handshake, timeout...
            Err(e) => return FetchOutcome::Transient(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "Non-success response");
            return classify_status(status, location);
        }

        match response.bytes().await {
            Ok(body) => FetchOutcome::Fetched(body.to_vec()),
            Err(e) => FetchOutcome::Transient(format!("body read interrupted: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.org/sleep.csv";

    #[test]
    fn test_missing_resources_are_not_found() {
        for status in [StatusCode::NOT_FOUND, StatusCode::GONE] {
            assert_eq!(
                classify_status(status, URL),
                FetchOutcome::NotFound(URL.to_string())
            );
        }
    }

    #[test]
    fn test_server_side_failures_are_transient() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::TOO_MANY_REQUESTS,
        ] {
            assert!(classify_status(status, URL).is_transient(), "{}", status);
        }
    }

    #[test]
    fn test_auth_failures_are_rejected() {
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN, URL),
            FetchOutcome::Rejected {
                status: 403,
                location: URL.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transient() -> anyhow::Result<()> {
        let fetcher = HttpFetcher::new(Duration::from_millis(500))?;
        // Port 9 on loopback: nothing listens there in test environments
        let outcome = fetcher.fetch("http://127.0.0.1:9/sleep.csv").await;
        assert!(outcome.is_transient(), "{:?}", outcome);
        Ok(())
    }
}
