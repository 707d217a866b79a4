use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::warn;

use crate::error::{AdvisorError, TransportError};

/// Shared handle on the advisor server.
#[derive(Debug, Clone)]
pub struct Backend {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl Backend {
    /// The timeout, when given, bounds every request made through the
    /// shared client.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, AdvisorError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Turns a non-success status into a transport error, keeping the
    /// server's `{"error": ...}` message when there is one.
    pub async fn check(response: Response) -> Result<Response, AdvisorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        warn!("Backend returned {}: {}", status, message);
        Err(TransportError::Status {
            status: status.as_u16(),
            message,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let backend = Backend::new("http://localhost:5000/", None).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.endpoint("/analyze"), "http://localhost:5000/analyze");
        assert_eq!(
            backend.endpoint("download-report"),
            "http://localhost:5000/download-report"
        );
    }
}
