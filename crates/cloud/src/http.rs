//! HTTP client wrapper for GeoJSON and tile-server requests.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CloudError, Result};

/// Configuration for [`HttpClient`].
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Per-request timeout. `None` waits as long as the server does.
    pub request_timeout: Option<Duration>,
}

impl HttpOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// Async HTTP client. Requests are sent once, without retries.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    request_timeout: Option<Duration>,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(options: HttpOptions) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("geoleaf/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            request_timeout: options.request_timeout,
        })
    }

    /// GET `url` and return the body as text.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let resp = self.get(url).await?;
        Ok(resp.text().await?)
    }

    /// GET `url` and decode the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.get(url).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        debug!(url, "GET");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CloudError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    /// Getter for the timeout duration.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_optional() {
        let client = HttpClient::new(HttpOptions::default()).unwrap();
        assert_eq!(client.request_timeout(), None);
        let client =
            HttpClient::new(HttpOptions::default().with_timeout(Duration::from_secs(5))).unwrap();
        assert_eq!(client.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn refused_connection_is_http_error() {
        let client =
            HttpClient::new(HttpOptions::default().with_timeout(Duration::from_secs(5))).unwrap();
        // Port 9 (discard) is closed on test machines.
        let err = client.get_text("http://127.0.0.1:9/a.geojson").await.unwrap_err();
        assert!(matches!(err, CloudError::Http(_)));
    }
}
