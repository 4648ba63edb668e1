//! Thin HTTP layer shared by the generation client.
//!
//! Every request is attempted exactly once. Failures are mapped to
//! [`LlmError`] and handed back to the caller untouched.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::LlmError;

/// Transport settings for a single client handle.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Longest gap allowed between reads. Batch requests also use it as their
    /// total limit; streams may run longer as long as data keeps arriving.
    pub timeout: Duration,
    /// Upper bound for establishing the connection
    pub connect_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl HttpClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

pub struct HttpClient {
    client: reqwest::Client,
    request_timeout: Duration,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig, user_agent: Option<&str>) -> Result<Self, LlmError> {
        let default_ua = format!("genai-adapter/{}", env!("CARGO_PKG_VERSION"));
        let ua = user_agent.unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .read_timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| {
                LlmError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self {
            client,
            request_timeout: config.timeout,
        })
    }

    /// POST a JSON body and deserialize the JSON response.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let res = self
            .send(url, headers, body, "application/json", Some(self.request_timeout))
            .await?;

        let response_text = res.text().await.map_err(|e| LlmError::Network {
            message: "Failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        serde_json::from_str(&response_text).map_err(|e| LlmError::Parse {
            message: "Failed to parse API response".to_string(),
            source: Box::new(e),
        })
    }

    /// POST a JSON body and return the open response of a server-sent event stream.
    ///
    /// The connection stays open until the returned response (or the stream
    /// built from it) is dropped.
    #[tracing::instrument(
        name = "http_post_stream",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_stream<Req>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<reqwest::Response, LlmError>
    where
        Req: Serialize + ?Sized,
    {
        self.send(url, headers, body, "text/event-stream", None).await
    }

    async fn send<Req>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
        accept: &str,
        total_timeout: Option<Duration>,
    ) -> Result<reqwest::Response, LlmError>
    where
        Req: Serialize + ?Sized,
    {
        let mut req_builder = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, accept)
            .json(body);

        if let Some(timeout) = total_timeout {
            req_builder = req_builder.timeout(timeout);
        }

        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| LlmError::Network {
            message: "Request failed".to_string(),
            source: Box::new(e),
        })?;

        let status = res.status();
        if status.is_success() {
            debug!(status = %status, "HTTP request successful");
            return Ok(res);
        }

        warn!(status = %status, "API returned error status");
        let error_text = res
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(LlmError::Api {
            message: format!("API error ({status}): {error_text}"),
            status_code: Some(status.as_u16()),
            source: None,
        })
    }
}
