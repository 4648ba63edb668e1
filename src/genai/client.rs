//! Client handle for the generation service's generate endpoint.

use async_stream::try_stream;
use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};

use super::{
    Credentials, GenerateParams, GenerateResult, constants,
    request::Request,
    response::GenerateResponse,
};
use crate::core::{HttpClient, HttpClientConfig, LlmError};

/// A model bound to one parameter set and one set of credentials.
///
/// Handles are cheap to build and are meant to live for a single call.
pub struct Model {
    model: Option<String>,
    params: GenerateParams,
    credentials: Credentials,
    http: HttpClient,
}

impl Model {
    pub fn new(
        model: Option<String>,
        params: GenerateParams,
        credentials: Credentials,
    ) -> Result<Self, LlmError> {
        Self::with_http_config(model, params, credentials, &HttpClientConfig::default())
    }

    pub fn with_http_config(
        model: Option<String>,
        params: GenerateParams,
        credentials: Credentials,
        http_config: &HttpClientConfig,
    ) -> Result<Self, LlmError> {
        let http = HttpClient::new(http_config, None)?;

        Ok(Self {
            model,
            params,
            credentials,
            http,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}{}",
            self.credentials.api_endpoint(),
            constants::GENERATE_ENDPOINT
        )
    }

    fn request<'a>(&'a self, prompts: &'a [String], stream: bool) -> Request<'a> {
        let mut parameters = self.params.clone();
        parameters.stream = stream.then_some(true);

        Request {
            model_id: self.model.as_deref(),
            inputs: prompts,
            parameters,
        }
    }

    /// Generate one result per prompt in a single request.
    #[tracing::instrument(
        name = "genai_generate",
        skip(self, prompts),
        fields(model = ?self.model, prompts = prompts.len()),
        err
    )]
    pub async fn generate(&self, prompts: &[String]) -> Result<Vec<GenerateResult>, LlmError> {
        let request = self.request(prompts, false);
        let headers = [self.credentials.auth_header()];

        let response: GenerateResponse = self.http.post_json(&self.url(), &headers, &request).await?;
        response.into_results()
    }

    /// Stream results as the service produces them.
    ///
    /// Nothing is sent until the stream is first polled. Dropping the stream
    /// closes the underlying connection.
    pub fn generate_stream<'a>(
        &'a self,
        prompts: &'a [String],
    ) -> impl Stream<Item = Result<GenerateResult, LlmError>> + Send + 'a {
        try_stream! {
            let request = self.request(prompts, true);
            let headers = [self.credentials.auth_header()];

            let response = self.http.post_stream(&self.url(), &headers, &request).await?;
            let mut events = response.bytes_stream().eventsource();

            while let Some(event) = events.next().await {
                let event = event.map_err(|e| LlmError::Network {
                    message: "Failed to read event stream".to_string(),
                    source: Box::new(e),
                })?;

                let data = event.data.trim();
                if data.is_empty() || data == "[DONE]" {
                    continue;
                }

                let parsed: GenerateResponse =
                    serde_json::from_str(data).map_err(|e| LlmError::Parse {
                        message: "Failed to parse stream event".to_string(),
                        source: Box::new(e),
                    })?;

                for result in parsed.into_results()? {
                    yield result;
                }
            }
        }
    }
}
