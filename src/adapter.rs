//! Language model adapter backed by the IBM generative AI service.

use std::pin::pin;

use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    core::{
        AdapterConfig, ChunkStream, GenerationAdapterBuilder, GenerationChunk, HttpClientConfig,
        IdentifyingParams, Llm, LlmError, RunManager, enforce_stop_tokens,
    },
    genai::{Credentials, GenerateParams, Model},
};

pub const LLM_TYPE: &str = "IBM GENAI";

/// Wraps a generation model so it can be driven through [`Llm`].
///
/// ```rust,no_run
/// use genai_adapter::{Credentials, GenerateParams, GenerationAdapter};
///
/// # async fn run() -> Result<(), genai_adapter::LlmError> {
/// let llm = GenerationAdapter::builder()
///     .model("google/flan-ul2")
///     .params(GenerateParams::new().max_new_tokens(50))
///     .credentials(Credentials::from_env()?)
///     .build()?;
///
/// let text = llm.complete("What is a molecule?", None, None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GenerationAdapter {
    model: Option<String>,
    params: Option<GenerateParams>,
    credentials: Credentials,
    http_config: HttpClientConfig,
}

impl GenerationAdapter {
    pub fn builder() -> GenerationAdapterBuilder {
        GenerationAdapterBuilder::new()
    }

    /// Build an adapter from a JSON configuration object, rejecting unknown fields.
    pub fn from_config(config: Value) -> Result<Self, LlmError> {
        GenerationAdapterBuilder::from(AdapterConfig::from_value(config)?).build()
    }

    pub(crate) fn from_parts(
        model: Option<String>,
        params: Option<GenerateParams>,
        credentials: Credentials,
        http_config: HttpClientConfig,
    ) -> Self {
        Self {
            model,
            params,
            credentials,
            http_config,
        }
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn params(&self) -> Option<&GenerateParams> {
        self.params.as_ref()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn identifying_params(&self) -> IdentifyingParams {
        IdentifyingParams {
            model: self.model.clone(),
            params: self.params.clone().unwrap_or_default(),
        }
    }

    /// Configured parameters with `stop` swapped in for this call only.
    ///
    /// An empty `stop` keeps the configured stop sequences.
    fn effective_params(&self, stop: Option<&[String]>) -> GenerateParams {
        let mut params = self.params.clone().unwrap_or_default();
        if let Some(stop) = stop.filter(|s| !s.is_empty()) {
            params.stop_sequences = Some(stop.to_vec());
        }
        params
    }

    fn model_handle(&self, params: GenerateParams) -> Result<Model, LlmError> {
        Model::with_http_config(
            self.model.clone(),
            params,
            self.credentials.clone(),
            &self.http_config,
        )
    }

    /// Generate text for `prompt`.
    ///
    /// With streaming enabled the streamed chunks are concatenated and cut at
    /// `stop` if one was passed. Otherwise a single request is made and the
    /// result is cut at the effective stop sequences.
    #[tracing::instrument(
        name = "genai_complete",
        skip(self, prompt, run_manager),
        fields(model = ?self.model),
        err
    )]
    pub async fn complete(
        &self,
        prompt: &str,
        stop: Option<&[String]>,
        run_manager: Option<&dyn RunManager>,
    ) -> Result<String, LlmError> {
        let params = self.effective_params(stop);

        if params.stream_enabled() {
            let mut final_text = String::new();
            let mut chunks = self.stream_complete(prompt, stop, run_manager);
            while let Some(chunk) = chunks.next().await {
                final_text.push_str(&chunk?.text);
            }

            if let Some(stop) = stop {
                final_text = enforce_stop_tokens(&final_text, stop);
            }
            return Ok(final_text);
        }

        let stop_sequences = params.stop_sequences.clone();
        let model = self.model_handle(params)?;
        let text = model
            .generate(&[prompt.to_string()])
            .await?
            .into_iter()
            .next()
            .map(|result| result.generated_text)
            .ok_or_else(|| LlmError::Parse {
                message: "No results in response".to_string(),
                source: "empty results array".into(),
            })?;

        info!(text = %text, "Output of GENAI call");

        Ok(match stop_sequences {
            Some(stop) => enforce_stop_tokens(&text, &stop),
            None => text,
        })
    }

    /// Stream chunks for `prompt` in arrival order.
    ///
    /// Chunks are never truncated here. `run_manager` sees each chunk right
    /// after it was handed to the consumer, before the next one is fetched.
    pub fn stream_complete<'a>(
        &'a self,
        prompt: &'a str,
        stop: Option<&'a [String]>,
        run_manager: Option<&'a dyn RunManager>,
    ) -> ChunkStream<'a> {
        Box::pin(try_stream! {
            let model = self.model_handle(self.effective_params(stop))?;
            let prompts = [prompt.to_string()];
            let mut responses = pin!(model.generate_stream(&prompts));

            while let Some(response) = responses.next().await {
                let response = response?;
                info!(chunk = %response.generated_text, "Chunk received");

                let generation_info = response.to_map()?;
                yield GenerationChunk::new(response.generated_text.clone())
                    .with_generation_info(generation_info);

                if let Some(run_manager) = run_manager {
                    run_manager.on_llm_new_token(&response.generated_text, &response);
                }
            }
        })
    }
}

#[async_trait]
impl Llm for GenerationAdapter {
    fn llm_type(&self) -> &'static str {
        LLM_TYPE
    }

    fn identifying_params(&self) -> Result<Map<String, Value>, LlmError> {
        GenerationAdapter::identifying_params(self).to_map()
    }

    async fn call(
        &self,
        prompt: &str,
        stop: Option<&[String]>,
        run_manager: Option<&dyn RunManager>,
    ) -> Result<String, LlmError> {
        self.complete(prompt, stop, run_manager).await
    }

    fn stream<'a>(
        &'a self,
        prompt: &'a str,
        stop: Option<&'a [String]>,
        run_manager: Option<&'a dyn RunManager>,
    ) -> ChunkStream<'a> {
        self.stream_complete(prompt, stop, run_manager)
    }
}
