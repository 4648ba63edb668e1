use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{error::LlmError, types::ChunkStream};
use crate::genai::GenerateResult;

/// Capability surface an orchestration pipeline expects from a language model.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Short name of the model family, used in logs and cache keys.
    fn llm_type(&self) -> &'static str;

    fn identifying_params(&self) -> Result<Map<String, Value>, LlmError>;

    /// Generate text for `prompt`, optionally cut at the given stop sequences.
    async fn call(
        &self,
        prompt: &str,
        stop: Option<&[String]>,
        run_manager: Option<&dyn RunManager>,
    ) -> Result<String, LlmError>;

    /// Stream generated chunks for `prompt` as they arrive.
    fn stream<'a>(
        &'a self,
        prompt: &'a str,
        stop: Option<&'a [String]>,
        run_manager: Option<&'a dyn RunManager>,
    ) -> ChunkStream<'a>;
}

/// Per-run callbacks notified while a generation is in flight.
pub trait RunManager: Send + Sync {
    fn on_llm_new_token(&self, token: &str, response: &GenerateResult);
}

impl<F> RunManager for F
where
    F: Fn(&str, &GenerateResult) + Send + Sync,
{
    fn on_llm_new_token(&self, token: &str, response: &GenerateResult) {
        self(token, response)
    }
}
