use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::LlmError;

/// Response body of a generate call, and of each streamed event.
///
/// A streamed event that reports a failure carries `error`/`message`
/// instead of `results`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub id: Option<String>,
    pub model_id: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub results: Vec<GenerateResult>,
    pub status_code: Option<u16>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl GenerateResponse {
    /// Turn an error payload into an [`LlmError::Api`].
    pub(crate) fn into_results(self) -> Result<Vec<GenerateResult>, LlmError> {
        if !self.results.is_empty() || (self.error.is_none() && self.message.is_none()) {
            return Ok(self.results);
        }

        let message = match (self.error, self.message) {
            (Some(error), Some(message)) => format!("{error}: {message}"),
            (Some(error), None) => error,
            (None, Some(message)) => message,
            (None, None) => "Unknown error".to_string(),
        };

        Err(LlmError::Api {
            message,
            status_code: self.status_code,
            source: None,
        })
    }
}

/// A single generated result. Fields the service adds beyond the known ones
/// are kept in `extra` so the full unit can be reported back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResult {
    #[serde(default)]
    pub generated_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_token_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_token_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerateResult {
    pub fn new(generated_text: impl Into<String>) -> Self {
        Self {
            generated_text: generated_text.into(),
            generated_token_count: None,
            input_token_count: None,
            stop_reason: None,
            seed: None,
            input_text: None,
            extra: Map::new(),
        }
    }

    /// Every field of the result as a JSON object.
    pub fn to_map(&self) -> Result<Map<String, Value>, LlmError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(LlmError::Parse {
                message: format!("Generation result serialized to non-object: {other}"),
                source: "expected a JSON object".into(),
            }),
            Err(e) => Err(LlmError::Parse {
                message: "Failed to serialize generation result".to_string(),
                source: Box::new(e),
            }),
        }
    }
}
