use std::pin::Pin;

use futures::Stream;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::error::LlmError;
use crate::genai::GenerateParams;

/// One incremental unit of generated text.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationChunk {
    pub text: String,
    /// Every field of the response unit the chunk was built from.
    pub generation_info: Map<String, Value>,
}

impl GenerationChunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            generation_info: Map::new(),
        }
    }

    pub fn with_generation_info(mut self, info: Map<String, Value>) -> Self {
        self.generation_info = info;
        self
    }
}

pub type ChunkStream<'a> = Pin<Box<dyn Stream<Item = Result<GenerationChunk, LlmError>> + Send + 'a>>;

/// Parameters that identify an adapter for caching and logging keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifyingParams {
    pub model: Option<String>,
    pub params: GenerateParams,
}

impl IdentifyingParams {
    pub fn to_map(&self) -> Result<Map<String, Value>, LlmError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(LlmError::Parse {
                message: format!("Identifying params serialized to non-object: {other}"),
                source: "expected a JSON object".into(),
            }),
            Err(e) => Err(LlmError::Parse {
                message: "Failed to serialize identifying params".to_string(),
                source: Box::new(e),
            }),
        }
    }
}
