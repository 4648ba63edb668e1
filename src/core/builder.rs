use serde::Deserialize;
use serde_json::Value;

use super::{error::LlmError, http::HttpClientConfig};
use crate::{
    adapter::GenerationAdapter,
    genai::{Credentials, GenerateParams},
};

/// Declarative adapter configuration, e.g. loaded from a JSON or TOML file.
///
/// Any field not listed here is rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterConfig {
    pub credentials: Credentials,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub params: Option<GenerateParams>,
}

impl AdapterConfig {
    pub fn from_value(value: Value) -> Result<Self, LlmError> {
        serde_json::from_value(value).map_err(|e| LlmError::Validation(e.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct GenerationAdapterBuilder {
    model: Option<String>,
    params: Option<GenerateParams>,
    credentials: Option<Credentials>,
    http_config: HttpClientConfig,
}

impl GenerationAdapterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model_id: impl Into<String>) -> Self {
        self.model = Some(model_id.into());
        self
    }

    pub fn params(mut self, params: GenerateParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Set a configuration field by name.
    ///
    /// Only `model`, `params` and `credentials` are recognized.
    pub fn option(mut self, key: &str, value: Value) -> Result<Self, LlmError> {
        let invalid = |e: serde_json::Error| LlmError::Validation(format!("{key}: {e}"));

        match key {
            "model" => self.model = serde_json::from_value(value).map_err(invalid)?,
            "params" => self.params = serde_json::from_value(value).map_err(invalid)?,
            "credentials" => {
                self.credentials = Some(serde_json::from_value(value).map_err(invalid)?)
            }
            other => {
                return Err(LlmError::Validation(format!(
                    "unknown field `{other}`, expected one of `model`, `params`, `credentials`"
                )));
            }
        }

        Ok(self)
    }

    pub fn build(self) -> Result<GenerationAdapter, LlmError> {
        let credentials = self.credentials.ok_or(LlmError::Builder(
            "Missing credentials. Make sure to provide credentials.".to_string(),
        ))?;

        if self.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(LlmError::Builder(
                "Empty model id. Leave the model unset to use the service default.".to_string(),
            ));
        }

        Ok(GenerationAdapter::from_parts(
            self.model,
            self.params,
            credentials,
            self.http_config,
        ))
    }
}

impl From<AdapterConfig> for GenerationAdapterBuilder {
    fn from(config: AdapterConfig) -> Self {
        Self {
            model: config.model,
            params: config.params,
            credentials: Some(config.credentials),
            http_config: HttpClientConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_rejects_unknown_field() {
        let err = AdapterConfig::from_value(json!({
            "credentials": { "api_key": "k" },
            "model": "google/flan-ul2",
            "temperature": 0.3
        }))
        .unwrap_err();

        match err {
            LlmError::Validation(message) => assert!(message.contains("temperature")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn config_rejects_unknown_param() {
        let err = AdapterConfig::from_value(json!({
            "credentials": { "api_key": "k" },
            "params": { "max_new_tokens": 10, "frequency_penalty": 1.0 }
        }))
        .unwrap_err();

        assert!(matches!(err, LlmError::Validation(_)));
    }

    #[test]
    fn config_accepts_known_fields() {
        let config = AdapterConfig::from_value(json!({
            "credentials": { "api_key": "k", "api_endpoint": "http://localhost/v1" },
            "model": "google/flan-ul2",
            "params": { "max_new_tokens": 10, "stream": true }
        }))
        .unwrap();

        assert_eq!(config.model.as_deref(), Some("google/flan-ul2"));
        assert!(config.params.unwrap().stream_enabled());
    }

    #[test]
    fn option_rejects_unknown_key() {
        let err = GenerationAdapterBuilder::new()
            .option("max_retries", json!(3))
            .unwrap_err();

        match err {
            LlmError::Validation(message) => assert!(message.contains("max_retries")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn option_sets_known_keys() {
        let adapter = GenerationAdapterBuilder::new()
            .option("model", json!("google/flan-t5-xxl"))
            .unwrap()
            .option("params", json!({ "max_new_tokens": 5 }))
            .unwrap()
            .option("credentials", json!({ "api_key": "k" }))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(adapter.model(), Some("google/flan-t5-xxl"));
        assert_eq!(adapter.params().unwrap().max_new_tokens, Some(5));
    }

    #[test]
    fn build_requires_credentials() {
        let err = GenerationAdapterBuilder::new()
            .model("google/flan-ul2")
            .build()
            .unwrap_err();
        assert!(matches!(err, LlmError::Builder(_)));
    }

    #[test]
    fn build_rejects_blank_model() {
        let err = GenerationAdapterBuilder::new()
            .model("  ")
            .credentials(Credentials::new("k", None))
            .build()
            .unwrap_err();
        assert!(matches!(err, LlmError::Builder(_)));
    }
}
