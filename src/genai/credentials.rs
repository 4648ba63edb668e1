use std::env;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::constants;
use crate::core::LlmError;

/// API key and endpoint of the generation service.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    api_key: SecretString,
    #[serde(default = "default_endpoint")]
    api_endpoint: String,
}

fn default_endpoint() -> String {
    constants::API_BASE.to_string()
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_endpoint: Option<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            api_endpoint: api_endpoint.unwrap_or_else(default_endpoint),
        }
    }

    /// Read `GENAI_KEY` and, if set, `GENAI_API` from the environment.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = env::var(constants::API_KEY_ENV_VAR).map_err(|_| {
            LlmError::ProviderConfiguration(format!("{} not set.", constants::API_KEY_ENV_VAR))
        })?;
        let api_endpoint = env::var(constants::API_ENDPOINT_ENV_VAR).ok();

        Ok(Self::new(api_key, api_endpoint))
    }

    pub fn api_endpoint(&self) -> &str {
        self.api_endpoint.trim_end_matches('/')
    }

    pub(crate) fn auth_header(&self) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key.expose_secret()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_api_key() {
        let creds = Credentials::new("super-secret-key", None);
        let debug = format!("{creds:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains(constants::API_BASE));
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let creds = Credentials::new("key", Some("http://localhost:8080/v1/".to_string()));
        assert_eq!(creds.api_endpoint(), "http://localhost:8080/v1");
    }

    #[test]
    fn auth_header_uses_bearer_scheme() {
        let creds = Credentials::new("abc", None);
        let (name, value) = creds.auth_header();
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer abc");
    }

    #[test]
    fn deserializes_with_default_endpoint() {
        let creds: Credentials = serde_json::from_value(serde_json::json!({
            "api_key": "abc"
        }))
        .unwrap();
        assert_eq!(creds.api_endpoint(), constants::API_BASE);
    }
}
