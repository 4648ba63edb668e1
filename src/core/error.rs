use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM-Builder error: {0}")]
    Builder(String),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: BoxedSource,
    },

    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: BoxedSource,
    },
}

impl LlmError {
    /// HTTP status code reported by the service, if the error came from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }
}
