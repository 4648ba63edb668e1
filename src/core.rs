pub mod builder;
pub mod error;
pub mod http;
pub mod stop;
pub mod traits;
pub mod types;

pub use builder::{AdapterConfig, GenerationAdapterBuilder};
pub use error::LlmError;
pub use http::{HttpClient, HttpClientConfig};
pub use stop::enforce_stop_tokens;
pub use traits::{Llm, RunManager};
pub use types::{ChunkStream, GenerationChunk, IdentifyingParams};
