//! # genai-adapter
//!
//! Drive IBM generative AI text generation through a language model interface
//! that orchestration pipelines can call without knowing about the service.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use genai_adapter::{Credentials, GenerateParams, GenerationAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let llm = GenerationAdapter::builder()
//!         .model("google/flan-ul2")
//!         .params(GenerateParams::new().max_new_tokens(100).stream(true))
//!         .credentials(Credentials::from_env()?)
//!         .build()?;
//!
//!     let stop = vec!["\n\n".to_string()];
//!     let answer = llm.complete("What is a molecule?", Some(stop.as_slice()), None).await?;
//!     println!("{answer}");
//!
//!     let mut chunks = llm.stream_complete("Tell me a story.", None, None);
//!     while let Some(chunk) = chunks.next().await {
//!         print!("{}", chunk?.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! `complete` only cuts the text at stop sequences after streaming finished;
//! chunks from `stream_complete` are always passed through as received.

pub mod adapter;
pub mod core;
pub mod genai;

pub use adapter::GenerationAdapter;
pub use crate::core::{
    AdapterConfig, ChunkStream, GenerationAdapterBuilder, GenerationChunk, HttpClientConfig,
    IdentifyingParams, Llm, LlmError, RunManager, enforce_stop_tokens,
};
pub use genai::{Credentials, GenerateParams, GenerateResult, Model};
