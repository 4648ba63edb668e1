//! Client for the IBM generative AI text generation service.
//!
//! Only the two calls the adapter needs are covered: a batch generate and a
//! streaming generate over server-sent events.

pub(crate) mod client;
pub(crate) mod constants;
pub(crate) mod credentials;
pub(crate) mod request;
pub(crate) mod response;

pub use client::Model;
pub use credentials::Credentials;
pub use request::{DecodingMethod, GenerateParams, LengthPenalty, ReturnOptions};
pub use response::{GenerateResponse, GenerateResult};
