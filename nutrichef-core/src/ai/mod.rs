//! AI client module for LLM text completion.
//!
//! This module provides:
//! - `AiClient` trait for abstracting AI providers
//! - `OpenAiClient` for OpenAI-compatible chat completion endpoints
//! - `RetryingClient`, a configurable retry wrapper (single attempt by default)
//! - `FakeAiClient` with scripted replies for tests and offline runs
//! - Prompt templates for constraint extraction and recipe generation
//!
//! # Configuration
//!
//! See [`AiConfig::from_env`] for the environment variables that are read.
//!
//! # Example
//!
//! ```ignore
//! use nutrichef_core::ai::{create_client, AiConfig, ChatMessage, ChatRequest};
//!
//! let config = AiConfig::from_env()?;
//! let client = create_client(&config);
//!
//! let request = ChatRequest {
//!     messages: vec![ChatMessage::user("Hello!")],
//!     ..Default::default()
//! };
//!
//! let response = client.complete("test", request).await?;
//! println!("Response: {}", response.content);
//! ```

mod client;
mod config;
mod fake;
pub mod prompts;
mod retry;
mod types;

pub use client::{AiClient, AiError, OpenAiClient};
pub use config::{
    AiConfig, ConfigError, ProviderKind, DEFAULT_EXTRACTION_TEMPERATURE,
    DEFAULT_GENERATION_TEMPERATURE,
};
pub use fake::{CallLog, FakeAiClient, RecordedCall};
pub use retry::{RetryPolicy, RetryingClient};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};

/// Build the client described by `config`.
///
/// The fake provider serves canned recipe replies. A retry wrapper is only
/// added when the policy allows more than one attempt.
pub fn create_client(config: &AiConfig) -> Box<dyn AiClient> {
    let inner: Box<dyn AiClient> = match config.provider {
        ProviderKind::OpenAi => Box::new(OpenAiClient::new(config)),
        ProviderKind::Fake => Box::new(FakeAiClient::with_recipe_responses()),
    };

    if config.retry.max_attempts > 1 {
        Box::new(RetryingClient::new(inner, config.retry))
    } else {
        inner
    }
}
