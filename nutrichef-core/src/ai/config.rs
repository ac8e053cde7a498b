//! AI configuration from environment variables.

use std::env;
use std::time::Duration;
use thiserror::Error;

use super::retry::RetryPolicy;

/// Default OpenAI-compatible base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default per-call timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default backoff before the first retry in milliseconds.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Extraction calls want determinism.
pub const DEFAULT_EXTRACTION_TEMPERATURE: f32 = 0.3;

/// Generation calls want variety.
pub const DEFAULT_GENERATION_TEMPERATURE: f32 = 0.8;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Which provider backs the AI client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Fake,
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: ProviderKind,
    /// API key for the provider. Empty for the fake provider.
    pub api_key: String,
    /// Model name (e.g., "gpt-3.5-turbo", "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Upper bound on a single provider round-trip.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub extraction_temperature: f32,
    pub generation_temperature: f32,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required (openai provider only):
    /// - `OPENAI_API_KEY`
    ///
    /// Optional:
    /// - `NUTRICHEF_AI_PROVIDER`: "openai" or "fake" (default: "openai")
    /// - `NUTRICHEF_AI_MODEL` (default: "gpt-3.5-turbo")
    /// - `NUTRICHEF_AI_BASE_URL` (default: "https://api.openai.com/v1")
    /// - `NUTRICHEF_AI_TIMEOUT_SECS` (default: 60)
    /// - `NUTRICHEF_AI_MAX_ATTEMPTS` (default: 1, no retries)
    /// - `NUTRICHEF_AI_RETRY_BACKOFF_MS` (default: 500)
    /// - `NUTRICHEF_AI_EXTRACTION_TEMPERATURE` (default: 0.3)
    /// - `NUTRICHEF_AI_GENERATION_TEMPERATURE` (default: 0.8)
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match env::var("NUTRICHEF_AI_PROVIDER").as_deref() {
            Err(_) | Ok("openai") => ProviderKind::OpenAi,
            Ok("fake") => ProviderKind::Fake,
            Ok(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "NUTRICHEF_AI_PROVIDER".to_string(),
                    value: other.to_string(),
                })
            }
        };

        let api_key = match provider {
            ProviderKind::OpenAi => env::var("OPENAI_API_KEY")
                .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?,
            ProviderKind::Fake => String::new(),
        };

        let model = env::var("NUTRICHEF_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("NUTRICHEF_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = Duration::from_secs(parse_var(
            "NUTRICHEF_AI_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);

        let max_attempts: u32 = parse_var("NUTRICHEF_AI_MAX_ATTEMPTS", 1)?;
        if max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                name: "NUTRICHEF_AI_MAX_ATTEMPTS".to_string(),
                value: "0".to_string(),
            });
        }
        let backoff_ms = parse_var("NUTRICHEF_AI_RETRY_BACKOFF_MS", DEFAULT_RETRY_BACKOFF_MS)?;

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            timeout,
            retry: RetryPolicy::new(max_attempts, Duration::from_millis(backoff_ms)),
            extraction_temperature: parse_var(
                "NUTRICHEF_AI_EXTRACTION_TEMPERATURE",
                DEFAULT_EXTRACTION_TEMPERATURE,
            )?,
            generation_temperature: parse_var(
                "NUTRICHEF_AI_GENERATION_TEMPERATURE",
                DEFAULT_GENERATION_TEMPERATURE,
            )?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
