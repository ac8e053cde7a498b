//! Server configuration from environment variables.

use anyhow::Context;
use std::env;
use std::net::SocketAddr;

use nutrichef_core::ai::AiConfig;
use nutrichef_core::shopping::DEFAULT_SEARCH_URL;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5050";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Base of the shopping search links, e.g. "https://www.amazon.com/s".
    pub shopping_search_url: String,
    pub ai: AiConfig,
}

impl ServerConfig {
    /// Read every setting the server needs.
    ///
    /// - `DATABASE_URL` (required)
    /// - `NUTRICHEF_BIND_ADDR` (default: "0.0.0.0:5050")
    /// - `NUTRICHEF_SHOPPING_SEARCH_URL` (default: "https://www.amazon.com/s")
    /// - the AI variables read by [`AiConfig::from_env`]
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = env::var("NUTRICHEF_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("Invalid NUTRICHEF_BIND_ADDR: {}", bind_addr))?;

        let shopping_search_url = env::var("NUTRICHEF_SHOPPING_SEARCH_URL")
            .unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string());
        url::Url::parse(&shopping_search_url).with_context(|| {
            format!(
                "Invalid NUTRICHEF_SHOPPING_SEARCH_URL: {}",
                shopping_search_url
            )
        })?;

        let ai = AiConfig::from_env().context("Invalid AI configuration")?;

        Ok(Self {
            database_url,
            bind_addr,
            shopping_search_url,
            ai,
        })
    }
}
