//! Environment-driven configuration for the proxy and the chat client.
//!
//! Both binaries call [`load_dotenv`] first so a local `.env` file can supply
//! the same variables as the process environment.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

/// Destination webhook the proxy forwards to.
pub const WEBHOOK_URL_VAR: &str = "N8N_WEBHOOK_URL";
/// Address the proxy listens on.
pub const PROXY_ADDR_VAR: &str = "MATRIX_PROXY_ADDR";
/// Enables cross-origin `GET` on the proxy.
pub const PROXY_CORS_VAR: &str = "MATRIX_PROXY_CORS";
/// Proxy endpoint the chat client calls.
pub const API_ENDPOINT_VAR: &str = "MATRIX_API_ENDPOINT";
/// Switches the chat client to the offline demo transport.
pub const DEMO_MODE_VAR: &str = "MATRIX_DEMO_MODE";

pub const DEFAULT_PROXY_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_API_ENDPOINT: &str = "http://127.0.0.1:3000/api/webhook";

/// Route the proxy serves.
pub const WEBHOOK_ROUTE: &str = "/api/webhook";

/// Load a `.env` file if one is present. Missing files are not an error.
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        tracing::warn!(error = %err, "failed to read .env file");
    }
}

// ============================================
// Proxy
// ============================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyConfig {
    /// `None` is allowed at startup; requests fail until it is set.
    pub webhook_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub allow_cors: bool,
}

impl ProxyConfig {
    pub fn new(webhook_url: Option<String>, bind_addr: SocketAddr) -> Self {
        Self {
            webhook_url: webhook_url.filter(|url| !url.trim().is_empty()),
            bind_addr,
            allow_cors: false,
        }
    }

    pub fn from_env() -> Result<Self> {
        let webhook_url = env::var(WEBHOOK_URL_VAR).ok();
        let raw_addr = env::var(PROXY_ADDR_VAR).unwrap_or_else(|_| DEFAULT_PROXY_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("{PROXY_ADDR_VAR} is not a socket address: {raw_addr}"))?;
        let allow_cors = env::var(PROXY_CORS_VAR)
            .map(|value| parse_flag(&value))
            .unwrap_or(false);
        Ok(Self {
            allow_cors,
            ..Self::new(webhook_url, bind_addr)
        })
    }
}

// ============================================
// Client
// ============================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_endpoint: String,
    pub demo_mode: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            demo_mode: false,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_endpoint =
            env::var(API_ENDPOINT_VAR).unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string());
        let demo_mode = env::var(DEMO_MODE_VAR)
            .map(|value| parse_flag(&value))
            .unwrap_or(false);
        Self {
            api_endpoint,
            demo_mode,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
