//! Webhook proxy
//!
//! A single stateless route that forwards `message` to the configured webhook
//! and relays the reply, so the webhook URL never reaches the client.
mod error;
mod handler;

pub use error::ProxyError;
pub use handler::{TRIGGERED_TEXT, webhook};

use crate::config::{ProxyConfig, WEBHOOK_ROUTE, WEBHOOK_URL_VAR};
use anyhow::Result;
use axum::Router;
use axum::http::Method;
use axum::routing::any;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct ProxyState {
    pub webhook_url: Option<String>,
    pub http: reqwest::Client,
}

impl ProxyState {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url,
            http: reqwest::Client::new(),
        }
    }
}

impl From<&ProxyConfig> for ProxyState {
    fn from(config: &ProxyConfig) -> Self {
        Self::new(config.webhook_url.clone())
    }
}

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route(WEBHOOK_ROUTE, any(webhook))
        .with_state(state)
}

/// Allow cross-origin `GET` for clients served from another origin. Every
/// `OPTIONS` request is then answered as a preflight instead of a 405.
pub fn with_cors(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);
    router.layer(cors)
}

/// Serve on an already bound listener until the process receives ctrl-c.
pub async fn serve_on(listener: TcpListener, router: Router) -> Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

pub async fn serve(config: &ProxyConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        route = WEBHOOK_ROUTE,
        configured = config.webhook_url.is_some(),
        cors = config.allow_cors,
        "webhook proxy listening"
    );
    if config.webhook_url.is_none() {
        tracing::warn!("{WEBHOOK_URL_VAR} is not set; requests will fail until it is");
    }

    let mut app = router(ProxyState::from(config));
    if config.allow_cors {
        app = with_cors(app);
    }
    serve_on(listener, app).await
}
