use crate::config::ClientConfig;
use async_trait::async_trait;
use rand::Rng;
use rand::seq::IndexedRandom;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Carries one message to the proxy and returns the raw reply body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, TransportError>;
}

// ============================================
// Proxy endpoint over HTTP
// ============================================

pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, message: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("message", message)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

// ============================================
// Offline demo
// ============================================

pub const DEMO_REPLIES: [&str; 10] = [
    "The Matrix has you... Follow the white rabbit.",
    "Wake up, Neo... The Matrix has you.",
    "Unfortunately, no one can be told what the Matrix is. You have to see it for yourself.",
    "I know kung fu.",
    "There is no spoon.",
    "Free your mind.",
    "Welcome to the real world.",
    "The body cannot live without the mind.",
    "I'm trying to free your mind, Neo. But I can only show you the door. You're the one that has to walk through it.",
    "What is real? How do you define 'real'?",
];

/// Answers without a network, after a short random pause, in the same
/// shape a webhook would.
pub struct DemoTransport {
    min_delay: Duration,
    jitter: Duration,
}

impl Default for DemoTransport {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(500),
            jitter: Duration::from_millis(1000),
        }
    }
}

impl DemoTransport {
    pub fn with_delay(min_delay: Duration, jitter: Duration) -> Self {
        Self { min_delay, jitter }
    }

    fn pick(&self) -> (Duration, &'static str) {
        let mut rng = rand::rng();
        let jitter_ms = self.jitter.as_millis() as u64;
        let extra = if jitter_ms == 0 {
            0
        } else {
            rng.random_range(0..jitter_ms)
        };
        let reply = DEMO_REPLIES.choose(&mut rng).copied().unwrap_or(DEMO_REPLIES[0]);
        (self.min_delay + Duration::from_millis(extra), reply)
    }
}

#[async_trait]
impl Transport for DemoTransport {
    async fn send(&self, _message: &str) -> Result<String, TransportError> {
        let (delay, reply) = self.pick();
        tokio::time::sleep(delay).await;
        Ok(serde_json::json!({ "text": reply }).to_string())
    }
}

/// Pick the transport the configuration asks for.
pub fn from_config(config: &ClientConfig) -> Box<dyn Transport> {
    if config.demo_mode {
        tracing::info!("demo mode: replies are simulated locally");
        Box::new(DemoTransport::default())
    } else {
        tracing::info!(endpoint = %config.api_endpoint, "using webhook proxy");
        Box::new(HttpTransport::new(config.api_endpoint.clone()))
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, message: &str) -> Result<String, TransportError> {
        (**self).send(message).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, message: &str) -> Result<String, TransportError> {
        (**self).send(message).await
    }
}
