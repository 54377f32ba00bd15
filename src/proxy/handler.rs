use super::{ProxyError, ProxyState};
use crate::types::ProxyRequest;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

/// Body substituted when the webhook succeeds without saying anything.
pub const TRIGGERED_TEXT: &str = "Webhook triggered successfully";

/// `GET /api/webhook?message=...`
///
/// Checks run in a fixed order: verb, destination, message. Nothing touches
/// the network until all three pass.
pub async fn webhook(
    method: Method,
    State(state): State<ProxyState>,
    Query(request): Query<ProxyRequest>,
) -> Result<Json<Value>, ProxyError> {
    if method != Method::GET {
        return Err(ProxyError::MethodNotAllowed);
    }

    let Some(webhook_url) = state.webhook_url.as_deref() else {
        tracing::error!("webhook request rejected: destination URL is not configured");
        return Err(ProxyError::NotConfigured);
    };

    let message = match request.message.as_deref() {
        Some(message) if !message.is_empty() => message,
        _ => return Err(ProxyError::MissingMessage),
    };

    match forward(&state, webhook_url, message).await {
        Ok(payload) => Ok(Json(payload)),
        Err(err) => {
            match &err {
                ProxyError::Upstream(status) => {
                    tracing::warn!(status = status.as_u16(), "webhook answered with an error status");
                }
                ProxyError::Connect(detail) => {
                    tracing::error!(error = %detail, "webhook proxy error");
                }
                ProxyError::InvalidJson(source) => {
                    tracing::error!(error = %source, "webhook returned a body that is not JSON");
                }
                _ => {}
            }
            Err(err)
        }
    }
}

/// One upstream round trip: no timeout, no retry.
async fn forward(state: &ProxyState, webhook_url: &str, message: &str) -> Result<Value, ProxyError> {
    let url = reqwest::Url::parse(webhook_url)
        .map_err(|err| ProxyError::Connect(format!("invalid webhook URL: {err}")))?;

    tracing::info!(host = url.host_str().unwrap_or_default(), "forwarding message to webhook");
    let response = state
        .http
        .get(url)
        .query(&[("message", message)])
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let status =
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        return Err(ProxyError::Upstream(status));
    }

    if text.is_empty() {
        return Ok(json!({ "text": TRIGGERED_TEXT }));
    }

    serde_json::from_str(&text).map_err(ProxyError::InvalidJson)
}
