use crate::types::ErrorBody;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Every way a proxied request can fail. The `Display` text is the exact
/// `error` string sent back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Webhook URL not configured")]
    NotConfigured,

    #[error("Message parameter is required")]
    MissingMessage,

    /// Upstream answered with a non-success status, passed through as-is.
    #[error("Webhook error: {}", .0.as_u16())]
    Upstream(StatusCode),

    /// The call itself failed. The detail is logged, never returned.
    #[error("Failed to connect to webhook")]
    Connect(String),

    /// Success status with a body that is not JSON. Reported like a failed
    /// call; the parse error is logged.
    #[error("Failed to connect to webhook")]
    InvalidJson(#[source] serde_json::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::MissingMessage => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(status) => *status,
            ProxyError::Connect(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::InvalidJson(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Connect(err.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_named_in_message() {
        let err = ProxyError::Upstream(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Webhook error: 404");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn connect_detail_stays_out_of_message() {
        let err = ProxyError::Connect("dns error: no such host".into());
        assert_eq!(err.to_string(), "Failed to connect to webhook");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_json_reads_as_connect_failure() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ProxyError::InvalidJson(source);
        assert_eq!(err.to_string(), "Failed to connect to webhook");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
