use crate::types::MessageBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Permission denied")]
    Denied,

    #[error("Invalid request envelope: {source}")]
    InvalidEnvelope {
        #[from]
        source: serde_json::Error,
    },

    #[error("Failed to fetch remote resource '{url}': {reason}")]
    Fetch { url: String, reason: String },

    #[error("Upstream request failed: {source}")]
    UpstreamFailed {
        #[from]
        source: reqwest::Error,
    },

    #[error("Upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GatewayError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Everything except an auth denial collapses to 500. Callers never
    /// learn whether the envelope, the fetch, or the provider failed; that
    /// detail stays in the logs.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Denied => StatusCode::FORBIDDEN,
            GatewayError::InvalidEnvelope { .. }
            | GatewayError::Fetch { .. }
            | GatewayError::UpstreamFailed { .. }
            | GatewayError::UpstreamStatus { .. }
            | GatewayError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            GatewayError::Denied => MessageBody::no_permission(),
            _ => MessageBody::internal_server_error(),
        };

        tracing::error!("Gateway error: {} (status: {})", self, status);

        (status, Json(body)).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
