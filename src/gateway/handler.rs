use crate::auth::TokenVerifier;
use crate::gateway::dispatch::ActionDispatcher;
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::types::Action;
use axum::http::HeaderMap;
use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

/// Top-level request handler: verify the caller, parse the envelope,
/// dispatch, and hand back the provider payload. Every invocation is
/// independent; the only shared state is the immutable configuration
/// baked into the verifier and dispatcher.
#[derive(Clone)]
pub struct GatewayHandler {
    verifier: TokenVerifier,
    dispatcher: ActionDispatcher,
}

impl GatewayHandler {
    pub fn new(verifier: TokenVerifier, dispatcher: ActionDispatcher) -> Self {
        Self { verifier, dispatcher }
    }

    pub async fn handle(&self, headers: &HeaderMap, body: &Bytes) -> GatewayResult<Value> {
        // Denied requests never reach the parser, so no fetch and no
        // provider call (and no cost) happens for them.
        if !self.verifier.verify_headers(headers) {
            return Err(GatewayError::Denied);
        }

        let action: Action = serde_json::from_slice(body)?;
        debug!("Parsed request envelope");

        self.dispatcher.dispatch(action).await
    }
}
