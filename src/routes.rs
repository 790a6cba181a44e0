use crate::gateway::GatewayHandler;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(
    handler: Arc<GatewayHandler>,
    body_limit: usize,
    request_timeout: Duration,
) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Single gateway endpoint
        .route("/", post(gateway_request_handler))
        // Add the handler as application state
        .with_state(handler)
        // Add middleware layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Handler for the single action endpoint. Success returns the provider's
/// raw payload; any failure is normalized by the error's IntoResponse.
async fn gateway_request_handler(
    State(handler): State<Arc<GatewayHandler>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match handler.handle(&headers, &body).await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(gateway_error) => gateway_error.into_response(),
    }
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenVerifier;
    use crate::config::UpstreamConfig;
    use crate::gateway::{ActionDispatcher, ProviderClient, ResourceFetcher};
    use axum::body::Body;
    use axum::http::Request;
    use secrecy::SecretString;
    use tower::ServiceExt;

    fn create_test_app() -> Router {
        let upstream_config = UpstreamConfig::default();
        let provider = ProviderClient::new(
            &upstream_config,
            SecretString::new("sk-test".to_string()),
        )
        .unwrap();
        let fetcher = ResourceFetcher::new(provider.http_client());
        let dispatcher = ActionDispatcher::new(provider, fetcher);
        let verifier = TokenVerifier::new(SecretString::new("test-secret".to_string()), 0);
        let handler = Arc::new(GatewayHandler::new(verifier, dispatcher));

        create_router(handler, 1024 * 1024, Duration::from_secs(30))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unauthenticated_request_denied() {
        let app = create_test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"action":"completion","params":{}}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let app = create_test_app();

        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
