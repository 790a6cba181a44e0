use crate::config::UpstreamConfig;
use crate::gateway::error::{GatewayError, GatewayResult};
use reqwest::multipart::Form;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;

/// Client for the OpenAI API. One attempt per call; the host environment
/// owns retry policy, which for this gateway is none.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl ProviderClient {
    pub fn new(config: &UpstreamConfig, api_key: SecretString) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| GatewayError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// HTTP client shared with the resource fetcher, so both outbound legs
    /// carry the same timeouts.
    pub fn http_client(&self) -> Client {
        self.client.clone()
    }

    pub async fn create_completion(&self, params: Value) -> GatewayResult<Value> {
        self.post_json("/completions", params).await
    }

    pub async fn create_chat_completion(&self, params: Value) -> GatewayResult<Value> {
        self.post_json("/chat/completions", params).await
    }

    pub async fn create_edit(&self, params: Value) -> GatewayResult<Value> {
        self.post_json("/edits", params).await
    }

    pub async fn create_image(&self, params: Value) -> GatewayResult<Value> {
        self.post_json("/images/generations", params).await
    }

    pub async fn create_image_edit(&self, form: Form) -> GatewayResult<Value> {
        self.post_multipart("/images/edits", form).await
    }

    pub async fn create_image_variation(&self, form: Form) -> GatewayResult<Value> {
        self.post_multipart("/images/variations", form).await
    }

    async fn post_json(&self, path: &str, params: Value) -> GatewayResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Provider request: POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&params)
            .send()
            .await?;

        Self::read_json_response(response).await
    }

    async fn post_multipart(&self, path: &str, form: Form) -> GatewayResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Provider request: POST {} (multipart)", url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .multipart(form)
            .send()
            .await?;

        Self::read_json_response(response).await
    }

    /// Non-2xx provider responses are errors, matching the upstream SDK
    /// which throws rather than returning the error payload.
    async fn read_json_response(response: reqwest::Response) -> GatewayResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
