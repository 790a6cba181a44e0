use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_request_body_limit")]
    pub request_body_limit_bytes: usize,
    #[serde(default = "default_graceful_shutdown_seconds")]
    pub graceful_shutdown_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Clock-skew tolerance applied when validating token expiry.
    #[serde(default = "default_token_leeway")]
    pub token_leeway_seconds: u64,
}

/// Process-wide secrets, sourced from the environment at startup and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: SecretString,
    pub auth_secret: SecretString,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            request_body_limit_bytes: default_request_body_limit(),
            graceful_shutdown_seconds: default_graceful_shutdown_seconds(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_leeway_seconds: default_token_leeway(),
        }
    }
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}
fn default_request_body_limit() -> usize {
    262_144
}
fn default_graceful_shutdown_seconds() -> u64 {
    10
}
fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_connect_timeout() -> u64 {
    800
}
fn default_request_timeout() -> u64 {
    60_000
}
fn default_token_leeway() -> u64 {
    0
}

pub fn load_config(path: Option<&str>) -> Result<Config> {
    // An explicitly requested file must be readable; the default location
    // is optional and falls back to defaults when absent.
    let config = match path {
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            toml::from_str(&config_str).with_context(|| format!("Failed to parse {}", path))?
        }
        None => match std::fs::read_to_string("config.toml") {
            Ok(config_str) => {
                toml::from_str(&config_str).context("Failed to parse config.toml")?
            }
            Err(_) => Config::default(),
        },
    };

    Ok(config)
}

pub fn load_credentials() -> Result<Credentials> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .context("OPENAI_API_KEY environment variable is not set")?;
    let auth_secret =
        std::env::var("AUTH_SECRET").context("AUTH_SECRET environment variable is not set")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("OPENAI_API_KEY is empty");
    }
    if auth_secret.trim().is_empty() {
        anyhow::bail!("AUTH_SECRET is empty");
    }

    Ok(Credentials {
        api_key: SecretString::new(api_key),
        auth_secret: SecretString::new(auth_secret),
    })
}

impl UpstreamConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl ServerConfig {
    pub fn graceful_shutdown_duration(&self) -> Duration {
        Duration::from_secs(self.graceful_shutdown_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.upstream.base_url, "https://api.openai.com/v1");
        assert_eq!(config.auth.token_leeway_seconds, 0);
    }

    #[test]
    fn test_partial_config_parse() {
        let config: Config = toml::from_str(
            r#"
            [upstream]
            base_url = "http://localhost:9000/v1"
            request_timeout_ms = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.base_url, "http://localhost:9000/v1");
        assert_eq!(config.upstream.request_timeout_ms, 5000);
        // Untouched sections fall back to defaults
        assert_eq!(config.server.request_body_limit_bytes, 262_144);
    }

    #[test]
    fn test_no_config_path_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_unreadable_explicit_config_path_errors() {
        let result = load_config(Some("/nonexistent/config.toml"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read /nonexistent/config.toml"));
    }
}
