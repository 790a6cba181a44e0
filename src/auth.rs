use axum::http::HeaderMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Validates `Authorization: Bearer <jwt>` headers against a shared HS256
/// secret. Verification failures never escape as errors; the caller only
/// sees allowed/denied.
#[derive(Clone)]
pub struct TokenVerifier {
    secret: SecretString,
    leeway_seconds: u64,
}

impl TokenVerifier {
    pub fn new(secret: SecretString, leeway_seconds: u64) -> Self {
        Self {
            secret,
            leeway_seconds,
        }
    }

    /// Check the Authorization header of an inbound request. Missing header,
    /// malformed prefix, bad signature, and expired token all collapse to
    /// `false`; the reason is only logged.
    pub fn verify_headers(&self, headers: &HeaderMap) -> bool {
        // HeaderMap lookups are case-insensitive, so any casing of the
        // inbound header name lands here.
        let header = match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some(value) => value,
            None => {
                warn!("Authorization header missing or not valid UTF-8");
                return false;
            }
        };

        let token = match header.strip_prefix(BEARER_PREFIX) {
            Some(token) => token,
            None => {
                warn!("Authorization header does not carry a Bearer token");
                return false;
            }
        };

        self.verify_token(token)
    }

    fn verify_token(&self, token: &str) -> bool {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_seconds;

        match decode::<Claims>(token, &key, &validation) {
            Ok(token_data) => {
                debug!(sub = %token_data.claims.sub, exp = token_data.claims.exp, "Token verified");
                true
            }
            Err(e) => {
                warn!("Token verification failed: {}", e);
                false
            }
        }
    }
}

/// Sign a token the verifier will accept, valid for `ttl_secs` from now.
/// The companion client uses this to mint its credentials; tests use it the
/// same way.
pub fn sign_token(
    sub: &str,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    let claims = Claims {
        sub: sub.to_string(),
        exp: (now + ttl_secs).max(0) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn verifier(secret: &str) -> TokenVerifier {
        TokenVerifier::new(SecretString::new(secret.to_string()), 0)
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_valid_token_accepted() {
        let token = sign_token("test", "secret", 300).unwrap();
        assert!(verifier("secret").verify_headers(&headers_with(&format!("Bearer {}", token))));
    }

    #[test]
    fn test_missing_header_denied() {
        assert!(!verifier("secret").verify_headers(&HeaderMap::new()));
    }

    #[test]
    fn test_malformed_prefix_denied() {
        let token = sign_token("test", "secret", 300).unwrap();
        assert!(!verifier("secret").verify_headers(&headers_with(&format!("Basic {}", token))));
        assert!(!verifier("secret").verify_headers(&headers_with(&token)));
    }

    #[test]
    fn test_wrong_secret_denied() {
        let token = sign_token("test", "other-secret", 300).unwrap();
        assert!(!verifier("secret").verify_headers(&headers_with(&format!("Bearer {}", token))));
    }

    #[test]
    fn test_expired_token_denied() {
        let token = sign_token("test", "secret", -300).unwrap();
        assert!(!verifier("secret").verify_headers(&headers_with(&format!("Bearer {}", token))));
    }

    #[test]
    fn test_garbage_token_denied() {
        assert!(!verifier("secret").verify_headers(&headers_with("Bearer not.a.jwt")));
    }
}
