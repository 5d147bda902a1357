//! Auth endpoints client — login, register, refresh.
//!
//! Thin HTTP wrapper over the three bootstrap endpoints. Transport failures
//! are folded into the domain error taxonomy here so the session layer never
//! sees a raw `reqwest::Error`.

use serde::{Deserialize, Serialize};

use super::error::AuthError;
use crate::config::ApiConfig;

/// Access/refresh token pair as issued by the backend. The backend rotates
/// the refresh token on every refresh, so both are always stored together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// The three network operations the session depends on.
///
/// A trait seam so session behavior can be tested against a scripted
/// gateway without a live backend.
#[async_trait::async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a token pair.
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Create an account. Yields nothing on success.
    async fn register(&self, username: &str, password: &str, role: &str) -> Result<(), AuthError>;

    /// Exchange a refresh token for a new token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;
}

// =============================================================================
// HTTP GATEWAY
// =============================================================================

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    role: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Production gateway over `reqwest`.
pub struct HttpAuthGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthGateway {
    /// Build a gateway over an already-configured HTTP client.
    ///
    /// The shared client's request timeout also bounds refresh calls, so a
    /// hung refresh fails closed instead of pinning a retry forever.
    #[must_use]
    pub fn new(http: reqwest::Client, config: &ApiConfig) -> Self {
        Self { http, base_url: config.base_url.clone() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait::async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        let resp = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| AuthError::LoginFailed(e.to_string()))?;

        // Wrong credentials and transport faults are deliberately
        // indistinguishable at this layer.
        if !resp.status().is_success() {
            return Err(AuthError::LoginFailed(format!("status {}", resp.status().as_u16())));
        }

        resp.json::<TokenPair>()
            .await
            .map_err(|e| AuthError::LoginFailed(format!("response parse failed: {e}")))
    }

    async fn register(&self, username: &str, password: &str, role: &str) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&RegisterRequest { username, password, role })
            .send()
            .await
            .map_err(|e| AuthError::RegisterFailed(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else if status == reqwest::StatusCode::CONFLICT {
            Err(AuthError::AccountExists)
        } else {
            Err(AuthError::RegisterFailed(format!("status {}", status.as_u16())))
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let resp = self
            .http
            .post(self.url("/api/auth/refresh"))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|e| AuthError::RefreshRejected(e.to_string()))?;

        // Any non-success status is total refresh failure, regardless of code.
        if !resp.status().is_success() {
            return Err(AuthError::RefreshRejected(format!("status {}", resp.status().as_u16())));
        }

        resp.json::<TokenPair>()
            .await
            .map_err(|e| AuthError::RefreshRejected(format!("response parse failed: {e}")))
    }
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
