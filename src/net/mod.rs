//! HTTP plumbing — shared client, error taxonomy, authenticated pipeline.

pub mod pipeline;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;

pub use pipeline::ApiClient;

/// Errors produced by the request pipeline and API modules.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    ClientBuild(String),

    /// The request could not complete (DNS, connect, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("unexpected status {status}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),
}

/// Build the HTTP client shared by the gateway and the pipeline.
///
/// One client means one timeout policy: the request timeout bounds refresh
/// calls too, so a hung refresh fails closed instead of hanging a retry.
///
/// # Errors
///
/// `ApiError::ClientBuild` if the TLS backend cannot initialize.
pub fn build_http_client(config: &ApiConfig) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .map_err(|e| ApiError::ClientBuild(e.to_string()))
}

/// Require a success status and deserialize the JSON body.
///
/// # Errors
///
/// `ApiError::Status` for non-2xx responses (body preserved for
/// diagnostics), `ApiError::Parse` when the body does not deserialize.
pub async fn expect_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
    if !status.is_success() {
        return Err(ApiError::Status { status: status.as_u16(), body });
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Require a success status, discarding the body.
///
/// # Errors
///
/// `ApiError::Status` for non-2xx responses.
pub async fn expect_success(response: reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status: status.as_u16(), body })
}
