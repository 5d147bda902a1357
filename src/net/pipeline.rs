//! Authenticated request pipeline.
//!
//! ARCHITECTURE
//! ============
//! Every application request runs the same course: stamp the current access
//! token (if any), send, and on a 401 perform exactly one refresh-and-retry
//! cycle. The three bootstrap auth endpoints are excluded from both the
//! stamping and the cycle — refresh answering 401 must never trigger another
//! refresh.
//!
//! TRADE-OFFS
//! ==========
//! When the refresh itself fails the caller gets the ORIGINAL 401 response,
//! not the refresh error, and the session is forcibly logged out first.
//! Observers therefore always see "logged out" alongside a session-ending
//! failure, and the caller's error reflects the request it actually made.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Serialize;

use super::ApiError;
use crate::auth::Session;
use crate::config::ApiConfig;

/// Endpoints that bootstrap authentication and must stay outside the cycle.
const AUTH_PATHS: [&str; 3] = ["/api/auth/login", "/api/auth/register", "/api/auth/refresh"];

fn is_auth_endpoint(path: &str) -> bool {
    AUTH_PATHS.iter().any(|p| path.ends_with(p))
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

fn attach_bearer(request: &mut reqwest::Request, token: &str) -> Result<(), ApiError> {
    let value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| ApiError::Transport(format!("invalid bearer token: {e}")))?;
    request.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client that routes every request through the auth pipeline.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Build a pipeline client over a shared HTTP client and session.
    #[must_use]
    pub fn new(http: reqwest::Client, config: &ApiConfig, session: Session) -> Self {
        Self { http, base_url: config.base_url.clone(), session }
    }

    /// The session this pipeline reads tokens from.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // =========================================================================
    // REQUEST SURFACE
    // =========================================================================

    /// `GET path` through the pipeline.
    ///
    /// # Errors
    ///
    /// `ApiError::Transport` when the request cannot complete. Non-401
    /// statuses are returned in the response for the caller to interpret.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        let request = self.http.get(self.url(path)).build().map_err(transport)?;
        self.execute(request).await
    }

    /// `GET path?query` through the pipeline.
    ///
    /// # Errors
    ///
    /// See [`Self::get`].
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<reqwest::Response, ApiError> {
        let request = self.http.get(self.url(path)).query(query).build().map_err(transport)?;
        self.execute(request).await
    }

    /// `POST path` with a JSON body through the pipeline.
    ///
    /// # Errors
    ///
    /// See [`Self::get`].
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        let request = self.http.post(self.url(path)).json(body).build().map_err(transport)?;
        self.execute(request).await
    }

    /// `PUT path` with a JSON body through the pipeline.
    ///
    /// # Errors
    ///
    /// See [`Self::get`].
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        let request = self.http.put(self.url(path)).json(body).build().map_err(transport)?;
        self.execute(request).await
    }

    /// `DELETE path` through the pipeline.
    ///
    /// # Errors
    ///
    /// See [`Self::get`].
    pub async fn delete(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        let request = self.http.delete(self.url(path)).build().map_err(transport)?;
        self.execute(request).await
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    /// Run one request through the pipeline.
    ///
    /// Auth endpoints bypass everything. Otherwise: stamp the token if one
    /// is stored (absence is not an error — the request goes out
    /// unauthenticated), send, and on 401 refresh once and re-issue the
    /// original request with the new token. The retry's outcome is returned
    /// as-is, even if it is another 401.
    async fn execute(&self, mut request: reqwest::Request) -> Result<reqwest::Response, ApiError> {
        if is_auth_endpoint(request.url().path()) {
            return self.http.execute(request).await.map_err(transport);
        }

        // Cloned before the send: the retry must re-issue the request
        // exactly as the caller built it, minus the stale token.
        let retry = request.try_clone();

        if let Some(token) = self.session.token() {
            attach_bearer(&mut request, &token)?;
        }

        let response = self.http.execute(request).await.map_err(transport)?;
        if response.status() != reqwest::StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        // Streaming bodies cannot be cloned; without a clone there is
        // nothing to retry with, so the 401 stands.
        let Some(mut retry) = retry else {
            return Ok(response);
        };

        match self.session.refresh().await {
            Ok(token) => {
                tracing::debug!(path = retry.url().path(), "retrying after token refresh");
                attach_bearer(&mut retry, &token)?;
                self.http.execute(retry).await.map_err(transport)
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed; surfacing original 401");
                self.session.logout();
                Ok(response)
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
