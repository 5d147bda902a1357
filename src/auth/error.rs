//! Auth error taxonomy.
//!
//! DESIGN
//! ======
//! Callers pattern-match on the kind; the detail strings exist for
//! diagnostics only. Login deliberately does not distinguish wrong-password
//! from network failure — the backend's error body is not trusted to leak
//! which one it was.

/// Errors produced by session and gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Login was refused or the request could not complete.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// Registration conflicted with an existing account (HTTP 409).
    #[error("account already exists")]
    AccountExists,

    /// Registration failed for any reason other than a conflict.
    #[error("registration failed: {0}")]
    RegisterFailed(String),

    /// A refresh was attempted with no refresh token in storage.
    #[error("no refresh token stored")]
    NoRefreshToken,

    /// The backend refused the refresh token or was unreachable.
    #[error("token refresh rejected: {0}")]
    RefreshRejected(String),
}

impl AuthError {
    /// True for the two refresh-failure causes that end the session.
    #[must_use]
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::NoRefreshToken | Self::RefreshRejected(_))
    }
}
