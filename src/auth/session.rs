//! Session state — the client's belief about who is logged in.
//!
//! ARCHITECTURE
//! ============
//! `Session` is constructed once at application start and passed by cheap
//! clone to everything that needs auth state; there is no ambient global.
//! It is the sole writer of the two observable booleans, which are published
//! through `watch` channels so consumers can either read the current value
//! or subscribe for changes.
//!
//! The admin flag is strictly derived: it is only ever published as
//! "logged in AND the current token grants admin", never set on its own.
//!
//! TRADE-OFFS
//! ==========
//! Refresh is single-flight. Concurrent callers queue on an async gate; the
//! first performs the network exchange and rotates the stored pair, the rest
//! observe the rotation and return the new token without a second call.
//! This trades a small amount of latency for never burning two refresh
//! tokens on the same expiry.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use super::claims;
use super::error::AuthError;
use super::gateway::{AuthGateway, TokenPair};
use super::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStore};

/// Cloneable handle to the process-wide authentication state.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    gateway: Arc<dyn AuthGateway>,
    logged_in: Arc<watch::Sender<bool>>,
    admin: Arc<watch::Sender<bool>>,
    refresh_gate: Arc<tokio::sync::Mutex<()>>,
    /// Bumped on every credential transition (install or clear). Lets a
    /// queued refresher detect that a rotation completed while it waited,
    /// even when the reissued token happens to be byte-identical.
    generation: Arc<AtomicU64>,
}

impl Session {
    /// Build a session over the given store and gateway.
    ///
    /// The logged-in flag starts as "a stored access token exists" — an
    /// existence check only. Validity is established by [`Self::bootstrap`],
    /// which corrects the flag afterwards; the admin flag stays false until
    /// that check completes.
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>, gateway: Arc<dyn AuthGateway>) -> Self {
        let has_token = store.get(ACCESS_TOKEN_KEY).is_some();
        let (logged_in, _) = watch::channel(has_token);
        let (admin, _) = watch::channel(false);
        Self {
            store,
            gateway,
            logged_in: Arc::new(logged_in),
            admin: Arc::new(admin),
            refresh_gate: Arc::new(tokio::sync::Mutex::new(())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Build a session and spawn [`Self::bootstrap`] in the background.
    ///
    /// Must be called within a Tokio runtime. Subscribers attaching between
    /// construction and bootstrap completion may observe the pre-check
    /// value first.
    #[must_use]
    pub fn start(store: Arc<dyn TokenStore>, gateway: Arc<dyn AuthGateway>) -> Self {
        let session = Self::new(store, gateway);
        let task = session.clone();
        tokio::spawn(async move { task.bootstrap().await });
        session
    }

    /// Validate the stored access token and settle both flags.
    ///
    /// No token, an expired token, or a token whose claims cannot be read
    /// all clear the session; a valid token publishes logged-in plus the
    /// admin grant from its claims.
    pub async fn bootstrap(&self) {
        let Some(token) = self.token() else {
            self.clear();
            return;
        };
        match claims::decode(&token) {
            Some(c) if !c.is_expired() => {
                tracing::debug!(admin = c.grants_admin(), "session restored from stored token");
                self.publish(true, c.grants_admin());
            }
            _ => {
                tracing::info!("stored access token expired or unreadable; clearing session");
                self.clear();
            }
        }
    }

    // =========================================================================
    // OBSERVABLES
    // =========================================================================

    /// Current logged-in status.
    #[must_use]
    pub fn logged_in(&self) -> bool {
        *self.logged_in.borrow()
    }

    /// Current admin status.
    #[must_use]
    pub fn admin(&self) -> bool {
        *self.admin.borrow()
    }

    /// Subscribe to logged-in changes. The receiver yields the current
    /// value first.
    #[must_use]
    pub fn logged_in_changes(&self) -> watch::Receiver<bool> {
        self.logged_in.subscribe()
    }

    /// Subscribe to admin changes.
    #[must_use]
    pub fn admin_changes(&self) -> watch::Receiver<bool> {
        self.admin.subscribe()
    }

    // =========================================================================
    // TOKEN READS
    // =========================================================================

    /// Current access token, if stored.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    /// Current refresh token, if stored.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY)
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Log in with credentials. On success both tokens are persisted and the
    /// flags are republished from the new token's claims; on failure the
    /// prior session state is left untouched.
    ///
    /// # Errors
    ///
    /// `AuthError::LoginFailed` for any credential or transport failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        let pair = self.gateway.login(username, password).await?;
        self.install_pair(&pair);
        tracing::info!(username, admin = self.admin(), "login succeeded");
        Ok(pair)
    }

    /// Create an account. Performs no session mutation.
    ///
    /// # Errors
    ///
    /// `AuthError::AccountExists` on a duplicate account,
    /// `AuthError::RegisterFailed` for anything else.
    pub async fn register(&self, username: &str, password: &str, role: &str) -> Result<(), AuthError> {
        self.gateway.register(username, password, role).await
    }

    /// Clear both tokens and publish logged-out. Idempotent.
    pub fn logout(&self) {
        tracing::info!("logging out");
        self.clear();
    }

    /// Exchange the stored refresh token for a new pair, returning the new
    /// access token.
    ///
    /// Single-flight: concurrent callers coalesce onto one network exchange.
    /// Both failure causes clear the session — the client fails safe to
    /// logged-out rather than keeping credentials it knows are invalid.
    ///
    /// # Errors
    ///
    /// `AuthError::NoRefreshToken` when nothing is stored,
    /// `AuthError::RefreshRejected` when the backend refuses or is
    /// unreachable.
    pub async fn refresh(&self) -> Result<String, AuthError> {
        let queued_at = self.generation.load(Ordering::Acquire);
        let _gate = self.refresh_gate.lock().await;

        // Another caller may have rotated the pair while we waited on the
        // gate. The generation counter catches this even when the backend
        // reissues a byte-identical access token.
        if self.generation.load(Ordering::Acquire) != queued_at
            && let Some(current) = self.token()
        {
            tracing::debug!("refresh coalesced onto concurrent rotation");
            return Ok(current);
        }

        let Some(refresh_token) = self.refresh_token() else {
            self.clear();
            return Err(AuthError::NoRefreshToken);
        };

        match self.gateway.refresh(&refresh_token).await {
            Ok(pair) => {
                self.install_pair(&pair);
                tracing::info!("access token refreshed");
                Ok(pair.access_token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed; clearing session");
                self.clear();
                Err(e)
            }
        }
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    /// Persist a freshly issued pair and republish both flags from its
    /// claims. Always writes both tokens; the backend rotates the refresh
    /// token on every issue.
    fn install_pair(&self, pair: &TokenPair) {
        self.store.set(ACCESS_TOKEN_KEY, &pair.access_token);
        self.store.set(REFRESH_TOKEN_KEY, &pair.refresh_token);
        self.generation.fetch_add(1, Ordering::Release);
        let admin = claims::decode(&pair.access_token).is_some_and(|c| c.grants_admin());
        self.publish(true, admin);
    }

    /// Remove both tokens and publish logged-out. Safe to call repeatedly.
    fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        self.generation.fetch_add(1, Ordering::Release);
        self.publish(false, false);
    }

    /// Single point of truth for the flags: admin can never be published
    /// without logged-in.
    fn publish(&self, logged_in: bool, admin: bool) {
        self.logged_in.send_replace(logged_in);
        self.admin.send_replace(logged_in && admin);
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
