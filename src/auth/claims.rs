//! Access-token claim decoding and expiry checks.
//!
//! DESIGN
//! ======
//! The client never holds the signing key, so tokens are decoded without
//! signature verification — the backend re-validates every request anyway.
//! What matters here is only the role claim and the expiry timestamp.
//!
//! The backend has shipped two claim shapes: a single `role` string
//! (e.g. `"ADMIN"`) and a `roles` array (e.g. `["ROLE_ADMIN", "ROLE_USER"]`).
//! When both are present, `role` wins and `roles` is ignored.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, Validation};
use serde::Deserialize;

const ADMIN_ROLE: &str = "ADMIN";
const ADMIN_AUTHORITY: &str = "ROLE_ADMIN";

/// Claims carried by an access token. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessClaims {
    /// Subject (username). Informational only.
    pub sub: Option<String>,
    /// Expiry as seconds since the Unix epoch. Absent means non-expiring.
    pub exp: Option<u64>,
    /// Single-role claim shape.
    pub role: Option<String>,
    /// Authority-array claim shape.
    pub roles: Option<Vec<String>>,
}

impl AccessClaims {
    /// Whether this token grants admin privilege.
    ///
    /// `role` takes precedence when present; otherwise a non-empty `roles`
    /// array is searched for the exact authority `ROLE_ADMIN`; otherwise
    /// the answer is no.
    #[must_use]
    pub fn grants_admin(&self) -> bool {
        if let Some(role) = &self.role {
            return role == ADMIN_ROLE;
        }
        match &self.roles {
            Some(roles) if !roles.is_empty() => roles.iter().any(|r| r == ADMIN_AUTHORITY),
            _ => false,
        }
    }

    /// Whether the token's `exp` claim is in the past. Tokens without an
    /// `exp` claim never expire.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        match self.exp {
            Some(exp) => exp <= now_secs(),
            None => false,
        }
    }
}

/// Decode the claims of a token without verifying its signature.
///
/// Returns `None` when the string is not a structurally valid JWT or its
/// payload does not deserialize.
#[must_use]
pub fn decode(token: &str) -> Option<AccessClaims> {
    // Take the algorithm from the header: the claims are the same whichever
    // scheme the backend signs with.
    let header = jsonwebtoken::decode_header(token).ok()?;
    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<AccessClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}

/// Whether a stored token should be treated as unusable.
///
/// Undecodable tokens count as expired: if the expiry check cannot complete,
/// the session must not be trusted.
#[must_use]
pub fn is_expired(token: &str) -> bool {
    decode(token).is_none_or(|claims| claims.is_expired())
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "claims_test.rs"]
mod tests;
