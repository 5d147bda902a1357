use super::*;

use jsonwebtoken::{EncodingKey, Header};

/// Mint a token with an arbitrary claims payload. The signing key is
/// irrelevant — decoding never verifies it.
fn mint(claims: &serde_json::Value) -> String {
    jsonwebtoken::encode(&Header::default(), claims, &EncodingKey::from_secret(b"test-secret"))
        .expect("encode test token")
}

fn future_exp() -> u64 {
    now_secs() + 3600
}

fn past_exp() -> u64 {
    now_secs().saturating_sub(3600)
}

// =============================================================================
// grants_admin — role claim wins over roles array
// =============================================================================

#[test]
fn single_role_admin_grants() {
    let token = mint(&serde_json::json!({ "role": "ADMIN", "exp": future_exp() }));
    let claims = decode(&token).expect("decode");
    assert!(claims.grants_admin());
}

#[test]
fn single_role_user_denies() {
    let token = mint(&serde_json::json!({ "role": "USER", "exp": future_exp() }));
    let claims = decode(&token).expect("decode");
    assert!(!claims.grants_admin());
}

#[test]
fn single_role_wins_over_admin_roles_array() {
    let token = mint(&serde_json::json!({
        "role": "USER",
        "roles": ["ROLE_ADMIN"],
        "exp": future_exp(),
    }));
    let claims = decode(&token).expect("decode");
    assert!(!claims.grants_admin(), "roles array must be ignored when role is present");
}

#[test]
fn single_role_admin_grants_regardless_of_roles_content() {
    let token = mint(&serde_json::json!({
        "role": "ADMIN",
        "roles": ["ROLE_USER"],
        "exp": future_exp(),
    }));
    let claims = decode(&token).expect("decode");
    assert!(claims.grants_admin());
}

// =============================================================================
// grants_admin — roles array fallback
// =============================================================================

#[test]
fn roles_array_with_role_admin_grants() {
    let token = mint(&serde_json::json!({ "roles": ["ROLE_ADMIN", "ROLE_USER"], "exp": future_exp() }));
    let claims = decode(&token).expect("decode");
    assert!(claims.grants_admin());
}

#[test]
fn roles_array_user_only_denies() {
    let token = mint(&serde_json::json!({ "roles": ["ROLE_USER"], "exp": future_exp() }));
    let claims = decode(&token).expect("decode");
    assert!(!claims.grants_admin());
}

#[test]
fn roles_array_unprefixed_admin_denies() {
    // Only the exact authority string is recognized.
    let token = mint(&serde_json::json!({ "roles": ["ADMIN"], "exp": future_exp() }));
    let claims = decode(&token).expect("decode");
    assert!(!claims.grants_admin());
}

#[test]
fn empty_roles_array_denies() {
    let token = mint(&serde_json::json!({ "roles": [], "exp": future_exp() }));
    let claims = decode(&token).expect("decode");
    assert!(!claims.grants_admin());
}

#[test]
fn null_role_falls_back_to_roles_array() {
    let token = mint(&serde_json::json!({ "role": null, "roles": ["ROLE_ADMIN"], "exp": future_exp() }));
    let claims = decode(&token).expect("decode");
    assert!(claims.grants_admin());
}

#[test]
fn no_role_claims_denies() {
    let token = mint(&serde_json::json!({ "sub": "alice", "exp": future_exp() }));
    let claims = decode(&token).expect("decode");
    assert!(!claims.grants_admin());
}

// =============================================================================
// expiry
// =============================================================================

#[test]
fn future_exp_is_not_expired() {
    let token = mint(&serde_json::json!({ "exp": future_exp() }));
    assert!(!is_expired(&token));
}

#[test]
fn past_exp_is_expired() {
    let token = mint(&serde_json::json!({ "exp": past_exp() }));
    assert!(is_expired(&token));
}

#[test]
fn missing_exp_never_expires() {
    let token = mint(&serde_json::json!({ "sub": "alice" }));
    assert!(!is_expired(&token));
}

#[test]
fn undecodable_token_counts_as_expired() {
    assert!(is_expired("not-a-jwt"));
    assert!(is_expired(""));
}

// =============================================================================
// decode
// =============================================================================

#[test]
fn decode_reads_subject() {
    let token = mint(&serde_json::json!({ "sub": "alice", "exp": future_exp() }));
    let claims = decode(&token).expect("decode");
    assert_eq!(claims.sub.as_deref(), Some("alice"));
}

#[test]
fn decode_garbage_returns_none() {
    assert!(decode("garbage").is_none());
    assert!(decode("a.b.c").is_none());
}

#[test]
fn decode_ignores_unknown_claims() {
    let token = mint(&serde_json::json!({ "role": "ADMIN", "custom": {"nested": true}, "exp": future_exp() }));
    assert!(decode(&token).is_some());
}
