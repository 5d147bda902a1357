use super::*;

use std::sync::Arc;

use axum::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use serde_json::json;

use crate::auth::{HttpAuthGateway, MemoryTokenStore, Session, TokenStore};
use crate::auth::store::ACCESS_TOKEN_KEY;
use crate::config::ApiConfig;
use crate::net::build_http_client;

// =============================================================================
// MOCK BACKEND
// =============================================================================

/// `/api/users/me` answers only authenticated requests, like the real thing.
async fn me_handler(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
    if headers.contains_key("authorization") {
        (StatusCode::OK, Json(json!({ "id": 1, "username": "alice", "role": "ADMIN" })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unauthorized" })))
    }
}

async fn client(store: Arc<MemoryTokenStore>) -> ApiClient {
    let app = axum::Router::new().route("/api/users/me", get(me_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });

    let config = ApiConfig::new(format!("http://{addr}"));
    let http = build_http_client(&config).expect("http client");
    let gateway = Arc::new(HttpAuthGateway::new(http.clone(), &config));
    let session = Session::new(store, gateway);
    ApiClient::new(http, &config, session)
}

// =============================================================================
// me
// =============================================================================

#[tokio::test]
async fn me_parses_authenticated_user() {
    let store = Arc::new(MemoryTokenStore::new());
    store.set(ACCESS_TOKEN_KEY, "some-token");
    let client = client(store).await;

    let user = me(&client).await.expect("me");
    assert_eq!(user.id, 1);
    assert_eq!(user.username, "alice");
    assert_eq!(user.role, "ADMIN");
}

#[tokio::test]
async fn me_without_session_maps_to_status_error() {
    let client = client(Arc::new(MemoryTokenStore::new())).await;

    let err = me(&client).await.expect_err("unauthenticated");
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("unauthorized"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
