//! Client library for the ShopEasy product/order catalog API.
//!
//! ARCHITECTURE
//! ============
//! The interesting part is authentication. `auth::Session` owns the client's
//! belief about "who is logged in and with what privilege", derived from a
//! stored access/refresh token pair and published through watch channels.
//! `net::ApiClient` stamps every outgoing request with the current access
//! token and recovers from token expiry mid-flight with a single-flight
//! refresh-and-retry cycle. The `api` modules are thin typed wrappers over
//! the pipeline.
//!
//! WIRING
//! ======
//! ```no_run
//! use std::sync::Arc;
//! use shopeasy_client::auth::{HttpAuthGateway, MemoryTokenStore, Session};
//! use shopeasy_client::config::ApiConfig;
//! use shopeasy_client::net::{ApiClient, build_http_client};
//!
//! # async fn wire() -> Result<(), shopeasy_client::net::ApiError> {
//! let config = ApiConfig::from_env();
//! let http = build_http_client(&config)?;
//! let store = Arc::new(MemoryTokenStore::new());
//! let gateway = Arc::new(HttpAuthGateway::new(http.clone(), &config));
//! let session = Session::start(store, gateway);
//! let client = ApiClient::new(http, &config, session.clone());
//!
//! let products = shopeasy_client::api::products::list(
//!     &client,
//!     &shopeasy_client::api::products::ProductFilter::default(),
//!     0,
//!     10,
//! )
//! .await?;
//! # let _ = products;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod net;

pub use auth::{AuthError, Session, TokenPair};
pub use config::ApiConfig;
pub use net::{ApiClient, ApiError};
