//! Authentication — session state, token storage, claims, auth endpoints.

pub mod claims;
pub mod error;
pub mod gateway;
pub mod session;
pub mod store;

pub use error::AuthError;
pub use gateway::{AuthGateway, HttpAuthGateway, TokenPair};
pub use session::Session;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
