//! User operations.

use super::types::User;
use crate::net::{ApiClient, ApiError, expect_json};

/// Fetch the authenticated user's profile.
///
/// # Errors
///
/// `ApiError::Status` for non-success responses (401 here after a failed
/// refresh means the session has already been cleared by the pipeline).
pub async fn me(client: &ApiClient) -> Result<User, ApiError> {
    let response = client.get("/api/users/me").await?;
    expect_json(response).await
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
