//! Order operations.

use super::types::{Order, OrderRequest, Page};
use crate::net::{ApiClient, ApiError, expect_json};

/// Place an order for the authenticated user.
///
/// # Errors
///
/// `ApiError::Status` for non-success responses, `ApiError::Parse` when the
/// body does not deserialize.
pub async fn create(client: &ApiClient, request: &OrderRequest) -> Result<Order, ApiError> {
    let response = client.post_json("/api/orders", request).await?;
    expect_json(response).await
}

/// List the authenticated user's own orders, newest first.
///
/// # Errors
///
/// See [`create`].
pub async fn list_mine(client: &ApiClient, page: u32, size: u32) -> Result<Page<Order>, ApiError> {
    let query = [("page", page.to_string()), ("size", size.to_string())];
    let response = client.get_with_query("/api/orders/me", &query).await?;
    expect_json(response).await
}

/// Fetch one order by id.
///
/// # Errors
///
/// See [`create`].
pub async fn get_by_id(client: &ApiClient, id: i64) -> Result<Order, ApiError> {
    let response = client.get(&format!("/api/orders/{id}")).await?;
    expect_json(response).await
}

#[cfg(test)]
#[path = "orders_test.rs"]
mod tests;
