//! Wire types for the catalog API.
//!
//! Field names mirror the backend's JSON (camelCase); paged endpoints return
//! Spring-style page envelopes, of which only the fields the client uses are
//! modeled.

use serde::{Deserialize, Serialize};

// =============================================================================
// PAGING
// =============================================================================

/// One page of results from a paged endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    /// Zero-based index of this page.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

// =============================================================================
// PRODUCTS
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for product create/update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
}

// =============================================================================
// ORDERS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub created_at: String,
    pub total: f64,
    pub items: Vec<OrderItem>,
}

// =============================================================================
// USERS
// =============================================================================

/// The authenticated user as reported by `/api/users/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
