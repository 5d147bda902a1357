//! Product catalog operations.

use super::types::{Page, Product, ProductRequest};
use crate::net::{ApiClient, ApiError, expect_json, expect_success};

/// Optional filters for [`list`]. Blank strings are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    fn query(&self, page: u32, size: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("name", name.to_string()));
        }
        if let Some(category) = self.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("category", category.to_string()));
        }
        if let Some(min) = self.min_price.filter(|p| p.is_finite()) {
            query.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price.filter(|p| p.is_finite()) {
            query.push(("maxPrice", max.to_string()));
        }
        query
    }
}

/// List products matching `filter`, one page at a time.
///
/// # Errors
///
/// `ApiError::Status` for non-success responses, `ApiError::Parse` when the
/// page envelope does not deserialize.
pub async fn list(
    client: &ApiClient,
    filter: &ProductFilter,
    page: u32,
    size: u32,
) -> Result<Page<Product>, ApiError> {
    let response = client.get_with_query("/api/products", &filter.query(page, size)).await?;
    expect_json(response).await
}

/// Fetch one product by id.
///
/// # Errors
///
/// See [`list`].
pub async fn get_by_id(client: &ApiClient, id: i64) -> Result<Product, ApiError> {
    let response = client.get(&format!("/api/products/{id}")).await?;
    expect_json(response).await
}

/// Create a product (admin only on the backend).
///
/// # Errors
///
/// See [`list`].
pub async fn create(client: &ApiClient, request: &ProductRequest) -> Result<Product, ApiError> {
    let response = client.post_json("/api/products", request).await?;
    expect_json(response).await
}

/// Update a product by id.
///
/// # Errors
///
/// See [`list`].
pub async fn update(client: &ApiClient, id: i64, request: &ProductRequest) -> Result<Product, ApiError> {
    let response = client.put_json(&format!("/api/products/{id}"), request).await?;
    expect_json(response).await
}

/// Delete a product by id.
///
/// # Errors
///
/// `ApiError::Status` for non-success responses.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    let response = client.delete(&format!("/api/products/{id}")).await?;
    expect_success(response).await
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
