//! Catalog API modules — free functions over the pipeline client.

pub mod orders;
pub mod products;
pub mod types;
pub mod users;
