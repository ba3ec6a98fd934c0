//! The [`ProductStore`] seam.
//!
//! HTTP handlers talk to the catalog only through this trait, so the
//! PostgreSQL store can be swapped for [`MemoryProductStore`] in tests and
//! local development.

mod memory;
mod postgres;

use async_trait::async_trait;
use gadget_core::types::ProductId;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

use crate::error::StoreError;
use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Persistence operations for products.
///
/// Each operation is a single atomic store-level call. Inputs are assumed to
/// have passed DTO validation already.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Establish the underlying connection ahead of the first request.
    async fn init(&self) -> Result<(), StoreError>;

    /// Release the underlying connection.
    async fn shutdown(&self);

    /// Whether a connection is currently held (no I/O).
    fn is_connected(&self) -> bool;

    /// Confirm the store answers queries.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// All products in creation order.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    async fn create(&self, input: &CreateProduct) -> Result<Product, StoreError>;

    /// Apply the supplied fields; `None` when no product has this id.
    async fn update(
        &self,
        id: ProductId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, StoreError>;

    /// Returns `true` if a product was removed.
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;
}
