use async_trait::async_trait;
use gadget_core::types::ProductId;

use super::ProductStore;
use crate::connection::{ConnectionManager, PgConnector};
use crate::error::StoreError;
use crate::models::product::{CreateProduct, Product, UpdateProduct};
use crate::repositories::ProductRepo;

/// PostgreSQL-backed store.
///
/// Every operation acquires the pool through the [`ConnectionManager`], so
/// nothing connects until the first request (or an explicit
/// [`ProductStore::init`]).
pub struct PgProductStore {
    connections: ConnectionManager<PgConnector>,
}

impl PgProductStore {
    pub fn new(connector: PgConnector) -> Self {
        Self {
            connections: ConnectionManager::new(connector),
        }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn init(&self) -> Result<(), StoreError> {
        self.connections.acquire().await.map(|_| ())
    }

    async fn shutdown(&self) {
        self.connections.shutdown().await;
    }

    fn is_connected(&self) -> bool {
        self.connections.is_connected()
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let pool = self.connections.acquire().await?;
        Ok(crate::health_check(&pool).await?)
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let pool = self.connections.acquire().await?;
        Ok(ProductRepo::list(&pool).await?)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let pool = self.connections.acquire().await?;
        Ok(ProductRepo::find_by_id(&pool, id).await?)
    }

    async fn create(&self, input: &CreateProduct) -> Result<Product, StoreError> {
        let pool = self.connections.acquire().await?;
        let product = ProductRepo::create(&pool, input).await?;
        tracing::debug!(product_id = %product.id, "Product inserted");
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, StoreError> {
        let pool = self.connections.acquire().await?;
        Ok(ProductRepo::update(&pool, id, input).await?)
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let pool = self.connections.acquire().await?;
        Ok(ProductRepo::delete(&pool, id).await?)
    }
}
