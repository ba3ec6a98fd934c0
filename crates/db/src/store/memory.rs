use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use gadget_core::types::ProductId;

use super::ProductStore;
use crate::error::StoreError;
use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Process-local store with the same semantics as the PostgreSQL one,
/// including listing by `(created_at, id)`.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn init(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn shutdown(&self) {}

    fn is_connected(&self) -> bool {
        true
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let mut products = self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        products.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(products)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().unwrap_or_else(PoisonError::into_inner);
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: &CreateProduct) -> Result<Product, StoreError> {
        let now = Utc::now();
        let product = Product {
            id: ProductId::new_v4(),
            title: input.title.clone(),
            short_desc: input.short_desc.clone(),
            full_desc: input.full_desc.clone(),
            price: input.price,
            image: input.image.clone(),
            created_at: input.created_at.unwrap_or(now),
            updated_at: now,
        };
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(Some(title)) = &input.title {
            product.title.clone_from(title);
        }
        if let Some(short_desc) = &input.short_desc {
            product.short_desc.clone_from(short_desc);
        }
        if let Some(full_desc) = &input.full_desc {
            product.full_desc.clone_from(full_desc);
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if let Some(image) = &input.image {
            product.image.clone_from(image);
        }
        if let Some(created_at) = input.created_at {
            product.created_at = created_at;
        }
        product.updated_at = Utc::now();

        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut products = self.products.write().unwrap_or_else(PoisonError::into_inner);
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}
