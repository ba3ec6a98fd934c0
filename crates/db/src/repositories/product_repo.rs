//! Repository for the `products` table.

use gadget_core::types::ProductId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, short_desc, full_desc, price, image, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    ///
    /// If `created_at` is `None` in the input, the column default (`NOW()`) applies.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (title, short_desc, full_desc, price, image, created_at)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.title)
            .bind(&input.short_desc)
            .bind(&input.full_desc)
            .bind(input.price)
            .bind(&input.image)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its id.
    pub async fn find_by_id(pool: &PgPool, id: ProductId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Update a product. Absent fields keep their values; fields sent as
    /// `null` are cleared.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: ProductId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                title = COALESCE($2, title),
                short_desc = CASE WHEN $3 THEN $4 ELSE short_desc END,
                full_desc = CASE WHEN $5 THEN $6 ELSE full_desc END,
                price = CASE WHEN $7 THEN $8 ELSE price END,
                image = CASE WHEN $9 THEN $10 ELSE image END,
                created_at = COALESCE($11, created_at)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(input.title.clone().flatten())
            .bind(input.short_desc.is_some())
            .bind(input.short_desc.clone().flatten())
            .bind(input.full_desc.is_some())
            .bind(input.full_desc.clone().flatten())
            .bind(input.price.is_some())
            .bind(input.price.flatten())
            .bind(input.image.is_some())
            .bind(input.image.clone().flatten())
            .bind(input.created_at)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a product by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: ProductId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
