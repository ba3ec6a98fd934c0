//! Handlers for the `/products` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use gadget_core::error::CoreError;
use gadget_core::product::{parse_product_id, ENTITY as PRODUCT, WRITABLE_FIELDS};
use gadget_db::models::product::{CreateProduct, Product, UpdateProduct};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult, StoreContext};
use crate::response::{MessageResponse, ProductResponse};
use crate::state::AppState;

/// GET /api/products
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.store.list().await.context("Error fetching products")?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let id = parse_product_id(&id)?;
    let product = state
        .store
        .find_by_id(id)
        .await
        .context("Error fetching product")?
        .ok_or_else(|| CoreError::not_found(PRODUCT, id))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ProductResponse>> {
    let input: CreateProduct = product_body(body)?;
    input.validate().map_err(invalid_input)?;

    let product = state
        .store
        .create(&input)
        .await
        .context("Error adding product")?;
    tracing::info!(product_id = %product.id, "Product added");

    Ok(Json(ProductResponse {
        message: "Product added",
        product,
    }))
}

/// PUT /api/products/{id}
///
/// Applies only the supplied fields and returns the updated record.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ProductResponse>> {
    let id = parse_product_id(&id)?;
    let input: UpdateProduct = product_body(body)?;
    input.validate().map_err(invalid_input)?;

    let product = state
        .store
        .update(id, &input)
        .await
        .context("Error updating product")?
        .ok_or_else(|| CoreError::not_found(PRODUCT, id))?;
    tracing::info!(product_id = %product.id, "Product updated");

    Ok(Json(ProductResponse {
        message: "Product updated",
        product,
    }))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_product_id(&id)?;
    let deleted = state
        .store
        .delete(id)
        .await
        .context("Error deleting product")?;
    if !deleted {
        return Err(CoreError::not_found(PRODUCT, id).into());
    }
    tracing::info!(product_id = %id, "Product deleted");

    Ok(Json(MessageResponse {
        message: "Product deleted",
    }))
}

/// Decode a product payload, dropping keys outside [`WRITABLE_FIELDS`].
fn product_body<T: DeserializeOwned>(body: Result<Json<Value>, JsonRejection>) -> AppResult<T> {
    let Json(mut value) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let Value::Object(fields) = &mut value else {
        return Err(AppError::BadRequest(
            "Product payload must be a JSON object".into(),
        ));
    };
    let ignored: Vec<String> = fields
        .keys()
        .filter(|key| !WRITABLE_FIELDS.contains(&key.as_str()))
        .cloned()
        .collect();
    if !ignored.is_empty() {
        tracing::debug!(?ignored, "Ignoring fields outside the product allow-list");
        fields.retain(|key, _| WRITABLE_FIELDS.contains(&key.as_str()));
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::BadRequest(format!("Invalid product payload: {e}")))
}

fn invalid_input(errors: ValidationErrors) -> AppError {
    AppError::Core(CoreError::InvalidInput(errors.to_string()))
}
