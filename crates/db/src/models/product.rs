//! Product entity model and DTOs.

use gadget_core::product::validate_title;
use gadget_core::types::{ProductId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

/// A product row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub short_desc: Option<String>,
    pub full_desc: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    /// Bumped by the `trg_products_updated_at` trigger on every update.
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(custom(function = "title_rule"))]
    pub title: String,
    pub short_desc: Option<String>,
    pub full_desc: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    /// Defaults to the insertion time if omitted.
    pub created_at: Option<Timestamp>,
}

/// DTO for updating an existing product.
///
/// Each optional column is tri-state: an absent key keeps the stored value,
/// an explicit `null` clears it, and a value replaces it. `title` may be
/// replaced but never cleared; `createdAt` ignores `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub short_desc: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub full_desc: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub image: Option<Option<String>>,
    pub created_at: Option<Timestamp>,
}

impl Validate for UpdateProduct {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match &self.title {
            Some(Some(title)) => {
                if let Err(err) = title_rule(title) {
                    errors.add("title", err);
                }
            }
            Some(None) => errors.add("title", title_required()),
            None => {}
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Marks a key as present, keeping `null` distinguishable from absence.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn title_rule(title: &str) -> Result<(), ValidationError> {
    validate_title(title).map_err(|_| title_required())
}

fn title_required() -> ValidationError {
    let mut error = ValidationError::new("title");
    error.message = Some("title is required".into());
    error
}
