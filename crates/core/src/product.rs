//! Domain rules for the `Product` entity.
//!
//! The record shape itself lives in `gadget_db::models::product`; this module
//! holds the rules that do not depend on storage: id parsing, title
//! validation and the list of client-writable fields.

use crate::error::CoreError;
use crate::types::ProductId;

/// Entity name used in error messages and logs.
pub const ENTITY: &str = "Product";

/// JSON fields a client may supply when creating or updating a product.
///
/// `id` and `updatedAt` are owned by the store. Any other key in a request
/// body is ignored.
pub const WRITABLE_FIELDS: &[&str] = &[
    "title",
    "shortDesc",
    "fullDesc",
    "price",
    "image",
    "createdAt",
];

/// Parse a path segment into a [`ProductId`].
///
/// A malformed id is the caller's mistake, so it is reported as
/// [`CoreError::InvalidInput`] rather than a missing record.
pub fn parse_product_id(raw: &str) -> Result<ProductId, CoreError> {
    raw.trim()
        .parse::<ProductId>()
        .map_err(|_| CoreError::InvalidInput(format!("'{raw}' is not a valid product id")))
}

/// The only rule on a title is that it is present: any non-empty string,
/// whitespace included, is accepted.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.is_empty() {
        return Err(CoreError::InvalidInput("title is required".into()));
    }
    Ok(())
}
