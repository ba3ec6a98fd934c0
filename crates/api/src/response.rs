//! Response envelope types for the product handlers.

use gadget_db::models::product::Product;
use serde::Serialize;

/// `{ "message": ... }` returned by routes with nothing else to report.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `{ "message": ..., "product": ... }` returned by create and update.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub message: &'static str,
    pub product: Product,
}
