//! Domain types and rules shared by the Gadget Store crates.

pub mod error;
pub mod product;
pub mod types;
