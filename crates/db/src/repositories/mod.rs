//! Repository layer for database access.
//!
//! Each repository is a zero-sized struct with async methods that accept
//! a `&PgPool` and return `Result<T, sqlx::Error>`.

pub mod product_repo;

pub use product_repo::ProductRepo;
