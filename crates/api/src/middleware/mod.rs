//! Request middleware.
//!
//! - [`origin::origin_guard`] -- rejects cross-origin requests from origins
//!   outside the configured [`crate::config::CorsPolicy`].

pub mod origin;
