use std::sync::Arc;

use gadget_db::connection::PgConnector;
use gadget_db::store::{MemoryProductStore, PgProductStore, ProductStore};

use crate::config::{ServerConfig, StoreBackend};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Product persistence; owns the cached store connection.
    pub store: Arc<dyn ProductStore>,
    /// Server configuration (read by the origin guard).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Build the store selected by `config.store`. Nothing connects yet.
    pub fn from_config(config: ServerConfig) -> Self {
        let store: Arc<dyn ProductStore> = match &config.store {
            StoreBackend::Postgres {
                database_url,
                max_connections,
            } => Arc::new(PgProductStore::new(PgConnector::new(
                database_url.clone(),
                *max_connections,
            ))),
            StoreBackend::Memory => Arc::new(MemoryProductStore::new()),
        };
        Self::new(store, config)
    }
}
