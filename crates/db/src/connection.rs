//! Lazy, cached connection establishment.
//!
//! [`ConnectionManager`] hands out one shared handle to the record store.
//! The first [`ConnectionManager::acquire`] call starts a connection attempt
//! and publishes it before awaiting, so callers that arrive while it is in
//! flight join the same attempt instead of opening a second one. A
//! successful attempt is cached for the life of the manager; a failed one is
//! reported to every joined caller and cleared so the next call retries.
//!
//! ```text
//! Unconnected --acquire--> Connecting --ok--> Connected
//!      ^                       |
//!      +--------err------------+
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};

use crate::error::StoreError;
use crate::DbPool;

/// Opens connections to the record store.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Cheaply cloneable handle shared by every request once connected.
    type Handle: Clone + Send + Sync + 'static;

    /// Establish a new connection.
    async fn connect(&self) -> Result<Self::Handle, sqlx::Error>;

    /// Release a handle returned by [`Connector::connect`].
    async fn disconnect(&self, _handle: Self::Handle) {}
}

type Attempt<H> = Shared<BoxFuture<'static, Result<H, Arc<sqlx::Error>>>>;

enum ConnectionState<H> {
    Unconnected,
    Connecting(Attempt<H>),
    Connected(H),
}

/// Owns the single cached connection handle for one [`Connector`].
pub struct ConnectionManager<C: Connector> {
    connector: Arc<C>,
    state: Mutex<ConnectionState<C::Handle>>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            state: Mutex::new(ConnectionState::Unconnected),
        }
    }

    /// Return the cached handle, joining or starting a connection attempt
    /// if there is none yet.
    pub async fn acquire(&self) -> Result<C::Handle, StoreError> {
        let attempt = {
            let mut state = self.lock_state();
            match &*state {
                ConnectionState::Connected(handle) => return Ok(handle.clone()),
                ConnectionState::Connecting(attempt) => attempt.clone(),
                ConnectionState::Unconnected => {
                    tracing::info!("Connecting to record store");
                    let connector = Arc::clone(&self.connector);
                    let attempt = async move { connector.connect().await.map_err(Arc::new) }
                        .boxed()
                        .shared();
                    *state = ConnectionState::Connecting(attempt.clone());
                    attempt
                }
            }
        };

        let result = attempt.clone().await;

        // Only the attempt still recorded in the state may settle it; a
        // shutdown may have reset the state while this attempt was pending.
        let mut state = self.lock_state();
        if let ConnectionState::Connecting(current) = &*state {
            if current.ptr_eq(&attempt) {
                *state = match &result {
                    Ok(handle) => {
                        tracing::info!("Record store connected");
                        ConnectionState::Connected(handle.clone())
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Record store connection failed");
                        ConnectionState::Unconnected
                    }
                };
            }
        }

        result.map_err(StoreError::Unavailable)
    }

    /// Whether a handle is cached.
    pub fn is_connected(&self) -> bool {
        matches!(*self.lock_state(), ConnectionState::Connected(_))
    }

    /// Drop the cached handle (if any) and return to `Unconnected`.
    ///
    /// A pending attempt is abandoned: callers already awaiting it still get
    /// its result, but that result is not cached. Shutdown waits for the
    /// attempt to settle and closes the handle it produced.
    pub async fn shutdown(&self) {
        let previous = std::mem::replace(&mut *self.lock_state(), ConnectionState::Unconnected);
        match previous {
            ConnectionState::Connected(handle) => {
                self.connector.disconnect(handle).await;
                tracing::info!("Record store connection closed");
            }
            ConnectionState::Connecting(attempt) => {
                if let Ok(handle) = attempt.await {
                    self.connector.disconnect(handle).await;
                    tracing::info!("Closed record store connection from abandoned attempt");
                }
            }
            ConnectionState::Unconnected => {}
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ConnectionState<C::Handle>> {
        // The state is only ever replaced wholesale, so a poisoned lock still
        // holds a consistent value.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

enum PgSource {
    Url {
        database_url: String,
        max_connections: u32,
    },
    Pool(DbPool),
}

/// Connects to PostgreSQL and applies migrations once per connection.
pub struct PgConnector {
    source: PgSource,
}

impl PgConnector {
    pub fn new(database_url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            source: PgSource::Url {
                database_url: database_url.into(),
                max_connections,
            },
        }
    }

    /// Hand out an already migrated pool instead of opening a new one.
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            source: PgSource::Pool(pool),
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Handle = DbPool;

    async fn connect(&self) -> Result<DbPool, sqlx::Error> {
        let (database_url, max_connections) = match &self.source {
            PgSource::Pool(pool) => return Ok(pool.clone()),
            PgSource::Url {
                database_url,
                max_connections,
            } => (database_url, *max_connections),
        };
        let pool = crate::create_pool(database_url, max_connections).await?;
        crate::run_migrations(&pool)
            .await
            .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
        tracing::debug!(max_connections, "Database pool ready");
        Ok(pool)
    }

    async fn disconnect(&self, pool: DbPool) {
        pool.close().await;
    }
}
