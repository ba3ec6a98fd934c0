use std::sync::Arc;

/// Failure of a record-store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No connection to the store could be established.
    ///
    /// The inner error is shared by every caller that was waiting on the
    /// same connection attempt.
    #[error("Store unavailable: {0}")]
    Unavailable(#[source] Arc<sqlx::Error>),

    /// A query on an established connection failed.
    #[error("Store query failed: {0}")]
    Query(#[from] sqlx::Error),
}

impl StoreError {
    /// True when the failure happened before any query could run.
    pub fn is_unavailable(&self) -> bool {
        match self {
            StoreError::Unavailable(_) => true,
            StoreError::Query(err) => matches!(
                err,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
        }
    }
}
