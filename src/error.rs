//! Error types surfaced by a discovery run.

use diesel_async::pooled_connection::deadpool::PoolError;
use thiserror::Error;

/// Failures of the durable store
#[derive(Error, Debug)]
pub enum StoreError {
    /// A query or the surrounding transaction failed
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),

    /// No connection could be checked out of the pool
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The store refused the write for a reason of its own
    #[error("batch rejected: {0}")]
    Rejected(String),
}

/// Fatal conditions of a discovery run
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Neither the configured address nor the fallback symbol matched a token
    #[error("anchor token not found (address {address}, symbol {symbol})")]
    AnchorNotFound {
        /// Configured anchor address
        address: String,
        /// Configured fallback symbol
        symbol: String,
    },

    /// The anchor resolved but no pool references it
    #[error("anchor token {0} is not part of any pool")]
    AnchorDisconnected(String),

    /// Loading the market or flushing a batch failed; the batch was rolled back
    #[error("storage failure: {0}")]
    StorageFailure(#[from] StoreError),

    /// The run configuration is out of range or unparsable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The search or flush task panicked or was aborted
    #[error("background task failed: {0}")]
    TaskFailed(String),
}
