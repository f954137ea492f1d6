//! Database error kinds.

use thiserror::Error;

/// Error type for database resource management.
///
/// Only `Connect` and `Unhealthy` are retried, and only by the
/// availability gate within a single request. `Config` is startup-fatal
/// and `Missing` is a defensive accessor failure; neither is ever retried.
#[derive(Debug, Error)]
pub enum DbError {
    /// Malformed connection or pool configuration.
    #[error("invalid database configuration: {0}")]
    Config(String),

    /// Transient inability to establish a connection.
    #[error("failed to establish database connection: {0}")]
    Connect(#[source] sqlx::Error),

    /// An established resource failed its liveness probe.
    #[error("database liveness probe failed: {0}")]
    Unhealthy(#[source] sqlx::Error),

    /// A statement failed after the gate had already admitted the request.
    #[error("database statement failed: {0}")]
    Query(#[from] sqlx::Error),

    /// No usable handle was bound to the request. Means the gate did not
    /// run for this route, or the singleton connection vanished underneath
    /// the handler.
    #[error("no live database connection bound to this request")]
    Missing,
}
