//! The acquisition seam between the HTTP gate and the resource manager.

use async_trait::async_trait;

use crate::db::error::DbError;
use crate::db::manager::Db;

/// Snapshot of pool occupancy, sampled for gauges.
///
/// `acquired <= total` holds for every snapshot; singleton mode reports a
/// degenerate one-or-zero pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub total: u32,
    pub idle: u32,
    pub acquired: u32,
}

/// Provider of the shared database resource.
///
/// [`DbManager`](crate::db::DbManager) is the production implementation;
/// integration tests inject fakes with scripted outcomes.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Return a request-scoped handle, establishing the underlying
    /// connection if necessary.
    async fn acquire(&self) -> Result<Db, DbError>;

    /// Validate liveness with a trivial round trip.
    async fn probe(&self) -> Result<(), DbError>;

    /// Occupancy snapshot for observability.
    fn stats(&self) -> PoolStats;

    /// Release underlying resources. Idempotent.
    async fn shutdown(&self);
}
