//! Database resource management subsystem.
//!
//! # Data Flow
//! ```text
//! DatabaseConfig
//!     → manager.rs (DbManager: singleton connection or bounded pool)
//!     → source.rs (DataSource seam consumed by the HTTP gate)
//!     → Db handle bound into request extensions per request
//!     → handlers execute statements through the handle
//! ```
//!
//! # Design Decisions
//! - Exactly one DbManager per process, injected by Arc, never global
//! - Handlers only ever borrow the handle; the manager alone creates,
//!   replaces and closes underlying connections
//! - The gate depends on the DataSource trait so tests can inject fakes

pub mod error;
pub mod manager;
pub mod source;

pub use error::DbError;
pub use manager::{Db, DbManager};
pub use source::{DataSource, PoolStats};
