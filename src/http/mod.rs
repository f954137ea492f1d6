//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware wiring)
//!     → middleware/track.rs (request counter + duration histogram)
//!     → middleware/db_gate.rs (retry-gated database acquisition)
//!     → todos.rs handlers (via the extract.rs accessor)
//! ```

pub mod extract;
pub mod middleware;
pub mod server;
pub mod todos;

pub use server::HttpServer;
