//! Todo service library.

pub mod config;
pub mod db;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use db::{Db, DbManager};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
