//! Semantic configuration checks.
//!
//! Serde handles the syntactic layer; everything here is about values that
//! parse but cannot work (zero-sized pool, min above max, unparseable
//! addresses).

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::{PoolMode, ServiceConfig};

/// A single failed semantic check.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration, collecting every problem rather than
/// stopping at the first.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a socket address: {}", config.listener.bind_address),
        });
    }

    match Url::parse(&config.database.url) {
        Ok(url) if url.scheme() == "postgres" || url.scheme() == "postgresql" => {}
        Ok(url) => errors.push(ValidationError {
            field: "database.url",
            message: format!("unsupported scheme: {}", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "database.url",
            message: e.to_string(),
        }),
    }

    if config.database.mode == PoolMode::Pooled {
        if config.database.max_connections == 0 {
            errors.push(ValidationError {
                field: "database.max_connections",
                message: "must be at least 1".to_string(),
            });
        }
        if config.database.min_connections > config.database.max_connections {
            errors.push(ValidationError {
                field: "database.min_connections",
                message: format!(
                    "min ({}) exceeds max ({})",
                    config.database.min_connections, config.database.max_connections
                ),
            });
        }
    }

    if config.gate.max_attempts == 0 {
        errors.push(ValidationError {
            field: "gate.max_attempts",
            message: "must be at least 1".to_string(),
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "not a socket address: {}",
                config.observability.metrics_address
            ),
        });
    }

    if config.observability.runtime_sample_interval_secs == 0 {
        errors.push(ValidationError {
            field: "observability.runtime_sample_interval_secs",
            message: "must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
