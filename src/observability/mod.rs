//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing.rs (spans, exported over OTLP when configured)
//!     → metrics.rs (counters, gauges, histograms → Prometheus endpoint)
//!
//! runtime.rs samples process/runtime/pool gauges on its own schedule,
//! off the request path.
//! ```
//!
//! # Design Decisions
//! - Metric updates are cheap (atomic); recording never blocks a request
//! - A failed exporter install degrades observability, never traffic
//! - Spans that observe an error record it before they close

pub mod metrics;
pub mod runtime;
pub mod tracing;
