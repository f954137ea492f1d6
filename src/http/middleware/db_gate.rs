//! Database-availability gate.
//!
//! # Responsibilities
//! - Guarantee every downstream handler observes a healthy database handle
//! - Retry acquisition with a linear backoff, bounded per request
//! - Abort loudly (500) when the store stays unreachable
//!
//! # Design Decisions
//! - Backoff is linear in the attempt index, not exponential: the common
//!   case is an already-healthy resource, so attempt 0 pays no delay
//! - A probe failure after a successful acquire still consumes an attempt
//!   and restarts from acquisition
//! - Sleeps run on the request's own task; a client disconnect drops the
//!   future and cancels the wait

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::Instrument;

use crate::config::GateConfig;
use crate::db::DataSource;

/// Shared state for the gate: the resource provider plus retry policy.
#[derive(Clone)]
pub struct GateState {
    pub source: Arc<dyn DataSource>,
    pub config: GateConfig,
}

/// Delay inserted before attempt `attempt`: zero for the first, then
/// `base * attempt`.
pub fn retry_delay(base: Duration, attempt: u32) -> Duration {
    base * attempt
}

/// Per-request acquisition gate. Runs between routing and the handlers;
/// on success the request carries a [`Db`](crate::db::Db) extension
/// onward, on exhaustion it never reaches a handler.
pub async fn db_gate(State(state): State<GateState>, mut req: Request, next: Next) -> Response {
    let span = tracing::info_span!("db.gate", attempts = tracing::field::Empty);
    let base = Duration::from_millis(state.config.base_delay_ms);

    async move {
        let mut last_err = None;

        for attempt in 0..state.config.max_attempts {
            let delay = retry_delay(base, attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let db = match state.source.acquire().await {
                Ok(db) => db,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "database acquisition failed");
                    last_err = Some(e);
                    continue;
                }
            };

            if state.config.probe_on_acquire {
                if let Err(e) = state.source.probe().await {
                    tracing::warn!(attempt, error = %e, "database probe failed");
                    last_err = Some(e);
                    continue;
                }
            }

            tracing::Span::current().record("attempts", attempt as u64 + 1);
            req.extensions_mut().insert(db);
            return next.run(req).await;
        }

        // Exhausted. Hard stop: no handler runs for this request.
        let detail = match last_err {
            Some(e) => e.to_string(),
            None => "database unavailable".to_string(),
        };
        tracing::error!(
            attempts = state.config.max_attempts,
            error = %detail,
            "database unavailable after retries, aborting request"
        );
        (StatusCode::INTERNAL_SERVER_ERROR, detail).into_response()
    }
    .instrument(span)
    .await
}
