//! Request-path middleware.
//!
//! Ordering matters: `track` sits outside `db_gate` so gate aborts are
//! still counted and timed like any other response.

pub mod db_gate;
pub mod track;
