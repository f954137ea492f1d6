//! Request metrics emission, including gate-induced aborts.

mod common;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::from_fn;
use metrics::{SharedString, Unit};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::CompositeKey;
use tower::ServiceExt;

use common::{gated_router, FakeSource, Step};
use todo_service::config::GateConfig;
use todo_service::http::middleware::track::track_requests;
use todo_service::observability::metrics::{REQUESTS_TOTAL, REQUEST_DURATION};

// Snapshots drain histogram samples, so each phase takes exactly one
// snapshot and every assertion for that phase reads from it.
type Entries = Vec<(CompositeKey, Option<Unit>, Option<SharedString>, DebugValue)>;

fn find_counter<'a>(
    entries: &'a Entries,
    name: &str,
    status: &str,
) -> Option<(&'a CompositeKey, u64)> {
    entries
        .iter()
        .find(|(key, _, _, _)| {
            key.key().name() == name
                && key.key().labels().any(|l| l.key() == "status" && l.value() == status)
        })
        .map(|(key, _, _, value)| {
            let count = match value {
                DebugValue::Counter(c) => *c,
                _ => panic!("Expected counter"),
            };
            (key, count)
        })
}

fn histogram_len(entries: &Entries, name: &str, status: &str) -> usize {
    entries
        .iter()
        .find(|(key, _, _, _)| {
            key.key().name() == name
                && key.key().labels().any(|l| l.key() == "status" && l.value() == status)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Histogram(h) => h.len(),
            _ => panic!("Expected histogram"),
        })
        .unwrap_or(0)
}

fn label<'a>(key: &'a CompositeKey, name: &str) -> Option<&'a str> {
    key.key()
        .labels()
        .find(|l| l.key() == name)
        .map(|l| l.value())
}

// Single test so the one global recorder in this binary is never contended.
#[tokio::test]
async fn every_request_is_counted_once() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder.install().expect("install debugging recorder");

    let config = GateConfig {
        max_attempts: 3,
        base_delay_ms: 0,
        probe_on_acquire: true,
    };

    // Gate exhaustion: the abort must still be counted and timed.
    let source = Arc::new(FakeSource::new(vec![
        Step::ConnectFail,
        Step::ConnectFail,
        Step::ConnectFail,
    ]));
    let app = gated_router(source, config.clone(), Arc::new(AtomicUsize::new(0)))
        .layer(from_fn(track_requests));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let entries = snapshotter.snapshot().into_vec();
    let (key, count) = find_counter(&entries, REQUESTS_TOTAL, "500").expect("abort counted");
    assert_eq!(count, 1);
    assert_eq!(label(key, "method"), Some("GET"));
    assert_eq!(label(key, "route"), Some("/"));
    assert_eq!(histogram_len(&entries, REQUEST_DURATION, "500"), 1);

    // Healthy path: counted under its own status label. The first
    // snapshot drained its histogram samples; only new ones show here.
    let source = Arc::new(FakeSource::new(vec![Step::Ok]));
    let app = gated_router(source, config, Arc::new(AtomicUsize::new(0)))
        .layer(from_fn(track_requests));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let entries = snapshotter.snapshot().into_vec();
    let (_, count) = find_counter(&entries, REQUESTS_TOTAL, "200").expect("success counted");
    assert_eq!(count, 1);
    let (_, count) =
        find_counter(&entries, REQUESTS_TOTAL, "500").expect("abort count unchanged");
    assert_eq!(count, 1);
    assert_eq!(histogram_len(&entries, REQUEST_DURATION, "200"), 1);
}
