//! Prometheus metrics: HTTP request instrumentation plus registration
//! workflow counters. Everything is a no-op when `OBSERVABILITY_ENABLED` is
//! `false` or `0`.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `Ok(None)` when observability is disabled.
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router serving the Prometheus scrape endpoint.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_enrollment() {
    if !is_observability_enabled() {
        return;
    }
    counter!("course_enrollments_total").increment(1);
}

pub fn track_withdrawal() {
    if !is_observability_enabled() {
        return;
    }
    counter!("course_withdrawals_total").increment(1);
}

pub fn track_registration_confirmed() {
    if !is_observability_enabled() {
        return;
    }
    counter!("registrations_confirmed_total").increment(1);
}

/// Rejected enrollment attempts, labelled by error kind.
pub fn track_enrollment_rejected(reason: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("course_enrollments_rejected_total", "reason" => reason).increment(1);
}

pub fn track_semester_rollover(students: usize, enrolled_courses: usize) {
    if !is_observability_enabled() {
        return;
    }
    counter!("semester_rollovers_total").increment(1);
    counter!("rollover_students_total").increment(students as u64);
    counter!("rollover_enrolled_courses_total").increment(enrolled_courses as u64);
}
