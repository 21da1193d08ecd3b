//! # Prometheus Metrics
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded in
//! middleware. Decision counters are recorded by the handlers. Zone gauges
//! are refreshed from the repository on each `/metrics` scrape (pull model),
//! see the metrics handler in `lib.rs`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{
    core::Collector, Encoder, GaugeVec, HistogramOpts, HistogramVec, IntCounterVec, Opts,
    Registry, TextEncoder,
};

/// Shared metrics state backed by a per-instance Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,

    // -- HTTP middleware metrics (push model) --
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,

    // -- Domain metrics --
    decisions_total: IntCounterVec,
    zones: GaugeVec,
    tenants: prometheus::Gauge,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a metrics instance with a fresh registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("geofence_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "geofence_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
            ]),
            &["method", "path"],
        )
        .expect("metric can be created");

        let http_errors_total = IntCounterVec::new(
            Opts::new("geofence_http_errors_total", "Total HTTP errors (4xx and 5xx)"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let decisions_total = IntCounterVec::new(
            Opts::new(
                "geofence_decisions_total",
                "Geofence decisions by operation and outcome",
            ),
            &["operation", "outcome"],
        )
        .expect("metric can be created");

        let zones = GaugeVec::new(
            Opts::new("geofence_zones", "Loaded zones by scope and activity"),
            &["scope", "active"],
        )
        .expect("metric can be created");

        let tenants = prometheus::Gauge::new("geofence_tenants", "Registered tenants")
            .expect("metric can be created");

        for collector in [
            Box::new(http_requests_total.clone()) as Box<dyn Collector>,
            Box::new(http_request_duration_seconds.clone()),
            Box::new(http_errors_total.clone()),
            Box::new(decisions_total.clone()),
            Box::new(zones.clone()),
            Box::new(tenants.clone()),
        ] {
            registry
                .register(collector)
                .expect("metric can be registered");
        }

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                decisions_total,
                zones,
                tenants,
            }),
        }
    }

    /// Total request count across all labels.
    pub fn requests(&self) -> u64 {
        sum_counter(&self.inner.http_requests_total)
    }

    /// Total 4xx/5xx count across all labels.
    pub fn errors(&self) -> u64 {
        sum_counter(&self.inner.http_errors_total)
    }

    /// Count of decisions recorded for one operation and outcome.
    pub fn decisions(&self, operation: &str, outcome: &str) -> u64 {
        self.inner
            .decisions_total
            .with_label_values(&[operation, outcome])
            .get()
    }

    /// Record one geofence decision.
    pub fn record_decision(&self, operation: &str, outcome: &str) {
        self.inner
            .decisions_total
            .with_label_values(&[operation, outcome])
            .inc();
    }

    /// Record an HTTP request (called by the middleware).
    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    /// Zone gauge, labelled by scope and `"true"`/`"false"` activity.
    pub fn zones(&self) -> &GaugeVec {
        &self.inner.zones
    }

    /// Tenant gauge.
    pub fn tenants(&self) -> &prometheus::Gauge {
        &self.inner.tenants
    }

    /// Gather all metrics and encode to Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer)
            .map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn sum_counter(counter: &IntCounterVec) -> u64 {
    counter
        .collect()
        .iter()
        .flat_map(|family| family.get_metric())
        .map(|m| m.get_counter().get_value() as u64)
        .sum()
}

/// Middleware that records HTTP request metrics.
///
/// Mounted with `route_layer`, so the matched route template (e.g.
/// `/v1/tenants/{tenant_id}/delivery-check`) is available and tenant
/// identifiers never become label values.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let duration = start.elapsed().as_secs_f64();
        m.record_request(&method, &path, response.status().as_u16(), duration);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_metrics_start_at_zero() {
        let m = ApiMetrics::new();
        assert_eq!(m.requests(), 0);
        assert_eq!(m.errors(), 0);
    }

    #[test]
    fn errors_count_only_4xx_and_5xx() {
        let m = ApiMetrics::new();
        m.record_request("POST", "/v1/geometry/validate", 200, 0.001);
        m.record_request("POST", "/v1/geometry/contains", 422, 0.001);
        m.record_request("GET", "/v1/tenants/{tenant_id}/zones", 404, 0.001);
        assert_eq!(m.requests(), 3);
        assert_eq!(m.errors(), 2);
    }

    #[test]
    fn decisions_are_labelled() {
        let m = ApiMetrics::new();
        m.record_decision("delivery", "allowed");
        m.record_decision("delivery", "allowed");
        m.record_decision("delivery", "pickup_outside");
        assert_eq!(m.decisions("delivery", "allowed"), 2);
        assert_eq!(m.decisions("delivery", "pickup_outside"), 1);
        assert_eq!(m.decisions("nesting", "unconstrained"), 0);
    }

    #[test]
    fn encoded_output_contains_metric_names() {
        let m = ApiMetrics::new();
        m.record_request("GET", "/health/liveness", 200, 0.0001);
        m.record_decision("location", "allowed");
        m.zones().with_label_values(&["tenant", "true"]).set(3.0);
        let text = m.gather_and_encode().unwrap();
        assert!(text.contains("geofence_http_requests_total"));
        assert!(text.contains("geofence_decisions_total"));
        assert!(text.contains("geofence_zones"));
    }

    #[test]
    fn instances_do_not_share_registries() {
        let a = ApiMetrics::new();
        let b = ApiMetrics::new();
        a.record_request("GET", "/metrics", 200, 0.001);
        assert_eq!(a.requests(), 1);
        assert_eq!(b.requests(), 0);
    }
}
