//! # geofence-api: Axum API Services for the Geofence Stack
//!
//! HTTP surface over the geometry validator, the point-containment engine
//! and the zone engine. Zones are loaded once at start-up from a snapshot
//! file into an in-memory repository.
//!
//! ## API Surface
//!
//! | Route                                        | Module                | Operation              |
//! |----------------------------------------------|-----------------------|------------------------|
//! | `POST /v1/geometry/validate`                 | [`routes::geometry`]  | Geometry validation    |
//! | `POST /v1/geometry/contains`                 | [`routes::geometry`]  | Point containment      |
//! | `GET  /v1/tenants/{id}/zones`                | [`routes::tenants`]   | Zone listing           |
//! | `POST /v1/tenants/{id}/delivery-check`       | [`routes::tenants`]   | Delivery enforcement   |
//! | `POST /v1/tenants/{id}/location-check`       | [`routes::tenants`]   | Single-point check     |
//! | `POST /v1/tenants/{id}/zones/validate`       | [`routes::tenants`]   | Zone nesting           |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use geofence_core::ZoneScope;
use geofence_engine::ZoneRepository;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Request body cap.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Assemble the application router with all routes and middleware.
///
/// Health probes and `/metrics` are mounted outside the metrics middleware
/// so scrapes do not count themselves.
pub fn app(state: AppState) -> Router {
    let metrics = state.metrics.clone();
    let metrics_on = state.config.metrics_enabled;

    let mut api = Router::new()
        .merge(routes::geometry::router())
        .merge(routes::tenants::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    if metrics_on {
        api = api
            .route_layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(metrics.clone()));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let mut probes = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if metrics_on {
        probes = probes
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(Extension(metrics));
    }

    let probes = probes.with_state(state);

    Router::new().merge(probes).merge(api)
}

/// GET /metrics: Prometheus scrape endpoint.
///
/// Refreshes zone and tenant gauges from the repository, then encodes the
/// registry in text exposition format.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    metrics.zones().reset();
    for scope in ZoneScope::ALL {
        let total = state.repository.zone_count(scope, false);
        let active = state.repository.zone_count(scope, true);
        metrics
            .zones()
            .with_label_values(&[scope.as_str(), "true"])
            .set(active as f64);
        metrics
            .zones()
            .with_label_values(&[scope.as_str(), "false"])
            .set((total - active) as f64);
    }
    metrics
        .tenants()
        .set(state.repository.tenant_count() as f64);

    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe: 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once the zone repository can be read, 503 otherwise.
///
/// An empty repository is ready: it fails every delivery check closed.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    repository_readiness(state.engine.repository())
}

fn repository_readiness<R: ZoneRepository>(repository: &R) -> (StatusCode, &'static str) {
    match repository.ping() {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::warn!("Zone repository health check failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "zone repository unavailable")
        }
    }
}
