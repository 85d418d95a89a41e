use axum::{Router, http::StatusCode, routing::get};

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check. Services without external
/// dependencies to probe are ready as soon as they listen.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// `/healthz` + `/readyz`, mergeable into any service router.
pub fn health_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
