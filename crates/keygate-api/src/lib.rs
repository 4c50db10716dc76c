//! # keygate-api — API Key Authentication for Axum
//!
//! Wires [`keygate_core`] into an Axum application: the expected key is
//! loaded once at startup, captured in an [`auth::ApiKeyAuth`] value, and
//! checked on every request by [`auth::api_key_middleware`].
//!
//! ## API Surface
//!
//! | Path                 | Auth | Module                  |
//! |----------------------|------|-------------------------|
//! | `/health/liveness`   | no   | this module             |
//! | `/health/readiness`  | no   | this module             |
//! | `/openapi.json`      | no   | [`openapi`]             |
//! | `/v1/whoami`         | yes  | [`routes::identity`]    |
//! | `/v1/metrics`        | yes  | [`routes::metrics`]     |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → ApiKeyMiddleware → Handler
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use axum::http::Uri;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes and the OpenAPI document are mounted outside the auth
/// middleware so they remain accessible without credentials. Unknown paths
/// get a structured 404 without a key check.
pub fn app(state: AppState) -> Router {
    // Authenticated API routes.
    let api = Router::new()
        .merge(routes::identity::router())
        .merge(routes::metrics::router())
        .layer(from_fn(auth::api_key_middleware))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(axum::Extension(state.auth.clone()))
        .layer(axum::Extension(state.metrics.clone()))
        .with_state(state.clone());

    // Unauthenticated routes.
    let public = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(openapi::router())
        .with_state(state);

    Router::new()
        .merge(public)
        .merge(api)
        .fallback(not_found)
        .layer(middleware::tracing_layer::layer())
}

/// Fallback for unmatched paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — the key is validated before the router exists, so a
/// running router is ready.
async fn readiness() -> &'static str {
    "ready"
}
