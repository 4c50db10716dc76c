//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into an OpenAPI document served
//! at `/openapi.json`. The `api_key` security scheme is filled in at runtime
//! so it names the header the server was actually configured with.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::ApiKeyAuth;
use crate::state::AppState;

/// Static part of the OpenAPI document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "keygate",
        version = "0.1.0",
        description = "API key authenticated service.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::identity::whoami,
        crate::routes::metrics::metrics,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::identity::WhoAmIResponse,
        crate::middleware::metrics::MetricsSnapshot,
    )),
    tags(
        (name = "identity", description = "Authenticated identity"),
        (name = "metrics", description = "Request and verdict counters"),
    )
)]
pub struct ApiDoc;

/// Build the full document for the given authentication scheme.
pub fn document(auth: &ApiKeyAuth) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let components = doc
        .components
        .get_or_insert_with(|| utoipa::openapi::ComponentsBuilder::new().build());
    components.add_security_scheme(
        "api_key",
        SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
            auth.header_name().as_str(),
        ))),
    );
    doc
}

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(document(&state.auth))
}
