//! # Identity Routes
//!
//! Reports the identity the authentication scheme attached to the request.

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthenticatedCaller;
use crate::state::AppState;

/// Identity of the calling client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WhoAmIResponse {
    /// Authentication scheme that accepted the request.
    pub scheme: String,
    /// Identity label. Every holder of the key shares the same label.
    pub label: String,
}

/// Build the identity router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/whoami", get(whoami))
}

/// GET /v1/whoami — Return the authenticated identity.
#[utoipa::path(
    get,
    path = "/v1/whoami",
    tag = "identity",
    responses(
        (status = 200, description = "Caller is authenticated", body = WhoAmIResponse),
        (status = 401, description = "Missing or invalid API key", body = crate::error::ErrorBody),
    ),
    security(("api_key" = []))
)]
pub async fn whoami(caller: AuthenticatedCaller) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse {
        scheme: caller.identity.scheme.to_string(),
        label: caller.identity.label.to_string(),
    })
}
