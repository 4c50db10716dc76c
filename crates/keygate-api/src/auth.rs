//! # API Key Authentication Middleware
//!
//! Plugs [`keygate_core::KeyValidator`] into the Axum request pipeline.
//!
//! ## Credential Location
//!
//! ```text
//! X-API-Key: {key}          — checked first (header name configurable)
//! ?api_key={key}            — fallback when the header is absent (optional)
//! ```
//!
//! ## Outcome
//!
//! - Accepted: an [`AuthenticatedCaller`] is injected into the request
//!   extensions and the request continues.
//! - Rejected: `401 Unauthorized` with `WWW-Authenticate: ApiKey`. The
//!   rejection reason is logged, not returned.

use axum::extract::{Query, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use keygate_core::{Identity, KeyError, KeyValidator, Verdict};

use crate::config::ApiKeyAuthOptions;
use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;

/// Message returned for every rejected credential.
const UNAUTHORIZED_MESSAGE: &str = "a valid API key is required";

// ── ApiKeyAuth ──────────────────────────────────────────────────────────────

/// The authentication scheme as installed on the router: a validator
/// holding the expected key, plus where to look for the credential.
///
/// Built once at startup and injected via `axum::Extension`.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    validator: KeyValidator,
    header_name: HeaderName,
    query_param: Option<String>,
}

impl ApiKeyAuth {
    /// Build the scheme from resolved options.
    pub fn from_options(options: &ApiKeyAuthOptions) -> Result<Self, KeyError> {
        Ok(Self {
            validator: KeyValidator::from_key(options.api_key.as_str())?,
            header_name: options.header_name.clone(),
            query_param: options.query_param.clone(),
        })
    }

    /// Header inspected for the credential.
    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }

    /// Query parameter inspected when the header is absent, if enabled.
    pub fn query_param(&self) -> Option<&str> {
        self.query_param.as_deref()
    }

    /// Pull the raw credential out of a request.
    ///
    /// A present header always wins, even when its value is not visible
    /// ASCII: such a value yields an empty credential. Query values are
    /// URL-decoded; the first occurrence wins.
    pub fn extract_credential(&self, headers: &HeaderMap, uri: &Uri) -> Option<String> {
        if let Some(value) = headers.get(&self.header_name) {
            return Some(value.to_str().unwrap_or_default().to_string());
        }

        let name = self.query_param.as_deref()?;
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
        pairs.into_iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Extract and validate the credential carried by a request.
    pub fn authenticate(&self, headers: &HeaderMap, uri: &Uri) -> Verdict {
        let credential = self.extract_credential(headers, uri);
        self.validator.validate(credential.as_deref())
    }
}

// ── AuthenticatedCaller ─────────────────────────────────────────────────────

/// Identity of an authenticated caller, available to route handlers via
/// Axum's `FromRequestParts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCaller {
    pub identity: Identity,
}

/// Extracts the identity that the auth middleware injected into extensions.
/// Returns 401 if no identity is present (middleware didn't run or failed).
#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for AuthenticatedCaller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedCaller>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized(UNAUTHORIZED_MESSAGE.into()))
    }
}

// ── Middleware ───────────────────────────────────────────────────────────────

/// Validate the request's API key against the configured key.
///
/// Requires an [`ApiKeyAuth`] extension. Without it every request fails
/// with 500; the middleware never fails open.
pub async fn api_key_middleware(mut request: Request, next: Next) -> Response {
    let Some(auth) = request.extensions().get::<ApiKeyAuth>().cloned() else {
        return AppError::Internal("ApiKeyAuth extension missing from router".into())
            .into_response();
    };
    let metrics = request.extensions().get::<ApiMetrics>().cloned();

    match auth.authenticate(request.headers(), request.uri()) {
        Verdict::Accepted(identity) => {
            if let Some(m) = &metrics {
                m.record_accepted();
            }
            tracing::debug!(label = identity.label, "api key accepted");
            request
                .extensions_mut()
                .insert(AuthenticatedCaller { identity });
            next.run(request).await
        }
        Verdict::Rejected(reason) => {
            if let Some(m) = &metrics {
                m.record_rejected(reason);
            }
            tracing::warn!(
                reason = %reason,
                path = %request.uri().path(),
                "authentication failed"
            );
            AppError::Unauthorized(UNAUTHORIZED_MESSAGE.into()).into_response()
        }
    }
}
