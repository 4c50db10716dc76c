//! # Request Metrics
//!
//! In-process atomic counters for requests and authentication verdicts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use keygate_core::RejectReason;
use serde::Serialize;
use utoipa::ToSchema;

/// Shared metrics state.
#[derive(Debug, Clone, Default)]
pub struct ApiMetrics {
    request_count: Arc<AtomicU64>,
    accepted_count: Arc<AtomicU64>,
    missing_count: Arc<AtomicU64>,
    mismatch_count: Arc<AtomicU64>,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct MetricsSnapshot {
    /// Requests seen by the authenticated router.
    pub requests: u64,
    /// Requests whose API key was accepted.
    pub accepted: u64,
    /// Requests rejected for any reason.
    pub rejected: u64,
    /// Requests rejected because no key was supplied.
    pub missing_credential: u64,
    /// Requests rejected because the key did not match.
    pub key_mismatch: u64,
}

impl ApiMetrics {
    /// Create a new metrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted credential.
    pub fn record_accepted(&self) {
        self.accepted_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected credential.
    pub fn record_rejected(&self, reason: RejectReason) {
        let counter = match reason {
            RejectReason::MissingCredential => &self.missing_count,
            RejectReason::KeyMismatch => &self.mismatch_count,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let missing_credential = self.missing_count.load(Ordering::Relaxed);
        let key_mismatch = self.mismatch_count.load(Ordering::Relaxed);
        MetricsSnapshot {
            requests: self.request_count.load(Ordering::Relaxed),
            accepted: self.accepted_count.load(Ordering::Relaxed),
            rejected: missing_credential + key_mismatch,
            missing_credential,
            key_mismatch,
        }
    }
}

/// Middleware that increments the request counter.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    if let Some(m) = request.extensions().get::<ApiMetrics>() {
        m.request_count.fetch_add(1, Ordering::Relaxed);
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let snap = ApiMetrics::new().snapshot();
        assert_eq!(snap.requests, 0);
        assert_eq!(snap.accepted, 0);
        assert_eq!(snap.rejected, 0);
    }

    #[test]
    fn rejections_split_by_reason() {
        let metrics = ApiMetrics::new();
        metrics.record_rejected(RejectReason::MissingCredential);
        metrics.record_rejected(RejectReason::KeyMismatch);
        metrics.record_rejected(RejectReason::KeyMismatch);
        metrics.record_accepted();

        let snap = metrics.snapshot();
        assert_eq!(snap.accepted, 1);
        assert_eq!(snap.rejected, 3);
        assert_eq!(snap.missing_credential, 1);
        assert_eq!(snap.key_mismatch, 2);
    }

    #[test]
    fn clones_share_counters() {
        let metrics = ApiMetrics::new();
        metrics.clone().record_accepted();
        assert_eq!(metrics.snapshot().accepted, 1);
    }
}
