//! # Middleware
//!
//! Tower/Axum middleware shared by the router. Authentication lives in
//! [`crate::auth`].

pub mod metrics;
pub mod tracing_layer;
