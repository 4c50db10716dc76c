//! # Route Modules
//!
//! Routes mounted behind the API key middleware.

pub mod identity;
pub mod metrics;
