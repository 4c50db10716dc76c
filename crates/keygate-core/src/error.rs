//! # Error Types
//!
//! Errors raised while constructing validation inputs. Validation itself is
//! total and never errors; rejections are reported through
//! [`Verdict`](crate::Verdict).

use thiserror::Error;

/// Error constructing an [`ExpectedKey`](crate::ExpectedKey).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The configured key is empty. An empty key would make every
    /// credential comparison meaningless.
    #[error("expected API key must not be empty")]
    EmptyKey,
}
