//! # Key Validator
//!
//! Compares a request credential against the configured key.
//!
//! ```
//! use keygate_core::{validate, ExpectedKey, RejectReason, Verdict};
//!
//! let key = ExpectedKey::new("secret123").unwrap();
//! assert!(validate(Some("secret123"), &key).is_accepted());
//! assert_eq!(
//!     validate(Some("secret124"), &key),
//!     Verdict::Rejected(RejectReason::KeyMismatch)
//! );
//! assert_eq!(
//!     validate(None, &key),
//!     Verdict::Rejected(RejectReason::MissingCredential)
//! );
//! ```

use std::sync::Arc;

use crate::credential::{Credential, ExpectedKey};
use crate::error::KeyError;
use crate::verdict::{Identity, RejectReason, Verdict};

/// Validate a raw credential against the expected key.
///
/// Absent or empty credentials are `MissingCredential`. Anything else is
/// compared byte-for-byte, case-sensitively, in constant time.
pub fn validate(credential: Option<&str>, expected: &ExpectedKey) -> Verdict {
    let Some(credential) = Credential::from_raw(credential) else {
        return Verdict::Rejected(RejectReason::MissingCredential);
    };
    if expected.matches(credential) {
        Verdict::Accepted(Identity::authenticated())
    } else {
        Verdict::Rejected(RejectReason::KeyMismatch)
    }
}

/// An expected key captured once at startup, shareable across requests.
///
/// Cloning shares the same key allocation.
#[derive(Debug, Clone)]
pub struct KeyValidator {
    expected: Arc<ExpectedKey>,
}

impl KeyValidator {
    /// Build a validator from an already-validated key.
    pub fn new(expected: ExpectedKey) -> Self {
        Self {
            expected: Arc::new(expected),
        }
    }

    /// Build a validator from a raw configured value.
    pub fn from_key(key: impl Into<String>) -> Result<Self, KeyError> {
        ExpectedKey::new(key).map(Self::new)
    }

    /// Validate one request's credential.
    pub fn validate(&self, credential: Option<&str>) -> Verdict {
        validate(credential, &self.expected)
    }
}
