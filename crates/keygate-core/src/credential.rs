//! # Credential & Expected Key Newtypes
//!
//! Two sides of one comparison: the [`Credential`] a caller presents on a
//! single request, and the [`ExpectedKey`] the process was configured with.
//!
//! ## Security Invariant
//!
//! Neither type ever prints its contents. `Debug` output is redacted so a
//! stray `{:?}` in a log line cannot leak key material.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::KeyError;

// ── Credential ──────────────────────────────────────────────────────────────

/// Caller-supplied key material, borrowed from the inbound request.
///
/// Always non-empty: an absent or empty value has no `Credential`
/// representation, see [`Credential::from_raw`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credential<'a>(&'a str);

impl<'a> Credential<'a> {
    /// Wrap raw request material. Returns `None` when the caller supplied
    /// nothing or an empty string.
    pub fn from_raw(raw: Option<&'a str>) -> Option<Self> {
        raw.filter(|s| !s.is_empty()).map(Self)
    }

    /// Return the credential as bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Credential<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}

// ── ExpectedKey ─────────────────────────────────────────────────────────────

/// The single secret this process was configured with.
///
/// Loaded once at startup and never mutated. The backing memory is
/// zeroized when the key is dropped at shutdown.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ExpectedKey(String);

impl ExpectedKey {
    /// Create an expected key. Rejects the empty string.
    pub fn new(key: impl Into<String>) -> Result<Self, KeyError> {
        let key = key.into();
        if key.is_empty() {
            return Err(KeyError::EmptyKey);
        }
        Ok(Self(key))
    }

    /// Length of the key in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; an empty key cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact, case-sensitive, constant-time comparison against a credential.
    pub fn matches(&self, credential: Credential<'_>) -> bool {
        constant_time_eq(credential.as_bytes(), self.0.as_bytes())
    }
}

impl fmt::Debug for ExpectedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExpectedKey").field(&"[REDACTED]").finish()
    }
}

/// Constant-time byte comparison.
///
/// When lengths differ, performs a dummy comparison over the expected bytes
/// so the rejection path costs roughly the same as a full comparison.
fn constant_time_eq(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}
