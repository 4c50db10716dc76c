//! # Verdicts
//!
//! The outcome of one validation call. The host framework translates a
//! [`Verdict`] into its own response: continue with an [`Identity`] attached,
//! or reject with 401.

/// Name of the authentication scheme, used for the challenge header and the
/// identity attached to accepted callers.
pub const SCHEME_NAME: &str = "ApiKey";

/// Identity label assigned to every accepted caller. There is one shared
/// key, so there is no per-caller identity to report.
pub const AUTHENTICATED_LABEL: &str = "authenticated";

/// Identity attached to an accepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Authentication scheme that produced this identity.
    pub scheme: &'static str,
    /// Generic label marking the caller as authenticated.
    pub label: &'static str,
}

impl Identity {
    /// The fixed identity granted to any holder of the configured key.
    pub const fn authenticated() -> Self {
        Self {
            scheme: SCHEME_NAME,
            label: AUTHENTICATED_LABEL,
        }
    }
}

/// Why a credential was rejected.
///
/// Both reasons are terminal and non-retryable. The reason is meant for
/// logs; it is not part of the wire response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The caller supplied no key material, or an empty string.
    MissingCredential,
    /// The supplied key does not equal the configured key.
    KeyMismatch,
}

impl RejectReason {
    /// Stable machine-readable code for this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::KeyMismatch => "key_mismatch",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication verdict for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The credential matched the configured key.
    Accepted(Identity),
    /// The credential was missing or did not match.
    Rejected(RejectReason),
}

impl Verdict {
    /// Whether the verdict accepts the caller.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}
