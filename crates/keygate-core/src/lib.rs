//! # keygate-core — API Key Validation
//!
//! The one piece of real logic behind keygate's authentication scheme:
//! compare a caller-supplied credential against the key configured at
//! startup and return a [`Verdict`].
//!
//! ## Key Design Principles
//!
//! 1. **Pure validation.** [`validate`] is a function of its two inputs.
//!    No hidden state, no I/O, no side effects beyond the verdict.
//!
//! 2. **Newtypes for secrets.** [`ExpectedKey`] rejects empty values at
//!    construction, redacts itself in `Debug`, and zeroizes on drop.
//!    [`Credential`] cannot be constructed from an empty string.
//!
//! 3. **Constant-time comparison.** Key bytes are compared with
//!    `subtle::ConstantTimeEq`, so the comparison time does not depend on
//!    the position of the first differing byte.
//!
//! ## Crate Policy
//!
//! - No web framework dependencies. The host maps verdicts to HTTP.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod credential;
pub mod error;
pub mod validator;
pub mod verdict;

// Re-export primary types for ergonomic imports.
pub use credential::{Credential, ExpectedKey};
pub use error::KeyError;
pub use validator::{validate, KeyValidator};
pub use verdict::{Identity, RejectReason, Verdict, AUTHENTICATED_LABEL, SCHEME_NAME};
