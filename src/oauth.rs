//! OAuth 1.0a request signing (RFC 5849 §3).
//!
//! [`signature`] holds the pure pieces (percent encoding, base string construction, and the
//! `HMAC-SHA1`/`HMAC-SHA256`/`PLAINTEXT` methods) while [`signer`] assembles protocol
//! parameters, nonces, and timestamps into an `Authorization: OAuth ...` header.

pub mod signature;
pub mod signer;

pub use signature::*;
pub use signer::*;
