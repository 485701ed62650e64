//! Public extension contracts for using issued access tokens outside the handshake.
//!
//! The handshake ends with an [`AccessToken`](crate::auth::AccessToken); these traits let
//! downstream code sign protected-resource requests with it using whichever HTTP client they
//! already have. The crate ships an implementation for `reqwest::Request` behind the `reqwest`
//! feature.

pub mod request_signer;

pub use request_signer::*;
