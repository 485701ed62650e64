//! Provider-facing descriptors and presets.
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering the three OAuth1
//! endpoints (request token, authorize, access token). `twitter` ships ready-made descriptors
//! for the provider the binary targets by default.

pub mod descriptor;
pub mod twitter;

pub use descriptor::*;
