//! Temporary and permanent OAuth1 credentials plus the redacting secret wrapper.

pub mod credential;
pub mod secret;
