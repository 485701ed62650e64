//! Auth-domain identifiers and OAuth1 credential models.

pub mod id;
pub mod token;

pub use id::*;
pub use token::{credential::*, secret::*};
