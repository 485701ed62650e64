//! Observability helpers for handshake legs.
//!
//! - Every leg runs inside a `tracing` span named `oauth1_handshake.flow` with the `leg` and
//!   `stage` fields, and state transitions are emitted as `debug` events.
//! - Credential diagnostics (temporary and permanent tokens) are logged at `info` under the
//!   `oauth1_handshake::diagnostics` target so they can be filtered independently.
//! - Enable `metrics` to increment the `oauth1_handshake_flow_total` counter for every
//!   attempt/success/failure, labeled by `leg` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// The two HTTP-facing legs of the handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandshakeLeg {
	/// Request-token acquisition followed by the authorize redirect.
	Initiate,
	/// Callback parsing followed by the access-token exchange.
	Callback,
}
impl HandshakeLeg {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HandshakeLeg::Initiate => "initiate",
			HandshakeLeg::Callback => "callback",
		}
	}
}
impl Display for HandshakeLeg {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Per-flow state machine; `AccessTokenIssued` and `Failed` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandshakeState {
	/// Nothing has been requested yet.
	Start,
	/// The provider issued a temporary credential and the user was redirected.
	RequestTokenIssued,
	/// The provider redirected the user back with a token and verifier.
	CallbackReceived,
	/// The provider issued the permanent credential.
	AccessTokenIssued,
	/// Upstream rejection or malformed callback input ended the flow.
	Failed,
}
impl HandshakeState {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HandshakeState::Start => "start",
			HandshakeState::RequestTokenIssued => "request_token_issued",
			HandshakeState::CallbackReceived => "callback_received",
			HandshakeState::AccessTokenIssued => "access_token_issued",
			HandshakeState::Failed => "failed",
		}
	}

	/// Whether the flow can make no further progress from this state.
	pub const fn is_terminal(self) -> bool {
		matches!(self, HandshakeState::AccessTokenIssued | HandshakeState::Failed)
	}
}
impl Display for HandshakeState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a handshake leg.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
