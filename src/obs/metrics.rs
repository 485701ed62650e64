// self
use crate::obs::{FlowOutcome, HandshakeLeg};

/// Counts a leg attempt or result under `oauth1_handshake_flow_total{leg, outcome}`.
pub fn record_flow_outcome(leg: HandshakeLeg, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth1_handshake_flow_total",
			"leg" => leg.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (leg, outcome);
	}
}

/// Counts non-2xx provider answers under
/// `oauth1_handshake_upstream_rejections_total{endpoint, status}`.
pub fn record_upstream_rejection(endpoint: &'static str, status: u16) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth1_handshake_upstream_rejections_total",
			"endpoint" => endpoint,
			"status" => status.to_string()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (endpoint, status);
	}
}
