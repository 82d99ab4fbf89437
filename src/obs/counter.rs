// self
use crate::obs::{OperationKind, Outcome};

/// Counts a finished operation via the global metrics recorder (when enabled).
pub fn record_outcome(kind: OperationKind, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"bearer_token_handler_operation_total",
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
