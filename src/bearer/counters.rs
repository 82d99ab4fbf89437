// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::obs::Outcome;

/// Per-handler tallies of token acquisitions, split along the 401 / -1 classification.
#[derive(Debug, Default)]
pub struct BearerMetrics {
	success: AtomicU64,
	not_authenticated: AtomicU64,
	other_failure: AtomicU64,
}
impl BearerMetrics {
	/// Returns the number of finished acquisitions.
	pub fn attempts(&self) -> u64 {
		self.successes() + self.failures()
	}

	/// Returns the number of acquisitions that wrote a header.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of acquisitions that ended in a required login.
	pub fn not_authenticated(&self) -> u64 {
		self.not_authenticated.load(Ordering::Relaxed)
	}

	/// Returns the number of failed acquisitions of any kind.
	pub fn failures(&self) -> u64 {
		self.not_authenticated() + self.other_failure.load(Ordering::Relaxed)
	}

	pub(crate) fn record(&self, outcome: Outcome) {
		let counter = match outcome {
			Outcome::Success => &self.success,
			Outcome::NotAuthenticated => &self.not_authenticated,
			Outcome::Failure => &self.other_failure,
		};

		counter.fetch_add(1, Ordering::Relaxed);
	}
}
