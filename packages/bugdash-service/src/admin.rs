use serde::{Deserialize, Serialize};

use crate::BugdashService;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResetReport {
	pub entries_dropped: u64,
}

impl BugdashService {
	/// Clears the fetch cache; the next find for any plan hits the trackers
	/// again.
	pub fn reset_cache(&self) -> ResetReport {
		let entries_dropped = self.cache.reset() as u64;

		tracing::info!(entries_dropped, "Query cache reset.");

		ResetReport { entries_dropped }
	}
}
