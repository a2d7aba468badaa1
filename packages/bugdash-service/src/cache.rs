use std::{
	collections::HashMap,
	future::Future,
	sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::OnceCell;

use crate::plan::FetchPlan;
use bugdash_domain::Bug;
use bugdash_trackers::Error;

/// Outcome of one fetch, shared between every descriptor on the same plan.
/// Failures are memoized like successes and stay until the cache is reset.
pub type CachedBatch = Result<Arc<Vec<Bug>>, Arc<Error>>;

/// Memoizes one batch per fetch plan. The first caller for a plan runs the
/// fetch; callers arriving while it is in flight await the same attempt.
/// Nothing is evicted except through [`QueryCache::reset`].
#[derive(Debug, Default)]
pub struct QueryCache {
	entries: Mutex<HashMap<FetchPlan, Arc<OnceCell<CachedBatch>>>>,
}
impl QueryCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn get_or_fetch<F, Fut>(&self, plan: &FetchPlan, fetch: F) -> CachedBatch
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<Vec<Bug>, Error>>,
	{
		// The lock covers only the map access, never the fetch itself.
		let cell = {
			let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

			entries.entry(plan.clone()).or_default().clone()
		};
		let batch =
			cell.get_or_init(|| async { fetch().await.map(Arc::new).map_err(Arc::new) }).await;

		batch.clone()
	}

	pub fn len(&self) -> usize {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
	}

	/// Drops every memoized batch and reports how many plans were cached.
	pub fn reset(&self) -> usize {
		let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
		let dropped = entries.len();

		entries.clear();

		dropped
	}
}
