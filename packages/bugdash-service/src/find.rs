use indexmap::IndexMap;

use crate::{BugdashService, ServiceResult, filter, plan::FetchPlan};
use bugdash_domain::{Bug, SearchDescriptor};
use bugdash_trackers::{Result as TrackerResult, normalize_bug, normalize_issue};

impl BugdashService {
	/// Resolves every descriptor in caller order and merges the filtered
	/// batches into one list. A bug found by several searches appears once,
	/// at the position of its first appearance, carrying the data of its
	/// last.
	///
	/// A GitHub outage degrades that plan to an empty batch; a Bugzilla
	/// failure fails the whole call.
	pub async fn find_bugs(&self, searches: &[SearchDescriptor]) -> ServiceResult<Vec<Bug>> {
		let mut merged = IndexMap::new();

		for descriptor in searches {
			let plan = FetchPlan::for_descriptor(descriptor);
			let batch = self.cache.get_or_fetch(&plan, || self.fetch(&plan)).await?;
			let bugs =
				filter::apply_local_filters(batch.as_ref().clone(), descriptor.filters.as_ref());

			for bug in bugs {
				merged.insert(bug.id().to_string(), bug);
			}
		}

		Ok(merged.into_values().collect())
	}

	async fn fetch(&self, plan: &FetchPlan) -> TrackerResult<Vec<Bug>> {
		match plan {
			FetchPlan::Github { user, project, state } => {
				let listed = self
					.trackers
					.github
					.list_issues(&self.cfg.trackers.github, user, project, *state)
					.await;

				match listed {
					Ok(records) => {
						tracing::debug!(count = records.len(), %project, "Fetched GitHub issues.");

						Ok(records
							.into_iter()
							.map(|record| normalize_issue(record, project))
							.collect())
					},
					Err(err) => {
						tracing::warn!(%err, "Failed to fetch data from GitHub.");

						Ok(Vec::new())
					},
				}
			},
			FetchPlan::Bugzilla(query) => {
				let records =
					self.trackers.bugzilla.search_bugs(&self.cfg.trackers.bugzilla, query).await?;

				tracing::debug!(count = records.len(), "Fetched Bugzilla bugs.");

				Ok(records
					.into_iter()
					.map(|record| normalize_bug(record, &self.cfg.trackers.bugzilla))
					.collect())
			},
		}
	}
}
