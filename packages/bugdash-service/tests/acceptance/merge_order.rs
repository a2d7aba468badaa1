use std::{
	collections::VecDeque,
	sync::{Arc, Mutex},
};

use bugdash_config::BugzillaConfig;
use bugdash_service::{BoxFuture, BugzillaApi, Trackers};
use bugdash_testkit::{StubGithub, bug_record};
use bugdash_trackers::{BugRecord, BugzillaQuery, Result};

/// Answers successive searches with successive batches.
struct SequencedBugzilla {
	batches: Mutex<VecDeque<Vec<BugRecord>>>,
}
impl SequencedBugzilla {
	fn new(batches: Vec<Vec<BugRecord>>) -> Self {
		Self { batches: Mutex::new(batches.into()) }
	}
}
impl BugzillaApi for SequencedBugzilla {
	fn search_bugs<'a>(
		&'a self,
		_cfg: &'a BugzillaConfig,
		_query: &'a BugzillaQuery,
	) -> BoxFuture<'a, Result<Vec<BugRecord>>> {
		let batch = self
			.batches
			.lock()
			.expect("Batch queue poisoned.")
			.pop_front()
			.expect("More fetches than prepared batches.");

		Box::pin(async move { Ok(batch) })
	}
}

#[tokio::test]
async fn overlapping_searches_keep_first_position_and_last_data() {
	let mut retitled = bug_record(100, "Crash on startup, now with logs");

	retitled.priority = Some("P1".to_string());

	let bugzilla = Arc::new(SequencedBugzilla::new(vec![
		vec![bug_record(100, "Crash on startup"), bug_record(101, "Search bar flickers")],
		vec![bug_record(102, "Telemetry gap"), retitled],
	]));
	let service =
		super::build_service(Trackers::new(Arc::new(StubGithub::new(Vec::new())), bugzilla));
	let searches = vec![
		super::descriptor(serde_json::json!({
			"search": { "type": "bugzillaComponent", "product": "Firefox", "component": "Search" }
		})),
		super::descriptor(serde_json::json!({
			"search": { "type": "bugzillaComponent", "product": "Firefox", "component": "Address Bar" }
		})),
	];
	let bugs = service.find_bugs(&searches).await.expect("Find failed.");
	let ids = bugs.iter().map(|bug| bug.id()).collect::<Vec<_>>();

	// A bug seen twice stays where it first appeared but carries the later data.
	assert_eq!(ids, ["bz:100", "bz:101", "bz:102"]);
	assert_eq!(bugs[0].title(), "Crash on startup, now with logs");
	assert_eq!(bugs[0].priority(), Some(1));
}
