use std::sync::{Arc, atomic::Ordering};

use bugdash_domain::{Bug, SearchDescriptor};
use bugdash_service::Trackers;
use bugdash_testkit::{SpyBugzilla, StubGithub, bug_record};
use bugdash_trackers::BugRecord;

fn records() -> Vec<BugRecord> {
	let mut urgent = bug_record(100, "Crash on startup");

	urgent.priority = Some("P1".to_string());

	let mut planned = bug_record(101, "Search bar flickers");

	planned.priority = Some("P2".to_string());

	vec![urgent, planned, bug_record(102, "Telemetry gap")]
}

async fn solo_find(descriptor: &SearchDescriptor) -> Vec<Bug> {
	let bugzilla = Arc::new(SpyBugzilla::new(records()));
	let service =
		super::build_service(Trackers::new(Arc::new(StubGithub::new(Vec::new())), bugzilla));

	service.find_bugs(std::slice::from_ref(descriptor)).await.expect("Solo find failed.")
}

#[tokio::test]
async fn local_filter_variants_share_one_fetch_without_changing_results() {
	let all = super::descriptor(serde_json::json!({
		"search": { "type": "bugzillaComponent", "product": "Firefox", "component": "Search" }
	}));
	let untriaged = super::descriptor(serde_json::json!({
		"search": { "type": "bugzillaComponent", "product": "Firefox", "component": "Search" },
		"filters": { "unprioritized": true }
	}));
	let solo_all = solo_find(&all).await;
	let solo_untriaged = solo_find(&untriaged).await;
	let bugzilla = Arc::new(SpyBugzilla::new(records()));
	let calls = bugzilla.calls.clone();
	let service =
		super::build_service(Trackers::new(Arc::new(StubGithub::new(Vec::new())), bugzilla));
	let shared_all = service.find_bugs(&[all]).await.expect("First shared find failed.");
	let shared_untriaged =
		service.find_bugs(&[untriaged]).await.expect("Second shared find failed.");
	let untriaged_ids = shared_untriaged.iter().map(|bug| bug.id()).collect::<Vec<_>>();

	// Sharing a batch across filter variants never leaks one variant's view into the other.
	assert_eq!(shared_all, solo_all);
	assert_eq!(shared_untriaged, solo_untriaged);
	assert_eq!(shared_all.len(), 3);
	assert_eq!(untriaged_ids, ["bz:102"]);
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}
