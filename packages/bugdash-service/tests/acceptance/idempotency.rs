use std::sync::{Arc, atomic::Ordering};

use bugdash_service::Trackers;
use bugdash_testkit::{SpyBugzilla, StubGithub, bug_record};

#[tokio::test]
async fn identical_finds_fetch_once() {
	let bugzilla = Arc::new(SpyBugzilla::new(vec![bug_record(100, "Crash on startup")]));
	let calls = bugzilla.calls.clone();
	let service =
		super::build_service(Trackers::new(Arc::new(StubGithub::new(Vec::new())), bugzilla));
	let searches = vec![super::descriptor(serde_json::json!({
		"search": { "type": "bugzillaComponent", "product": "Firefox", "component": "Search" },
		"filters": { "open": true }
	}))];
	let first = service.find_bugs(&searches).await.expect("First find failed.");
	let second = service.find_bugs(&searches).await.expect("Second find failed.");

	assert_eq!(first.len(), 1);
	assert_eq!(first, second);
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn repeated_descriptors_share_one_fetch() {
	let bugzilla = Arc::new(SpyBugzilla::new(vec![bug_record(100, "Crash on startup")]));
	let calls = bugzilla.calls.clone();
	let service =
		super::build_service(Trackers::new(Arc::new(StubGithub::new(Vec::new())), bugzilla));
	let search = super::descriptor(serde_json::json!({
		"search": { "type": "bugzillaComponent", "product": "Firefox", "component": "Search" }
	}));
	let bugs = service.find_bugs(&[search.clone(), search]).await.expect("Find failed.");

	// The duplicate search adds neither a fetch nor a duplicate bug.
	assert_eq!(bugs.len(), 1);
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}
