use std::sync::{Arc, atomic::Ordering};

use tokio::sync::Semaphore;

use bugdash_service::Trackers;
use bugdash_testkit::{SpyBugzilla, StubGithub, bug_record};

#[tokio::test]
async fn concurrent_finds_share_a_pending_fetch() {
	let gate = Arc::new(Semaphore::new(0));
	let bugzilla = Arc::new(SpyBugzilla::gated(
		vec![bug_record(100, "Crash on startup")],
		gate.clone(),
	));
	let calls = bugzilla.calls.clone();
	let service = Arc::new(super::build_service(Trackers::new(
		Arc::new(StubGithub::new(Vec::new())),
		bugzilla,
	)));
	let searches = vec![super::descriptor(serde_json::json!({
		"search": { "type": "bugzillaComponent", "product": "Firefox", "component": "Search" }
	}))];
	let first = tokio::spawn({
		let service = service.clone();
		let searches = searches.clone();

		async move { service.find_bugs(&searches).await }
	});
	let second = tokio::spawn({
		let service = service.clone();
		let searches = searches.clone();

		async move { service.find_bugs(&searches).await }
	});

	// Wait until the fetch is in flight, then release it.
	while calls.load(Ordering::SeqCst) == 0 {
		tokio::task::yield_now().await;
	}

	gate.add_permits(2);

	let first = first.await.expect("First task panicked.").expect("First find failed.");
	let second = second.await.expect("Second task panicked.").expect("Second find failed.");

	assert_eq!(first, second);
	assert_eq!(first.len(), 1);
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}
