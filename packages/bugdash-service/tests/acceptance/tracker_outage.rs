use std::sync::{Arc, atomic::Ordering};

use bugdash_service::{ServiceError, Trackers};
use bugdash_testkit::{
	FailingBugzilla, FailingGithub, StubBugzilla, StubGithub, bug_record, issue_record,
};

#[tokio::test]
async fn a_github_outage_degrades_to_the_bugzilla_results() {
	let github = Arc::new(FailingGithub::new());
	let github_calls = github.calls.clone();
	let bugzilla = Arc::new(StubBugzilla::new(vec![bug_record(100, "Crash on startup")]));
	let service = super::build_service(Trackers::new(github, bugzilla));
	let searches = vec![
		super::descriptor(serde_json::json!({
			"search": { "type": "githubRepo", "user": "mozilla", "project": "addons" }
		})),
		super::descriptor(serde_json::json!({
			"search": { "type": "bugzillaComponent", "product": "Firefox", "component": "Search" }
		})),
	];
	let first = service.find_bugs(&searches).await.expect("First find failed.");
	let ids = first.iter().map(|bug| bug.id()).collect::<Vec<_>>();

	assert_eq!(ids, ["bz:100"]);

	// The empty batch is memoized like any other; the outage is not retried.
	let second = service.find_bugs(&searches).await.expect("Second find failed.");

	assert_eq!(second, first);
	assert_eq!(github_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn a_bugzilla_outage_fails_the_whole_find() {
	let github = Arc::new(StubGithub::new(vec![issue_record(1, "Fix searchbox")]));
	let bugzilla = Arc::new(FailingBugzilla::new());
	let service = super::build_service(Trackers::new(github, bugzilla));
	let searches = vec![
		super::descriptor(serde_json::json!({
			"search": { "type": "githubRepo", "user": "mozilla", "project": "addons" }
		})),
		super::descriptor(serde_json::json!({
			"search": { "type": "bugzillaComponent", "product": "Firefox", "component": "Search" }
		})),
	];
	let err = service.find_bugs(&searches).await.expect_err("Find should fail.");
	let ServiceError::Tracker(source) = err;

	assert!(source.to_string().contains("Bugzilla is down."));
}

#[tokio::test]
async fn a_bugzilla_outage_is_memoized_and_cleared_by_reset() {
	let bugzilla = Arc::new(FailingBugzilla::new());
	let calls = bugzilla.calls.clone();
	let service =
		super::build_service(Trackers::new(Arc::new(StubGithub::new(Vec::new())), bugzilla));
	let searches = vec![super::descriptor(serde_json::json!({
		"search": { "type": "bugzillaComponent", "product": "Firefox", "component": "Search" }
	}))];

	service.find_bugs(&searches).await.expect_err("First find should fail.");
	service.find_bugs(&searches).await.expect_err("Second find should fail.");

	assert_eq!(calls.load(Ordering::SeqCst), 1);

	let report = service.reset_cache();

	assert_eq!(report.entries_dropped, 1);

	service.find_bugs(&searches).await.expect_err("Post-reset find should fail.");

	assert_eq!(calls.load(Ordering::SeqCst), 2);
}
