//! Tracker doubles and wire-record builders shared by the service and API
//! test suites. Every double counts its calls; the spy can additionally be
//! gated so a test can observe an in-flight fetch.

use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

use tokio::sync::Semaphore;

use bugdash_config::{BugzillaConfig, GithubConfig};
use bugdash_domain::UNASSIGNED_ACCOUNT;
use bugdash_service::{BoxFuture, BugzillaApi, GithubApi};
use bugdash_trackers::{
	BugRecord, BugzillaQuery, Error, IssueRecord, IssueState, LabelRecord, Result, UserRecord,
	bugzilla::{NO_POINTS, NO_PRIORITY},
};

/// GitHub double answering every list call with the same records.
pub struct StubGithub {
	pub records: Vec<IssueRecord>,
	pub calls: Arc<AtomicUsize>,
}
impl StubGithub {
	pub fn new(records: Vec<IssueRecord>) -> Self {
		Self { records, calls: Arc::new(AtomicUsize::new(0)) }
	}
}
impl GithubApi for StubGithub {
	fn list_issues<'a>(
		&'a self,
		_cfg: &'a GithubConfig,
		_user: &'a str,
		_project: &'a str,
		_state: IssueState,
	) -> BoxFuture<'a, Result<Vec<IssueRecord>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move { Ok(self.records.clone()) })
	}
}

/// GitHub double failing every call, for outage degradation tests.
#[derive(Default)]
pub struct FailingGithub {
	pub calls: Arc<AtomicUsize>,
}
impl FailingGithub {
	pub fn new() -> Self {
		Self::default()
	}
}
impl GithubApi for FailingGithub {
	fn list_issues<'a>(
		&'a self,
		_cfg: &'a GithubConfig,
		_user: &'a str,
		_project: &'a str,
		_state: IssueState,
	) -> BoxFuture<'a, Result<Vec<IssueRecord>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async { Err(Error::Api { message: "GitHub is down.".to_string() }) })
	}
}

/// Bugzilla double answering every search with the same records.
pub struct StubBugzilla {
	pub records: Vec<BugRecord>,
	pub calls: Arc<AtomicUsize>,
}
impl StubBugzilla {
	pub fn new(records: Vec<BugRecord>) -> Self {
		Self { records, calls: Arc::new(AtomicUsize::new(0)) }
	}
}
impl BugzillaApi for StubBugzilla {
	fn search_bugs<'a>(
		&'a self,
		_cfg: &'a BugzillaConfig,
		_query: &'a BugzillaQuery,
	) -> BoxFuture<'a, Result<Vec<BugRecord>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move { Ok(self.records.clone()) })
	}
}

/// Bugzilla double recording the queries it saw. With a gate set, each
/// fetch counts itself and then waits for a permit before answering.
pub struct SpyBugzilla {
	pub records: Vec<BugRecord>,
	pub calls: Arc<AtomicUsize>,
	pub gate: Option<Arc<Semaphore>>,
}
impl SpyBugzilla {
	pub fn new(records: Vec<BugRecord>) -> Self {
		Self { records, calls: Arc::new(AtomicUsize::new(0)), gate: None }
	}

	pub fn gated(records: Vec<BugRecord>, gate: Arc<Semaphore>) -> Self {
		Self { records, calls: Arc::new(AtomicUsize::new(0)), gate: Some(gate) }
	}
}
impl BugzillaApi for SpyBugzilla {
	fn search_bugs<'a>(
		&'a self,
		_cfg: &'a BugzillaConfig,
		_query: &'a BugzillaQuery,
	) -> BoxFuture<'a, Result<Vec<BugRecord>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			if let Some(gate) = &self.gate {
				let _permit = gate.acquire().await;
			}

			Ok(self.records.clone())
		})
	}
}

/// Bugzilla double failing every call, for fatal-error propagation tests.
#[derive(Default)]
pub struct FailingBugzilla {
	pub calls: Arc<AtomicUsize>,
}
impl FailingBugzilla {
	pub fn new() -> Self {
		Self::default()
	}
}
impl BugzillaApi for FailingBugzilla {
	fn search_bugs<'a>(
		&'a self,
		_cfg: &'a BugzillaConfig,
		_query: &'a BugzillaQuery,
	) -> BoxFuture<'a, Result<Vec<BugRecord>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async { Err(Error::Api { message: "Bugzilla is down.".to_string() }) })
	}
}

/// Minimal GitHub issue record; tests adjust fields as needed.
pub fn issue_record(id: u64, title: &str) -> IssueRecord {
	IssueRecord {
		id,
		title: title.to_string(),
		html_url: format!("https://github.com/mozilla/addons/issues/{id}"),
		labels: Vec::new(),
		assignee: None,
		user: Some(UserRecord { login: "reporter".to_string() }),
		pull_request: None,
	}
}

pub fn labeled_issue_record(id: u64, title: &str, labels: &[&str]) -> IssueRecord {
	IssueRecord {
		labels: labels.iter().map(|name| LabelRecord { name: name.to_string() }).collect(),
		..issue_record(id, title)
	}
}

pub fn pull_request_record(id: u64, title: &str) -> IssueRecord {
	IssueRecord {
		html_url: format!("https://github.com/mozilla/addons/pull/{id}"),
		pull_request: Some(serde_json::json!({})),
		..issue_record(id, title)
	}
}

/// Minimal Bugzilla bug record with untriaged-open defaults.
pub fn bug_record(id: u64, summary: &str) -> BugRecord {
	BugRecord {
		id,
		summary: summary.to_string(),
		whiteboard: String::new(),
		product: "Firefox".to_string(),
		component: "Search".to_string(),
		assigned_to: Some(UNASSIGNED_ACCOUNT.to_string()),
		cf_fx_points: Some(NO_POINTS.to_string()),
		priority: Some(NO_PRIORITY.to_string()),
		mentors: Vec::new(),
		resolution: Some(String::new()),
		severity: Some("S3".to_string()),
		bug_type: Some("defect".to_string()),
		flags: Vec::new(),
	}
}
