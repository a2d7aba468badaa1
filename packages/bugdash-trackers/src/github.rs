use std::time::Duration;

use reqwest::{
	Client,
	header::{ACCEPT, USER_AGENT},
};
use serde::Deserialize;

use crate::error::Result;
use bugdash_config::GithubConfig;
use bugdash_domain::{Bug, Filters, GithubIssue, bug};

/// State selector for the issue list call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueState {
	Open,
	Closed,
}
impl IssueState {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Open => "open",
			Self::Closed => "closed",
		}
	}
}

/// Only an explicit `open: true` reads the open set; absent filters and
/// `open: false` both read the closed one.
pub fn issue_state(filters: Option<&Filters>) -> IssueState {
	if filters.and_then(|filters| filters.open) == Some(true) {
		IssueState::Open
	} else {
		IssueState::Closed
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueRecord {
	pub id: u64,
	pub title: String,
	pub html_url: String,
	#[serde(default)]
	pub labels: Vec<LabelRecord>,
	pub assignee: Option<UserRecord>,
	pub user: Option<UserRecord>,
	// Present on pull requests only; the payload inside is irrelevant.
	pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelRecord {
	pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
	pub login: String,
}

pub async fn list_issues(
	cfg: &GithubConfig,
	user: &str,
	project: &str,
	state: IssueState,
) -> Result<Vec<IssueRecord>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/repos/{user}/{project}/issues", cfg.api_base);
	let mut req = client
		.get(url)
		.header(USER_AGENT, &cfg.user_agent)
		.header(ACCEPT, "application/vnd.github+json")
		.query(&[("state", state.as_str())]);

	if let Some(token) = cfg.token.as_deref() {
		req = req.bearer_auth(token);
	}

	let records = req.send().await?.error_for_status()?.json().await?;

	Ok(records)
}

/// Folds a raw issue into the unified shape. Pull requests without an
/// assignee borrow their author, and gain a synthetic `pr` label.
pub fn normalize_issue(record: IssueRecord, project: &str) -> Bug {
	let is_pull_request = record.pull_request.is_some();
	let mut labels = record.labels.into_iter().map(|label| label.name).collect::<Vec<_>>();
	let assignee = match (record.assignee, is_pull_request, record.user) {
		(Some(assignee), _, _) => Some(assignee.login),
		(None, true, Some(author)) => Some(author.login),
		_ => None,
	};
	let priority = labels.iter().find_map(|label| bug::priority_from_label(label));

	if is_pull_request {
		labels.push("pr".to_string());
	}

	Bug::Github(GithubIssue {
		id: format!("gh:{}", record.id),
		title: record.title,
		url: record.html_url,
		assignee,
		labels,
		priority,
		project: project.to_string(),
		is_pull_request,
	})
}
