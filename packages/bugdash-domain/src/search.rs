use std::{fmt, sync::Arc};

use time::OffsetDateTime;

use crate::bug::Bug;

/// The tracker-side half of a search descriptor. This value alone
/// determines which remote query runs; everything else is local.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SearchSpec {
	GithubRepo { user: String, project: String },
	BugzillaComponent { product: String, component: String },
	BugzillaAssignees { assignees: Vec<String> },
	BugzillaMentors { mentors: Vec<String> },
	BugzillaWhiteboard { whiteboard_content: String },
}

/// Caller-supplied predicate for the filter pipeline. Only reachable through
/// the library API; it has no wire representation.
#[derive(Clone)]
pub struct CustomFilter(Arc<dyn Fn(&Bug) -> bool + Send + Sync>);
impl CustomFilter {
	pub fn new<F>(predicate: F) -> Self
	where
		F: Fn(&Bug) -> bool + Send + Sync + 'static,
	{
		Self(Arc::new(predicate))
	}

	pub fn matches(&self, bug: &Bug) -> bool {
		(self.0)(bug)
	}
}
impl fmt::Debug for CustomFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("CustomFilter")
	}
}

/// Recognized filter options. Remote-capable options narrow the Bugzilla
/// query; the rest narrow the batch locally after the fetch. Every option is
/// a no-op while unset, and unknown keys are dropped during deserialization.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filters {
	pub open: Option<bool>,
	pub priority: Option<u8>,
	pub unprioritized: Option<bool>,
	pub is_assigned: Option<bool>,
	pub assignees: Option<Vec<String>>,
	pub is_pull_request: Option<bool>,
	pub whiteboard: Option<String>,
	pub not_whiteboard: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub last_change_time: Option<OffsetDateTime>,
	#[serde(skip)]
	pub custom: Option<CustomFilter>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchDescriptor {
	pub search: SearchSpec,
	#[serde(default)]
	pub filters: Option<Filters>,
}
