use std::borrow::Cow;

use regex::Regex;

/// Account Bugzilla assigns to bugs nobody has taken.
pub const UNASSIGNED_ACCOUNT: &str = "nobody@mozilla.org";
/// Bugzilla flag type marking a pending "need more information" request.
pub const NEEDINFO_FLAG_TYPE_ID: i64 = 800;

const PRIORITY_LABEL_PATTERN: &str = "^priority:([0-9])$";

pub fn priority_from_label(label: &str) -> Option<u8> {
	let re = Regex::new(PRIORITY_LABEL_PATTERN).ok()?;
	let digit = re.captures(label)?.get(1)?.as_str();

	digit.parse().ok()
}

pub fn is_priority_label(label: &str) -> bool {
	priority_from_label(label).is_some()
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BugFlag {
	#[serde(default)]
	pub type_id: i64,
	pub name: Option<String>,
	pub setter: Option<String>,
	pub requestee: Option<String>,
	pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GithubIssue {
	pub id: String,
	pub title: String,
	pub url: String,
	pub assignee: Option<String>,
	pub labels: Vec<String>,
	pub priority: Option<u8>,
	pub project: String,
	pub is_pull_request: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BugzillaBug {
	pub id: String,
	pub title: String,
	pub url: String,
	pub assignee: Option<String>,
	pub whiteboard: String,
	pub priority: Option<u8>,
	pub points: Option<i64>,
	pub product: String,
	pub component: String,
	pub mentors: Vec<String>,
	pub resolution: Option<String>,
	pub severity: Option<String>,
	pub bug_type: Option<String>,
	pub flags: Vec<BugFlag>,
}

/// One work item normalized across trackers. Loaders construct a value once;
/// afterwards it is only read, filtered, merged, or dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum Bug {
	Github(GithubIssue),
	Bugzilla(BugzillaBug),
}
impl Bug {
	/// Globally unique id: the native id behind a `gh:` or `bz:` prefix.
	pub fn id(&self) -> &str {
		match self {
			Self::Github(issue) => &issue.id,
			Self::Bugzilla(bug) => &bug.id,
		}
	}

	pub fn assignee(&self) -> Option<&str> {
		match self {
			Self::Github(issue) => issue.assignee.as_deref(),
			Self::Bugzilla(bug) => bug.assignee.as_deref(),
		}
	}

	pub fn title(&self) -> &str {
		match self {
			Self::Github(issue) => &issue.title,
			Self::Bugzilla(bug) => &bug.title,
		}
	}

	pub fn url(&self) -> &str {
		match self {
			Self::Github(issue) => &issue.url,
			Self::Bugzilla(bug) => &bug.url,
		}
	}

	/// Bugzilla whiteboards pass through verbatim. GitHub has no whiteboard,
	/// so one is synthesized from the non-priority labels, each wrapped in
	/// brackets and joined with spaces.
	pub fn whiteboard(&self) -> Cow<'_, str> {
		match self {
			Self::Github(issue) => {
				let tags = issue
					.labels
					.iter()
					.filter(|label| !is_priority_label(label))
					.map(|label| format!("[{label}]"))
					.collect::<Vec<_>>();

				Cow::Owned(tags.join(" "))
			},
			Self::Bugzilla(bug) => Cow::Borrowed(bug.whiteboard.as_str()),
		}
	}

	pub fn priority(&self) -> Option<u8> {
		match self {
			Self::Github(issue) => issue.priority,
			Self::Bugzilla(bug) => bug.priority,
		}
	}

	pub fn has_priority(&self) -> bool {
		self.priority().is_some()
	}

	pub fn points(&self) -> Option<i64> {
		match self {
			Self::Github(_) => None,
			Self::Bugzilla(bug) => bug.points,
		}
	}

	pub fn labels(&self) -> &[String] {
		match self {
			Self::Github(issue) => &issue.labels,
			Self::Bugzilla(_) => &[],
		}
	}

	/// Grouping string: the repo name for GitHub, the component for Bugzilla.
	pub fn project(&self) -> &str {
		match self {
			Self::Github(issue) => &issue.project,
			Self::Bugzilla(bug) => &bug.component,
		}
	}

	pub fn is_pull_request(&self) -> bool {
		match self {
			Self::Github(issue) => issue.is_pull_request,
			Self::Bugzilla(_) => false,
		}
	}

	pub fn mentors(&self) -> &[String] {
		match self {
			Self::Github(_) => &[],
			Self::Bugzilla(bug) => &bug.mentors,
		}
	}

	pub fn resolution(&self) -> Option<&str> {
		match self {
			Self::Github(_) => None,
			Self::Bugzilla(bug) => bug.resolution.as_deref(),
		}
	}

	pub fn severity(&self) -> Option<&str> {
		match self {
			Self::Github(_) => None,
			Self::Bugzilla(bug) => bug.severity.as_deref(),
		}
	}

	pub fn bug_type(&self) -> Option<&str> {
		match self {
			Self::Github(_) => None,
			Self::Bugzilla(bug) => bug.bug_type.as_deref(),
		}
	}

	/// First flag with the needinfo type id, if any. Absence is normal.
	pub fn needinfo(&self) -> Option<&BugFlag> {
		match self {
			Self::Github(_) => None,
			Self::Bugzilla(bug) =>
				bug.flags.iter().find(|flag| flag.type_id == NEEDINFO_FLAG_TYPE_ID),
		}
	}

	/// The loaders already map the placeholder account to `None`, but the
	/// Bugzilla arm re-checks it so a hand-built value cannot slip through.
	pub fn is_assigned(&self) -> bool {
		match self {
			Self::Github(issue) => issue.assignee.is_some(),
			Self::Bugzilla(bug) =>
				bug.assignee.as_deref().is_some_and(|assignee| assignee != UNASSIGNED_ACCOUNT),
		}
	}
}
