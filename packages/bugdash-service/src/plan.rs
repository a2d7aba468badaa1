use bugdash_domain::{SearchDescriptor, SearchSpec};
use bugdash_trackers::{BugzillaQuery, IssueState, bugzilla, github};

/// Canonical form of one remote fetch. Two descriptors that reduce to the
/// same plan need the same raw batch, so the cache keys on this value
/// rather than on the descriptor itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FetchPlan {
	Github { user: String, project: String, state: IssueState },
	Bugzilla(BugzillaQuery),
}
impl FetchPlan {
	/// Filters contribute only the parts the remote side evaluates, so
	/// descriptors differing in local-only filters collapse onto one plan.
	pub fn for_descriptor(descriptor: &SearchDescriptor) -> Self {
		let filters = descriptor.filters.as_ref();

		match &descriptor.search {
			SearchSpec::GithubRepo { user, project } => Self::Github {
				user: user.clone(),
				project: project.clone(),
				state: github::issue_state(filters),
			},
			search => Self::Bugzilla(bugzilla::build_query(search, filters)),
		}
	}
}
