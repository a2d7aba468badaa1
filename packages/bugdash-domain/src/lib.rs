pub mod bug;
pub mod search;
pub mod time_serde;

pub use bug::{Bug, BugFlag, BugzillaBug, GithubIssue, NEEDINFO_FLAG_TYPE_ID, UNASSIGNED_ACCOUNT};
pub use search::{CustomFilter, Filters, SearchDescriptor, SearchSpec};
