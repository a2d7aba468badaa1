//! Tracker-facing loaders. Each tracker gets a wire record type, a fetch
//! call, and a normalizer that folds its records into the unified [`Bug`]
//! shape.
//!
//! [`Bug`]: bugdash_domain::Bug

pub mod bugzilla;
pub mod error;
pub mod github;

pub use bugzilla::{BugRecord, BugzillaQuery, build_query, normalize_bug, search_bugs};
pub use error::{Error, Result};
pub use github::{
	IssueRecord, IssueState, LabelRecord, UserRecord, issue_state, list_issues, normalize_issue,
};
