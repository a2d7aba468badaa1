pub mod admin;
pub mod cache;
pub mod filter;
pub mod find;
pub mod plan;

use std::{future::Future, pin::Pin, sync::Arc};

pub use admin::ResetReport;
use bugdash_config::{BugzillaConfig, Config, GithubConfig};
use bugdash_trackers::{
	BugRecord, BugzillaQuery, IssueRecord, IssueState, Result as TrackerResult, bugzilla, github,
};
pub use cache::QueryCache;
pub use filter::apply_local_filters;
pub use plan::FetchPlan;

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait GithubApi
where
	Self: Send + Sync,
{
	fn list_issues<'a>(
		&'a self,
		cfg: &'a GithubConfig,
		user: &'a str,
		project: &'a str,
		state: IssueState,
	) -> BoxFuture<'a, TrackerResult<Vec<IssueRecord>>>;
}

pub trait BugzillaApi
where
	Self: Send + Sync,
{
	fn search_bugs<'a>(
		&'a self,
		cfg: &'a BugzillaConfig,
		query: &'a BugzillaQuery,
	) -> BoxFuture<'a, TrackerResult<Vec<BugRecord>>>;
}

#[derive(Debug)]
pub enum ServiceError {
	Tracker(Arc<bugdash_trackers::Error>),
}

#[derive(Clone)]
pub struct Trackers {
	pub github: Arc<dyn GithubApi>,
	pub bugzilla: Arc<dyn BugzillaApi>,
}

pub struct BugdashService {
	pub cfg: Config,
	pub trackers: Trackers,
	pub cache: QueryCache,
}

struct DefaultTrackers;

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Tracker(err) => write!(f, "Tracker error: {err}"),
		}
	}
}

impl std::error::Error for ServiceError {}

impl From<Arc<bugdash_trackers::Error>> for ServiceError {
	fn from(err: Arc<bugdash_trackers::Error>) -> Self {
		Self::Tracker(err)
	}
}

impl GithubApi for DefaultTrackers {
	fn list_issues<'a>(
		&'a self,
		cfg: &'a GithubConfig,
		user: &'a str,
		project: &'a str,
		state: IssueState,
	) -> BoxFuture<'a, TrackerResult<Vec<IssueRecord>>> {
		Box::pin(github::list_issues(cfg, user, project, state))
	}
}

impl BugzillaApi for DefaultTrackers {
	fn search_bugs<'a>(
		&'a self,
		cfg: &'a BugzillaConfig,
		query: &'a BugzillaQuery,
	) -> BoxFuture<'a, TrackerResult<Vec<BugRecord>>> {
		Box::pin(bugzilla::search_bugs(cfg, query))
	}
}

impl Trackers {
	pub fn new(github: Arc<dyn GithubApi>, bugzilla: Arc<dyn BugzillaApi>) -> Self {
		Self { github, bugzilla }
	}
}

impl Default for Trackers {
	fn default() -> Self {
		let tracker = Arc::new(DefaultTrackers);
		Self { github: tracker.clone(), bugzilla: tracker }
	}
}

impl BugdashService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, trackers: Trackers::default(), cache: QueryCache::new() }
	}

	pub fn with_trackers(cfg: Config, trackers: Trackers) -> Self {
		Self { cfg, trackers, cache: QueryCache::new() }
	}

	/// Number of fetch plans currently memoized.
	pub fn cache_len(&self) -> usize {
		self.cache.len()
	}
}
