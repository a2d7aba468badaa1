use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use bugdash_domain::{Bug, BugFlag, SearchDescriptor};
use bugdash_service::{ResetReport, ServiceError};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/bugs/find", post(find_bugs))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/v1/admin/reset-cache", post(reset_cache)).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn find_bugs(
	State(state): State<AppState>,
	Json(payload): Json<FindBugsRequest>,
) -> Result<Json<FindBugsResponse>, ApiError> {
	let bugs = state.service.find_bugs(&payload.searches).await?;
	let bugs = bugs.iter().map(BugItem::from_bug).collect();

	Ok(Json(FindBugsResponse { bugs }))
}

async fn reset_cache(State(state): State<AppState>) -> Json<ResetReport> {
	Json(state.service.reset_cache())
}

#[derive(Debug, Deserialize)]
pub struct FindBugsRequest {
	pub searches: Vec<SearchDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct FindBugsResponse {
	pub bugs: Vec<BugItem>,
}

/// Wire shape of one bug: the unified surface flattened to plain JSON.
#[derive(Debug, Serialize)]
pub struct BugItem {
	pub id: String,
	pub tracker: &'static str,
	pub title: String,
	pub url: String,
	pub assignee: Option<String>,
	pub is_assigned: bool,
	pub priority: Option<u8>,
	pub has_priority: bool,
	pub points: Option<i64>,
	pub whiteboard: String,
	pub labels: Vec<String>,
	pub project: String,
	pub is_pull_request: bool,
	pub mentors: Vec<String>,
	pub resolution: Option<String>,
	pub severity: Option<String>,
	pub bug_type: Option<String>,
	pub needinfo: Option<BugFlag>,
}
impl BugItem {
	fn from_bug(bug: &Bug) -> Self {
		Self {
			id: bug.id().to_string(),
			tracker: match bug {
				Bug::Github(_) => "github",
				Bug::Bugzilla(_) => "bugzilla",
			},
			title: bug.title().to_string(),
			url: bug.url().to_string(),
			assignee: bug.assignee().map(str::to_string),
			is_assigned: bug.is_assigned(),
			priority: bug.priority(),
			has_priority: bug.has_priority(),
			points: bug.points(),
			whiteboard: bug.whiteboard().into_owned(),
			labels: bug.labels().to_vec(),
			project: bug.project().to_string(),
			is_pull_request: bug.is_pull_request(),
			mentors: bug.mentors().to_vec(),
			resolution: bug.resolution().map(str::to_string),
			severity: bug.severity().map(str::to_string),
			bug_type: bug.bug_type().map(str::to_string),
			needinfo: bug.needinfo().cloned(),
		}
	}
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match &err {
			ServiceError::Tracker(_) => {
				tracing::error!(%err, "A tracker request failed.");

				Self::new(StatusCode::BAD_GATEWAY, "tracker_error", err.to_string())
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
