// std
use std::time::Duration;
// crates.io
use reqwest::Client;
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
// self
use crate::error::{Error, Result};
use bugdash_config::BugzillaConfig;
use bugdash_domain::{Bug, BugFlag, BugzillaBug, Filters, SearchSpec, UNASSIGNED_ACCOUNT};

/// Value of `cf_fx_points` when no estimate has been entered.
pub const NO_POINTS: &str = "---";
/// Value of `priority` when triage has not assigned one.
pub const NO_PRIORITY: &str = "--";

const OPEN_RESOLUTION: &str = "---";
const CLOSED_RESOLUTIONS: [&str; 6] =
	["FIXED", "INVALID", "WONTFIX", "DUPLICATE", "WORKSFORME", "INCOMPLETE"];
const INCLUDE_FIELDS: [&str; 13] = [
	"id",
	"summary",
	"whiteboard",
	"product",
	"component",
	"assigned_to",
	"cf_fx_points",
	"priority",
	"mentors",
	"resolution",
	"severity",
	"type",
	"flags",
];

/// Fully resolved remote query. Two descriptors that build the same value
/// request the same batch, which is exactly what the fetch cache keys on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BugzillaQuery {
	pub product: Option<String>,
	pub component: Option<String>,
	pub quicksearch: Option<String>,
	pub mentor_regex: Option<String>,
	pub priority: Option<String>,
	pub resolution: Option<ResolutionSelector>,
	pub assigned: Option<AssignmentSelector>,
	pub whiteboard: Option<String>,
	pub whiteboard_not_regexp: bool,
	pub last_change_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionSelector {
	Open,
	Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentSelector {
	Assigned,
	Unassigned,
}

/// Builds the remote query for a Bugzilla search plus the filters the
/// endpoint can evaluate server-side. The remaining filters run locally
/// after the fetch.
pub fn build_query(search: &SearchSpec, filters: Option<&Filters>) -> BugzillaQuery {
	let mut query = BugzillaQuery::default();

	match search {
		SearchSpec::BugzillaComponent { product, component } => {
			query.product = Some(product.clone());
			query.component = Some(component.clone());
		},
		SearchSpec::BugzillaAssignees { assignees } => {
			query.quicksearch = Some(format!("assigned_to:{}", assignees.join(",")));
		},
		SearchSpec::BugzillaMentors { mentors } => {
			query.mentor_regex = Some(mentors.join("|"));
		},
		SearchSpec::BugzillaWhiteboard { whiteboard_content } => {
			query.quicksearch = Some(format!("whiteboard:\"{whiteboard_content}\""));
		},
		// GitHub searches are routed to the GitHub loader before this point.
		SearchSpec::GithubRepo { .. } => {},
	}

	let Some(filters) = filters else {
		return query;
	};

	if let Some(priority) = filters.priority {
		query.priority = Some(format!("P{priority}"));
	}
	if let Some(open) = filters.open {
		query.resolution =
			Some(if open { ResolutionSelector::Open } else { ResolutionSelector::Closed });
	}
	if let Some(is_assigned) = filters.is_assigned {
		query.assigned = Some(if is_assigned {
			AssignmentSelector::Assigned
		} else {
			AssignmentSelector::Unassigned
		});
	}
	if let Some(whiteboard) = &filters.whiteboard {
		query.whiteboard = Some(whiteboard.clone());
	}
	if let Some(not_whiteboard) = &filters.not_whiteboard {
		query.whiteboard = Some(not_whiteboard.clone());
		query.whiteboard_not_regexp = true;
	}
	if let Some(last_change_time) = filters.last_change_time {
		query.last_change_time = last_change_time.format(&Rfc3339).ok();
	}

	query
}
impl BugzillaQuery {
	/// Expands to the wire parameter list. Multi-valued selectors repeat
	/// their key, which is how the REST endpoint reads them.
	pub fn to_params(&self) -> Vec<(&'static str, String)> {
		let mut params = Vec::new();

		if let Some(product) = &self.product {
			params.push(("product", product.clone()));
		}
		if let Some(component) = &self.component {
			params.push(("component", component.clone()));
		}
		if let Some(quicksearch) = &self.quicksearch {
			params.push(("quicksearch", quicksearch.clone()));
		}
		if let Some(mentor_regex) = &self.mentor_regex {
			params.push(("emailtype1", "regexp".to_string()));
			params.push(("email1", mentor_regex.clone()));
			params.push(("emailbug_mentor1", "1".to_string()));
		}
		if let Some(priority) = &self.priority {
			params.push(("priority", priority.clone()));
		}
		match self.resolution {
			Some(ResolutionSelector::Open) =>
				params.push(("resolution", OPEN_RESOLUTION.to_string())),
			Some(ResolutionSelector::Closed) => params.extend(
				CLOSED_RESOLUTIONS.iter().map(|resolution| ("resolution", resolution.to_string())),
			),
			None => {},
		}
		if let Some(assigned) = self.assigned {
			let emailtype = match assigned {
				AssignmentSelector::Assigned => "notequals",
				AssignmentSelector::Unassigned => "equals",
			};

			params.push(("emailtype2", emailtype.to_string()));
			params.push(("email2", UNASSIGNED_ACCOUNT.to_string()));
			params.push(("emailassigned_to2", "1".to_string()));
		}
		if let Some(whiteboard) = &self.whiteboard {
			params.push(("whiteboard", whiteboard.clone()));

			if self.whiteboard_not_regexp {
				params.push(("status_whiteboard_type", "notregexp".to_string()));
			}
		}
		if let Some(last_change_time) = &self.last_change_time {
			params.push(("last_change_time", last_change_time.clone()));
		}

		params.push(("include_fields", INCLUDE_FIELDS.join(",")));

		params
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct BugRecord {
	pub id: u64,
	pub summary: String,
	#[serde(default)]
	pub whiteboard: String,
	#[serde(default)]
	pub product: String,
	#[serde(default)]
	pub component: String,
	pub assigned_to: Option<String>,
	pub cf_fx_points: Option<String>,
	pub priority: Option<String>,
	#[serde(default)]
	pub mentors: Vec<String>,
	pub resolution: Option<String>,
	pub severity: Option<String>,
	#[serde(rename = "type")]
	pub bug_type: Option<String>,
	#[serde(default)]
	pub flags: Vec<BugFlag>,
}

// The endpoint answers errors as a JSON body with `error: true`, sometimes
// under a 200 status, so the body is probed before the bug list is trusted.
#[derive(Debug, Deserialize)]
struct SearchResponse {
	#[serde(default)]
	bugs: Vec<BugRecord>,
	#[serde(default)]
	error: bool,
	message: Option<String>,
}

pub async fn search_bugs(cfg: &BugzillaConfig, query: &BugzillaQuery) -> Result<Vec<BugRecord>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/bug", cfg.api_base);
	let response: SearchResponse =
		client.get(url).query(&query.to_params()).send().await?.error_for_status()?.json().await?;

	if response.error {
		return Err(Error::Api {
			message: response
				.message
				.unwrap_or_else(|| "Bugzilla reported an unspecified error.".to_string()),
		});
	}

	Ok(response.bugs)
}

/// Folds a raw bug into the unified shape, mapping the tracker's "no value"
/// sentinels to proper absences.
pub fn normalize_bug(record: BugRecord, cfg: &BugzillaConfig) -> Bug {
	let assignee = record.assigned_to.filter(|assigned_to| assigned_to != UNASSIGNED_ACCOUNT);
	let points = record
		.cf_fx_points
		.as_deref()
		.filter(|points| *points != NO_POINTS)
		.and_then(|points| points.parse().ok());
	// Priorities arrive as "P1".."P5"; the leading letter is dropped.
	let priority = record
		.priority
		.as_deref()
		.filter(|priority| *priority != NO_PRIORITY)
		.and_then(|priority| priority.get(1..))
		.and_then(|digits| digits.parse().ok());
	let resolution = record.resolution.filter(|resolution| !resolution.is_empty());

	Bug::Bugzilla(BugzillaBug {
		id: format!("bz:{}", record.id),
		title: record.summary,
		url: format!("{}{}", cfg.bug_base_url, record.id),
		assignee,
		whiteboard: record.whiteboard,
		priority,
		points,
		product: record.product,
		component: record.component,
		mentors: record.mentors,
		resolution,
		severity: record.severity,
		bug_type: record.bug_type,
		flags: record.flags,
	})
}
