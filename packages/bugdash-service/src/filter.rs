use bugdash_domain::{Bug, Filters};

/// Applies the filters the remote queries cannot evaluate, in a fixed
/// order. Every step only narrows the list; absent fields are no-ops, and
/// an absent `filters` passes the batch through untouched.
pub fn apply_local_filters(mut bugs: Vec<Bug>, filters: Option<&Filters>) -> Vec<Bug> {
	let Some(filters) = filters else {
		return bugs;
	};

	if filters.unprioritized == Some(true) {
		bugs.retain(|bug| !bug.has_priority());
	}
	if let Some(priority) = filters.priority {
		bugs.retain(|bug| bug.priority() == Some(priority));
	}
	if let Some(custom) = &filters.custom {
		bugs.retain(|bug| custom.matches(bug));
	}
	if let Some(assignees) = &filters.assignees {
		bugs.retain(|bug| {
			bug.assignee()
				.is_some_and(|assignee| assignees.iter().any(|candidate| candidate == assignee))
		});
	}
	if let Some(is_pull_request) = filters.is_pull_request {
		bugs.retain(|bug| bug.is_pull_request() == is_pull_request);
	}

	bugs
}
