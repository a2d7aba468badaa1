use std::sync::Arc;

use bugdash_service::BugdashService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<BugdashService>,
}
impl AppState {
	pub fn new(config: bugdash_config::Config) -> Self {
		Self { service: Arc::new(BugdashService::new(config)) }
	}
}
