use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub trackers: Trackers,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Trackers {
	pub github: GithubConfig,
	pub bugzilla: BugzillaConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GithubConfig {
	#[serde(default = "default_github_api_base")]
	pub api_base: String,
	#[serde(default = "default_user_agent")]
	pub user_agent: String,
	pub token: Option<String>,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BugzillaConfig {
	#[serde(default = "default_bugzilla_api_base")]
	pub api_base: String,
	/// Base for user-facing bug links; the native id is appended verbatim.
	#[serde(default = "default_bug_base_url")]
	pub bug_base_url: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}

fn default_github_api_base() -> String {
	"https://api.github.com".to_string()
}

fn default_bugzilla_api_base() -> String {
	"https://bugzilla.mozilla.org/rest".to_string()
}

fn default_bug_base_url() -> String {
	"https://bugzilla.mozilla.org/show_bug.cgi?id=".to_string()
}

fn default_user_agent() -> String {
	"bugdash".to_string()
}

fn default_timeout_ms() -> u64 {
	10_000
}
