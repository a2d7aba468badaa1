mod error;
mod types;

pub use error::{Error, Result};
pub use types::{BugzillaConfig, Config, GithubConfig, Service, Trackers};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if !cfg.trackers.github.api_base.starts_with("http") {
		return Err(Error::Validation {
			message: "trackers.github.api_base must be an http(s) URL.".to_string(),
		});
	}
	if cfg.trackers.github.user_agent.trim().is_empty() {
		return Err(Error::Validation {
			message: "trackers.github.user_agent must be non-empty.".to_string(),
		});
	}
	if cfg.trackers.github.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "trackers.github.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if !cfg.trackers.bugzilla.api_base.starts_with("http") {
		return Err(Error::Validation {
			message: "trackers.bugzilla.api_base must be an http(s) URL.".to_string(),
		});
	}
	if cfg.trackers.bugzilla.bug_base_url.trim().is_empty() {
		return Err(Error::Validation {
			message: "trackers.bugzilla.bug_base_url must be non-empty.".to_string(),
		});
	}
	if cfg.trackers.bugzilla.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "trackers.bugzilla.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let github = &mut cfg.trackers.github;

	if github.api_base.ends_with('/') {
		github.api_base = github.api_base.trim_end_matches('/').to_string();
	}
	if github.token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false) {
		github.token = None;
	}

	let bugzilla = &mut cfg.trackers.bugzilla;

	if bugzilla.api_base.ends_with('/') {
		bugzilla.api_base = bugzilla.api_base.trim_end_matches('/').to_string();
	}
}
