//! Settings resolved from flags and environment variables.

use crate::cli::GitHubArgs;
use crate::error::{CliError, Result};

/// Phrases searched when none are given on the command line.
pub const DEFAULT_PHRASES: [&str; 10] = [
	"panda",
	"python",
	"polar bear",
	"parrot",
	"porcupine",
	"parakeet",
	"pangolin",
	"panther",
	"platypus",
	"peacock",
];

pub fn search_phrases(phrases: &[String]) -> Vec<String> {
	if phrases.is_empty() {
		DEFAULT_PHRASES.iter().map(|phrase| phrase.to_string()).collect()
	} else {
		phrases.to_vec()
	}
}

fn required(value: &Option<String>, name: &'static str) -> Result<String> {
	value
		.as_deref()
		.filter(|v| !v.is_empty())
		.map(String::from)
		.ok_or(CliError::MissingSetting(name))
}

/// GitHub account and board the scenarios run against.
#[derive(Clone)]
pub struct GitHubConfig {
	pub username: String,
	pub token: String,
	pub project_name: String,
	pub api_url: String,
	password: Option<String>,
}

impl std::fmt::Debug for GitHubConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GitHubConfig")
			.field("username", &self.username)
			.field("project_name", &self.project_name)
			.field("api_url", &self.api_url)
			.finish_non_exhaustive()
	}
}

impl GitHubConfig {
	/// Resolves the settings every GitHub scenario needs. The password is
	/// checked later, by [`password`](Self::password), since API-only
	/// scenarios never use it.
	pub fn from_args(args: &GitHubArgs) -> Result<Self> {
		Ok(Self {
			username: required(&args.username, "GITHUB_USERNAME")?,
			token: required(&args.token, "GITHUB_ACCESS_TOKEN")?,
			project_name: required(&args.project_name, "GITHUB_PROJECT_NAME")?,
			api_url: args.api_url.clone(),
			password: args.password.clone(),
		})
	}

	pub fn password(&self) -> Result<&str> {
		self.password
			.as_deref()
			.filter(|v| !v.is_empty())
			.ok_or(CliError::MissingSetting("GITHUB_PASSWORD"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cli::GitHubAction;

	fn args() -> GitHubArgs {
		GitHubArgs {
			username: Some("octocat".into()),
			password: None,
			token: Some("t0ken".into()),
			project_name: Some("Board".into()),
			api_url: "https://api.github.com".into(),
			action: GitHubAction::CreateCard,
		}
	}

	#[test]
	fn default_phrases_when_none_given() {
		assert_eq!(search_phrases(&[]).len(), 10);
		assert_eq!(search_phrases(&["koala".to_string()]), ["koala"]);
	}

	#[test]
	fn missing_settings_are_named() {
		let mut missing_token = args();
		missing_token.token = None;
		let err = GitHubConfig::from_args(&missing_token).unwrap_err();
		assert_eq!(err.to_string(), "`GITHUB_ACCESS_TOKEN` is not set");

		let mut empty_user = args();
		empty_user.username = Some(String::new());
		let err = GitHubConfig::from_args(&empty_user).unwrap_err();
		assert_eq!(err.to_string(), "`GITHUB_USERNAME` is not set");
	}

	#[test]
	fn password_is_only_required_on_demand() {
		let config = GitHubConfig::from_args(&args()).unwrap();
		assert_eq!(config.password().unwrap_err().to_string(), "`GITHUB_PASSWORD` is not set");
		assert!(!format!("{config:?}").contains("t0ken"));
	}
}
