//! GitHub classic project boards.
//!
//! API calls need [`CallAnApi`](screenplay::CallAnApi) bound to a context
//! from [`api_context`]; UI tasks need [`BrowseTheWeb`](screenplay::BrowseTheWeb).
//! One actor holding both can mix them in a single scenario.

pub mod calls;
pub mod models;
pub mod tasks;

use std::time::Duration;

use screenplay::{HttpApiContext, Result};

pub use calls::{
	CreateCard, FindProject, ListColumns, ListProjects, ProjectColumnIds, RetrieveCard, card_id, create_card, find_project, list_projects,
	project_column_ids, retrieve_card,
};
pub use models::{Card, Column, Project};
pub use tasks::{
	LoadProjectFor, LogIntoGitHubAs, MoveCardTo, VerifyCardAppearsWith, load_project_for, log_into_github_as, move_card_to,
	verify_card_appears_with,
};

pub const API_URL: &str = "https://api.github.com";

/// Media type of the v3 REST API.
pub const ACCEPT: &str = "application/vnd.github.v3+json";

/// HTTP context for the public GitHub API, authorized with a personal access token.
pub fn api_context(token: &str) -> Result<HttpApiContext> {
	api_context_at(API_URL, token)
}

/// Same as [`api_context`] against another base URL (GitHub Enterprise, a local stub).
pub fn api_context_at(base_url: &str, token: &str) -> Result<HttpApiContext> {
	HttpApiContext::builder(base_url)
		.accept(ACCEPT)
		.token(token)
		.timeout(Duration::from_secs(30))
		.build()
}
