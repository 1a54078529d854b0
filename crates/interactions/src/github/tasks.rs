//! Web UI steps on github.com. All of them need [`BrowseTheWeb`].

use async_trait::async_trait;
use screenplay::webdriver::protocol::xpath_literal;
use screenplay::{Actor, BrowseTheWeb, Result, Selector, Task};

pub const LOGIN_URL: &str = "https://github.com/login";

/// Signs in through the github.com login form.
#[derive(Clone)]
pub struct LogIntoGitHubAs {
	pub username: String,
	pub password: String,
}

impl std::fmt::Debug for LogIntoGitHubAs {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LogIntoGitHubAs")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

#[async_trait]
impl Task for LogIntoGitHubAs {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		let page = actor.ability::<BrowseTheWeb>()?;
		page.goto(LOGIN_URL).await?;
		page.fill(&Selector::css("#login_field"), &self.username).await?;
		page.fill(&Selector::css("#password"), &self.password).await?;
		page.click(&Selector::css(r#"input[name="commit"]"#)).await
	}

	fn description(&self) -> String {
		format!("LogIntoGitHubAs({:?})", self.username)
	}
}

/// Opens a user's project board.
#[derive(Debug, Clone)]
pub struct LoadProjectFor {
	pub username: String,
	pub project_number: u64,
}

impl LoadProjectFor {
	pub fn url(&self) -> String {
		format!("https://github.com/users/{}/projects/{}", self.username, self.project_number)
	}
}

#[async_trait]
impl Task for LoadProjectFor {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		actor.ability::<BrowseTheWeb>()?.goto(&self.url()).await
	}
}

/// Expects a card whose text contains `note` to be visible in the column.
#[derive(Debug, Clone)]
pub struct VerifyCardAppearsWith {
	pub column_id: String,
	pub note: String,
}

impl VerifyCardAppearsWith {
	pub fn card(&self) -> Selector {
		Selector::xpath(format!(
			"//div[@id=\"column-cards-{}\"]//p[contains(text(), {})]",
			self.column_id,
			xpath_literal(&self.note)
		))
	}
}

#[async_trait]
impl Task for VerifyCardAppearsWith {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		let page = actor.ability::<BrowseTheWeb>()?;
		page.expect_visible(&self.card(), page.wait_options()).await
	}
}

/// Drags the card showing `note` onto the column's card list.
#[derive(Debug, Clone)]
pub struct MoveCardTo {
	pub column_id: String,
	pub note: String,
}

impl MoveCardTo {
	pub fn column(&self) -> Selector {
		Selector::css(format!("#column-cards-{}", self.column_id))
	}
}

#[async_trait]
impl Task for MoveCardTo {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		let page = actor.ability::<BrowseTheWeb>()?;
		page.drag_and_drop(&Selector::text(self.note.as_str()), &self.column()).await
	}
}

pub fn log_into_github_as(username: impl Into<String>, password: impl Into<String>) -> LogIntoGitHubAs {
	LogIntoGitHubAs {
		username: username.into(),
		password: password.into(),
	}
}

pub fn load_project_for(username: impl Into<String>, project_number: u64) -> LoadProjectFor {
	LoadProjectFor {
		username: username.into(),
		project_number,
	}
}

pub fn verify_card_appears_with(column_id: impl Into<String>, note: impl Into<String>) -> VerifyCardAppearsWith {
	VerifyCardAppearsWith {
		column_id: column_id.into(),
		note: note.into(),
	}
}

pub fn move_card_to(column_id: impl Into<String>, note: impl Into<String>) -> MoveCardTo {
	MoveCardTo {
		column_id: column_id.into(),
		note: note.into(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn card_xpath_scopes_to_the_column() {
		let verify = verify_card_appears_with("367", "Move this card");
		assert_eq!(
			verify.card(),
			Selector::xpath(r#"//div[@id="column-cards-367"]//p[contains(text(), "Move this card")]"#)
		);
	}

	#[test]
	fn password_is_not_debug_printed() {
		let login = log_into_github_as("octocat", "hunter2");
		assert!(!format!("{login:?}").contains("hunter2"));
		assert_eq!(login.description(), r#"LogIntoGitHubAs("octocat")"#);
	}

	#[test]
	fn project_url_uses_the_number() {
		assert_eq!(load_project_for("octocat", 3).url(), "https://github.com/users/octocat/projects/3");
	}
}
