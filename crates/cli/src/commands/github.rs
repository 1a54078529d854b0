use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use screenplay::{Actor, BrowseTheWeb, CallAnApi, Error, WebDriverConfig, WebDriverPage};
use screenplay_interactions::github::{
	Card, Project, api_context_at, card_id, create_card, find_project, load_project_for, log_into_github_as, move_card_to, project_column_ids,
	retrieve_card, verify_card_appears_with,
};
use tracing::info;

use crate::cli::{BrowserArgs, GitHubAction, GitHubArgs};
use crate::config::GitHubConfig;
use crate::error::Result;
use crate::report::Report;

pub async fn run(browser: &BrowserArgs, args: &GitHubArgs) -> Result<()> {
	let config = GitHubConfig::from_args(args)?;

	let context = api_context_at(&config.api_url, &config.token)?;
	let mut actor = Actor::named(config.username.clone());
	actor.can_use::<CallAnApi>(Arc::new(context))?;

	let mut report = Report::new();
	match args.action {
		GitHubAction::CreateCard => report.run("github: create card", create_card_scenario(&actor, &config)).await,
		GitHubAction::MoveCard => {
			let password = config.password()?;
			report
				.run("github: move card", move_card_scenario(actor, &config, password, browser.webdriver_config()))
				.await
		}
	}
	report.finish()
}

/// Note text unique to this run.
fn unique_note(prefix: &str) -> String {
	let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
	format!("{prefix} at {}.{:06}", now.as_secs(), now.subsec_micros())
}

/// The configured board and its column ids, in board order.
async fn board(actor: &Actor, config: &GitHubConfig) -> screenplay::Result<(Project, Vec<String>)> {
	let project = actor.asks_for(find_project(&config.username, &config.project_name)).await?;
	info!(project = %project.name, number = project.number, "project found");
	let columns = actor.asks_for(project_column_ids(project.clone())).await?;
	Ok((project, columns))
}

async fn create_card_scenario(actor: &Actor, config: &GitHubConfig) -> screenplay::Result<()> {
	let (_, columns) = board(actor, config).await?;

	let created = actor.calls(create_card(&columns[0], unique_note("A new task"))).await?;
	let retrieved = actor.calls(retrieve_card(card_id(&created)?)).await?;

	if retrieved.json() != created.json() {
		return Err(Error::assertion(format!(
			"retrieved card {} differs from created card {}",
			retrieved.json(),
			created.json()
		)));
	}
	Ok(())
}

async fn move_card_scenario(mut actor: Actor, config: &GitHubConfig, password: &str, webdriver: WebDriverConfig) -> screenplay::Result<()> {
	let (project, columns) = board(&actor, config).await?;
	let (source, target) = (&columns[0], &columns[1]);
	let note = unique_note("Move this card");

	let created = actor.calls(create_card(source, note.as_str())).await?;

	let page = Arc::new(WebDriverPage::connect(webdriver).await?);
	actor.can_use::<BrowseTheWeb>(page.clone())?;

	let outcome = actor
		.attempts_to((
			log_into_github_as(&config.username, password),
			load_project_for(&config.username, project.number),
			verify_card_appears_with(source, note.as_str()),
			move_card_to(target, note.as_str()),
			verify_card_appears_with(target, note.as_str()),
		))
		.await;
	let closed = page.close().await;
	outcome.and(closed)?;

	let card: Card = actor.calls(retrieve_card(card_id(&created)?)).await?.json_as()?;
	if !card.is_in_column(target) {
		return Err(Error::assertion(format!(
			"card {} is in {:?} according to the API, expected column {target}",
			card.id, card.column_url
		)));
	}
	Ok(())
}
