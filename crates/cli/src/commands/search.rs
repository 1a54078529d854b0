use std::sync::Arc;

use screenplay::{Actor, BrowseTheWeb, WebDriverConfig, WebDriverPage};
use screenplay_interactions::duckduckgo::{
	load_home_page, search_for, verify_page_title_is, verify_result_link_titles_contain, verify_search_result_query_is,
};

use crate::cli::{BrowserArgs, SearchArgs};
use crate::config::search_phrases;
use crate::error::Result;
use crate::report::Report;

/// Runs the search scenario once per phrase, each in a fresh browser session.
pub async fn run(browser: &BrowserArgs, args: &SearchArgs) -> Result<()> {
	let config = browser.webdriver_config();
	let mut report = Report::new();

	for phrase in search_phrases(&args.phrases) {
		report.run(format!("search: {phrase}"), search_once(&config, &phrase)).await;
	}

	report.finish()
}

async fn search_once(config: &WebDriverConfig, phrase: &str) -> screenplay::Result<()> {
	let page = Arc::new(WebDriverPage::connect(config.clone()).await?);
	let actor = Actor::named("Searcher").with_ability::<BrowseTheWeb>(page.clone())?;

	let outcome = actor
		.attempts_to((
			load_home_page(),
			search_for(phrase),
			verify_search_result_query_is(phrase),
			verify_result_link_titles_contain(phrase),
			verify_page_title_is(format!("{phrase} at DuckDuckGo")),
		))
		.await;

	let closed = page.close().await;
	outcome.and(closed)
}
