use std::sync::Arc;

use screenplay::testing::{FakePage, PageAction};
use screenplay::{Actor, BrowseTheWeb, Selector, WebDriverConfig, WebDriverPage};
use screenplay_interactions::duckduckgo::*;

const TITLES: [&str; 5] = [
	"Giant panda - Wikipedia",
	"Panda Bear Facts",
	"WWF - Giant Pandas",
	"San Diego Zoo Wildlife Alliance",
	"Smithsonian's National Zoo",
];

fn searcher(page: &Arc<FakePage>) -> Actor {
	Actor::named("Searcher").with_ability::<BrowseTheWeb>(page.clone()).unwrap()
}

fn result_page(page: &FakePage, titles: &[&str]) {
	page.set_texts(&ResultPage::result_links(), titles.iter().copied());
}

#[tokio::test]
async fn load_and_search_drive_the_page_in_order() {
	let page = Arc::new(FakePage::new());
	let actor = searcher(&page);

	actor.attempts_to(load_home_page()).await.unwrap();
	actor.attempts_to(search_for("panda")).await.unwrap();

	assert_eq!(
		page.actions(),
		[
			PageAction::Goto {
				url: "https://www.duckduckgo.com".into()
			},
			PageAction::Fill {
				selector: Selector::css("#search_form_input_homepage"),
				text: "panda".into()
			},
			PageAction::Click {
				selector: Selector::css("#search_button_homepage")
			},
		]
	);
	assert_eq!(page.url(), SearchPage::URL);
}

#[tokio::test]
async fn result_titles_verification_honours_minimum() {
	let page = Arc::new(FakePage::new());
	result_page(&page, &TITLES);
	let actor = searcher(&page);

	let titles = actor.asks_for(result_link_titles()).await.unwrap();
	assert_eq!(titles, TITLES);

	actor.attempts_to(verify_result_link_titles_contain("panda")).await.unwrap();

	let err = actor
		.attempts_to(verify_result_link_titles_contain("panda").at_least(2))
		.await
		.unwrap_err();
	assert!(err.is_assertion(), "{err}");
}

#[tokio::test]
async fn matching_ignores_case() {
	let page = Arc::new(FakePage::new());
	result_page(&page, &TITLES);
	let actor = searcher(&page);

	actor
		.attempts_to(verify_result_link_titles_contain("PANDA BEAR"))
		.await
		.unwrap();
}

#[tokio::test]
async fn too_few_results_is_a_timeout_not_an_assertion() {
	let page = Arc::new(FakePage::new());
	result_page(&page, &TITLES[..3]);
	let actor = searcher(&page);

	let err = actor.asks_for(result_link_titles()).await.unwrap_err();
	assert!(err.is_timeout(), "{err}");

	let err = actor.attempts_to(verify_result_link_titles_contain("panda")).await.unwrap_err();
	assert!(err.is_timeout(), "{err}");
}

#[tokio::test]
async fn full_search_scenario_against_a_scripted_page() {
	let page = Arc::new(FakePage::new());
	let actor = searcher(&page);
	page.set_title("panda at DuckDuckGo");
	page.set_input_value(&ResultPage::search_input(), "panda");
	result_page(&page, &TITLES);

	actor
		.attempts_to((
			load_home_page(),
			search_for("panda"),
			verify_search_result_query_is("panda"),
			verify_result_link_titles_contain("panda"),
			verify_page_title_is("panda at DuckDuckGo"),
		))
		.await
		.unwrap();

	assert_eq!(actor.asks_for(page_title()).await.unwrap(), "panda at DuckDuckGo");
	assert_eq!(actor.asks_for(search_input_value()).await.unwrap(), "panda");
}

#[tokio::test]
async fn wrong_title_fails_and_stops_the_sequence() {
	let page = Arc::new(FakePage::new());
	let actor = searcher(&page);
	page.set_title("something else");

	let err = actor
		.attempts_to((verify_page_title_is("panda at DuckDuckGo"), load_home_page()))
		.await
		.unwrap_err();

	assert!(err.is_assertion());
	assert!(err.to_string().contains("something else"), "{err}");
	assert!(page.actions().is_empty());
}

#[tokio::test]
async fn search_without_a_page_names_the_missing_ability() {
	let actor = Actor::named("Nobody");
	let err = actor.attempts_to(search_for("panda")).await.unwrap_err();
	assert_eq!(err.missing_ability(), Some("page"));
}

/// Needs a WebDriver server on `WEBDRIVER_URL` (default `http://localhost:4444`) and internet access.
#[tokio::test]
#[ignore]
async fn live_duckduckgo_search() {
	let mut config = WebDriverConfig::default();
	if let Ok(endpoint) = std::env::var("WEBDRIVER_URL") {
		config.endpoint = endpoint;
	}
	let page = Arc::new(WebDriverPage::connect(config).await.unwrap());
	let actor = Actor::named("Searcher").with_ability::<BrowseTheWeb>(page.clone()).unwrap();

	let outcome = actor
		.attempts_to((
			load_home_page(),
			search_for("panda"),
			verify_search_result_query_is("panda"),
			verify_result_link_titles_contain("panda"),
			verify_page_title_is("panda at DuckDuckGo"),
		))
		.await;

	page.close().await.unwrap();
	outcome.unwrap();
}
