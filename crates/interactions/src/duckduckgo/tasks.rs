use async_trait::async_trait;
use screenplay::{Actor, BrowseTheWeb, Error, Result, Task};

use super::pages::{ResultPage, SearchPage};
use super::questions::ResultLinkTitles;

/// Navigates to the DuckDuckGo home page.
#[derive(Debug, Clone, Default)]
pub struct LoadHomePage;

#[async_trait]
impl Task for LoadHomePage {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		actor.ability::<BrowseTheWeb>()?.goto(SearchPage::URL).await
	}
}

/// Types `phrase` into the home page search box and submits it.
#[derive(Debug, Clone)]
pub struct SearchFor {
	pub phrase: String,
}

#[async_trait]
impl Task for SearchFor {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		let page = actor.ability::<BrowseTheWeb>()?;
		page.fill(&SearchPage::search_input(), &self.phrase).await?;
		page.click(&SearchPage::search_button()).await
	}

	fn description(&self) -> String {
		format!("SearchFor({:?})", self.phrase)
	}
}

#[derive(Debug, Clone)]
pub struct VerifyPageTitleIs {
	pub title: String,
}

#[async_trait]
impl Task for VerifyPageTitleIs {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		let page = actor.ability::<BrowseTheWeb>()?;
		page.expect_title(&self.title, page.wait_options()).await
	}
}

/// Checks the result page search box still holds the submitted phrase.
#[derive(Debug, Clone)]
pub struct VerifySearchResultQueryIs {
	pub phrase: String,
}

#[async_trait]
impl Task for VerifySearchResultQueryIs {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		let page = actor.ability::<BrowseTheWeb>()?;
		page.expect_input_value(&ResultPage::search_input(), &self.phrase, page.wait_options()).await
	}
}

/// Checks at least `minimum` result titles contain `phrase`, ignoring case.
#[derive(Debug, Clone)]
pub struct VerifyResultLinkTitlesContain {
	pub phrase: String,
	pub minimum: usize,
}

impl VerifyResultLinkTitlesContain {
	pub fn at_least(mut self, minimum: usize) -> Self {
		self.minimum = minimum;
		self
	}
}

#[async_trait]
impl Task for VerifyResultLinkTitlesContain {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		let titles = actor.asks_for(ResultLinkTitles).await?;
		let needle = self.phrase.to_lowercase();
		let matching = titles.iter().filter(|title| title.to_lowercase().contains(&needle)).count();

		if matching < self.minimum {
			return Err(Error::assertion(format!(
				"expected at least {} result titles containing {:?}, found {matching} in {titles:?}",
				self.minimum, self.phrase
			)));
		}
		Ok(())
	}
}

pub fn load_home_page() -> LoadHomePage {
	LoadHomePage
}

pub fn search_for(phrase: impl Into<String>) -> SearchFor {
	SearchFor { phrase: phrase.into() }
}

pub fn verify_page_title_is(title: impl Into<String>) -> VerifyPageTitleIs {
	VerifyPageTitleIs { title: title.into() }
}

pub fn verify_search_result_query_is(phrase: impl Into<String>) -> VerifySearchResultQueryIs {
	VerifySearchResultQueryIs { phrase: phrase.into() }
}

/// Requires one matching title; raise the bar with [`at_least`](VerifyResultLinkTitlesContain::at_least).
pub fn verify_result_link_titles_contain(phrase: impl Into<String>) -> VerifyResultLinkTitlesContain {
	VerifyResultLinkTitlesContain {
		phrase: phrase.into(),
		minimum: 1,
	}
}
