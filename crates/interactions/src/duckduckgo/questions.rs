use async_trait::async_trait;
use screenplay::{Actor, BrowseTheWeb, Question, Result};

use super::pages::ResultPage;

/// Titles of every result link, once at least [`ResultPage::MIN_RESULTS`]
/// links have rendered. Fails with a timeout if they never do.
#[derive(Debug, Clone, Default)]
pub struct ResultLinkTitles;

#[async_trait]
impl Question for ResultLinkTitles {
	type Answer = Vec<String>;

	async fn request_as(&self, actor: &Actor) -> Result<Vec<String>> {
		let page = actor.ability::<BrowseTheWeb>()?;
		let links = ResultPage::result_links();
		page.wait_for_count(&links, ResultPage::MIN_RESULTS, page.wait_options()).await?;
		page.all_text_contents(&links).await
	}
}

/// Current value of the result page's search box.
#[derive(Debug, Clone, Default)]
pub struct SearchInputValue;

#[async_trait]
impl Question for SearchInputValue {
	type Answer = String;

	async fn request_as(&self, actor: &Actor) -> Result<String> {
		actor.ability::<BrowseTheWeb>()?.input_value(&ResultPage::search_input()).await
	}
}

#[derive(Debug, Clone, Default)]
pub struct PageTitle;

#[async_trait]
impl Question for PageTitle {
	type Answer = String;

	async fn request_as(&self, actor: &Actor) -> Result<String> {
		actor.ability::<BrowseTheWeb>()?.title().await
	}
}

pub fn result_link_titles() -> ResultLinkTitles {
	ResultLinkTitles
}

pub fn search_input_value() -> SearchInputValue {
	SearchInputValue
}

pub fn page_title() -> PageTitle {
	PageTitle
}
