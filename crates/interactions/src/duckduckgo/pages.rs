//! Locators for the DuckDuckGo pages.

use screenplay::Selector;

/// The home page with the big search box.
pub struct SearchPage;

impl SearchPage {
	pub const URL: &'static str = "https://www.duckduckgo.com";

	pub fn search_input() -> Selector {
		Selector::css("#search_form_input_homepage")
	}

	pub fn search_button() -> Selector {
		Selector::css("#search_button_homepage")
	}
}

/// The result list shown after a search.
pub struct ResultPage;

impl ResultPage {
	/// Result links rendered before the list counts as loaded.
	pub const MIN_RESULTS: usize = 5;

	pub fn result_links() -> Selector {
		Selector::css(r#"a[data-testid="result-title-a"]"#)
	}

	/// Search box at the top of the result page, prefilled with the query.
	pub fn search_input() -> Selector {
		Selector::css("#search_form_input")
	}
}
