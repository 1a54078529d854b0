//! DuckDuckGo search interactions. All of them need [`BrowseTheWeb`](screenplay::BrowseTheWeb).

pub mod pages;
pub mod questions;
pub mod tasks;

pub use pages::{ResultPage, SearchPage};
pub use questions::{PageTitle, ResultLinkTitles, SearchInputValue, page_title, result_link_titles, search_input_value};
pub use tasks::{
	LoadHomePage, SearchFor, VerifyPageTitleIs, VerifyResultLinkTitlesContain, VerifySearchResultQueryIs, load_home_page, search_for,
	verify_page_title_is, verify_result_link_titles_contain, verify_search_result_query_is,
};
