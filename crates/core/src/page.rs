//! UI ability contract.
//!
//! [`PageAbility`] is the subset of browser-page operations interactions
//! rely on. Element-addressed reads and writes use a [`Selector`]; anything
//! that depends on asynchronous rendering has an explicit wait variant taking
//! [`WaitOptions`].

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::wait::{self, WaitOptions};

/// How to find element(s) on a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
	/// CSS selector (e.g., `#search_form_input`)
	Css(String),
	/// XPath expression
	XPath(String),
	/// Element whose visible text is exactly this string
	Text(String),
}

impl Selector {
	pub fn css(selector: impl Into<String>) -> Self {
		Self::Css(selector.into())
	}

	pub fn xpath(expression: impl Into<String>) -> Self {
		Self::XPath(expression.into())
	}

	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}
}

impl From<&str> for Selector {
	fn from(selector: &str) -> Self {
		Self::Css(selector.to_string())
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Css(s) => write!(f, "css={s}"),
			Self::XPath(s) => write!(f, "xpath={s}"),
			Self::Text(s) => write!(f, "text={s:?}"),
		}
	}
}

/// Browser page operations available to tasks and questions.
///
/// Implementations: [`WebDriverPage`](crate::WebDriverPage) for a real
/// browser, [`FakePage`](crate::testing::FakePage) for tests.
#[async_trait]
pub trait PageAbility: Send + Sync {
	/// Navigates to `url` and waits for the load to finish.
	async fn goto(&self, url: &str) -> Result<()>;

	/// Replaces the value of the input matching `selector` with `text`.
	async fn fill(&self, selector: &Selector, text: &str) -> Result<()>;

	/// Clicks the first element matching `selector`.
	async fn click(&self, selector: &Selector) -> Result<()>;

	/// Returns the document title.
	async fn title(&self) -> Result<String>;

	/// Returns the current value of the input matching `selector`.
	async fn input_value(&self, selector: &Selector) -> Result<String>;

	/// Returns how many elements currently match `selector`.
	async fn count(&self, selector: &Selector) -> Result<usize>;

	/// Returns `true` if an element matching `selector` is rendered and visible.
	async fn is_visible(&self, selector: &Selector) -> Result<bool>;

	/// Returns the text of every element matching `selector`, in document order.
	async fn all_text_contents(&self, selector: &Selector) -> Result<Vec<String>>;

	/// Drags the element matching `source` onto the element matching `target`.
	async fn drag_and_drop(&self, source: &Selector, target: &Selector) -> Result<()>;

	/// Wait policy used when an interaction does not specify its own.
	fn wait_options(&self) -> WaitOptions {
		WaitOptions::default()
	}

	/// Waits until `selector` is visible; fails with a timeout otherwise.
	async fn wait_for_visible(&self, selector: &Selector, options: WaitOptions) -> Result<()> {
		let condition = format!("{selector} to be visible");
		wait::poll_until(&condition, options, move || async move { Ok(self.is_visible(selector).await?.then_some(())) }).await
	}

	/// Waits until at least `minimum` elements match `selector` and returns the count.
	async fn wait_for_count(&self, selector: &Selector, minimum: usize, options: WaitOptions) -> Result<usize> {
		let condition = format!("at least {minimum} elements matching {selector}");
		wait::poll_until(&condition, options, move || async move {
			let count = self.count(selector).await?;
			Ok((count >= minimum).then_some(count))
		})
		.await
	}

	/// Asserts the title eventually equals `expected`.
	async fn expect_title(&self, expected: &str, options: WaitOptions) -> Result<()> {
		let what = format!("page title {expected:?}");
		wait::expect_eventually(&what, options, move || self.title(), |title: &String| title == expected).await?;
		Ok(())
	}

	/// Asserts the input matching `selector` eventually holds `expected`.
	async fn expect_input_value(&self, selector: &Selector, expected: &str, options: WaitOptions) -> Result<()> {
		let what = format!("{selector} to have value {expected:?}");
		wait::expect_eventually(&what, options, move || self.input_value(selector), |value: &String| value == expected).await?;
		Ok(())
	}

	/// Asserts an element matching `selector` eventually becomes visible.
	async fn expect_visible(&self, selector: &Selector, options: WaitOptions) -> Result<()> {
		let what = format!("{selector} to be visible");
		wait::expect_eventually(&what, options, move || self.is_visible(selector), |visible: &bool| *visible).await?;
		Ok(())
	}
}
