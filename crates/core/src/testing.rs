//! In-memory abilities for testing interactions without a browser or network.
//!
//! - [`FakePage`]: configurable page state; records every mutating call as a
//!   [`PageAction`].
//! - [`FakeApi`]: canned responses per `(method, path)`; records every
//!   request as a [`RecordedRequest`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use screenplay::testing::{FakePage, PageAction};
//!
//! let page = Arc::new(FakePage::new());
//! let actor = Actor::new().with_ability::<BrowseTheWeb>(page.clone())?;
//! actor.attempts_to(load_home_page()).await?;
//! assert_eq!(page.actions(), [PageAction::Goto { url: "https://www.duckduckgo.com".into() }]);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::api::{ApiContext, ApiResponse, Method};
use crate::error::{Error, Result};
use crate::page::{PageAbility, Selector};
use crate::wait::WaitOptions;

/// Mutating call recorded by [`FakePage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
	Goto { url: String },
	Fill { selector: Selector, text: String },
	Click { selector: Selector },
	DragAndDrop { source: Selector, target: Selector },
}

#[derive(Debug, Default, Clone)]
struct FakeElement {
	texts: Vec<String>,
	value: Option<String>,
	visible: Option<bool>,
}

impl FakeElement {
	fn count(&self) -> usize {
		match (self.texts.len(), self.value.is_some() || self.visible == Some(true)) {
			(0, true) => 1,
			(n, _) => n,
		}
	}
}

/// Page double with scripted state.
///
/// Selectors that were never configured match nothing. `fill` also updates
/// the filled element's value, so a later `input_value` observes it.
pub struct FakePage {
	url: Mutex<String>,
	title: Mutex<String>,
	elements: Mutex<HashMap<Selector, FakeElement>>,
	failures: Mutex<HashMap<Selector, String>>,
	actions: Mutex<Vec<PageAction>>,
	wait: WaitOptions,
}

impl Default for FakePage {
	fn default() -> Self {
		Self::new()
	}
}

impl FakePage {
	/// Creates a blank page whose waits give up after 200ms.
	pub fn new() -> Self {
		Self::with_wait(WaitOptions::from_millis(200).with_poll_interval(Duration::from_millis(10)))
	}

	pub fn with_wait(wait: WaitOptions) -> Self {
		Self {
			url: Mutex::new("about:blank".to_string()),
			title: Mutex::new(String::new()),
			elements: Mutex::new(HashMap::new()),
			failures: Mutex::new(HashMap::new()),
			actions: Mutex::new(Vec::new()),
			wait,
		}
	}

	pub fn url(&self) -> String {
		self.url.lock().clone()
	}

	pub fn set_title(&self, title: &str) {
		*self.title.lock() = title.to_string();
	}

	/// Sets the text of every element matching `selector`.
	pub fn set_texts<I, S>(&self, selector: &Selector, texts: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.elements.lock().entry(selector.clone()).or_default().texts = texts.into_iter().map(Into::into).collect();
	}

	pub fn set_input_value(&self, selector: &Selector, value: &str) {
		self.elements.lock().entry(selector.clone()).or_default().value = Some(value.to_string());
	}

	/// Overrides visibility; otherwise an element is visible when it matches.
	pub fn set_visible(&self, selector: &Selector, visible: bool) {
		self.elements.lock().entry(selector.clone()).or_default().visible = Some(visible);
	}

	/// Makes every operation on `selector` fail with [`Error::Transport`].
	pub fn fail_on(&self, selector: &Selector, message: &str) {
		self.failures.lock().insert(selector.clone(), message.to_string());
	}

	/// Returns all recorded actions, oldest first.
	pub fn actions(&self) -> Vec<PageAction> {
		self.actions.lock().clone()
	}

	pub fn clear_actions(&self) {
		self.actions.lock().clear();
	}

	fn record(&self, action: PageAction) {
		self.actions.lock().push(action);
	}

	fn check(&self, selector: &Selector) -> Result<()> {
		match self.failures.lock().get(selector) {
			Some(message) => Err(Error::Transport(message.clone())),
			None => Ok(()),
		}
	}

	fn element(&self, selector: &Selector) -> Option<FakeElement> {
		self.elements.lock().get(selector).cloned()
	}

	fn require(&self, selector: &Selector) -> Result<FakeElement> {
		self.check(selector)?;
		self.element(selector)
			.filter(|element| element.count() > 0)
			.ok_or_else(|| Error::Timeout {
				ms: self.wait.timeout_ms(),
				condition: format!("{selector} to be attached"),
			})
	}
}

#[async_trait]
impl PageAbility for FakePage {
	async fn goto(&self, url: &str) -> Result<()> {
		self.record(PageAction::Goto { url: url.to_string() });
		*self.url.lock() = url.to_string();
		Ok(())
	}

	async fn fill(&self, selector: &Selector, text: &str) -> Result<()> {
		self.check(selector)?;
		self.record(PageAction::Fill {
			selector: selector.clone(),
			text: text.to_string(),
		});
		self.set_input_value(selector, text);
		Ok(())
	}

	async fn click(&self, selector: &Selector) -> Result<()> {
		self.check(selector)?;
		self.record(PageAction::Click { selector: selector.clone() });
		Ok(())
	}

	async fn title(&self) -> Result<String> {
		Ok(self.title.lock().clone())
	}

	async fn input_value(&self, selector: &Selector) -> Result<String> {
		Ok(self.require(selector)?.value.unwrap_or_default())
	}

	async fn count(&self, selector: &Selector) -> Result<usize> {
		self.check(selector)?;
		Ok(self.element(selector).map_or(0, |element| element.count()))
	}

	async fn is_visible(&self, selector: &Selector) -> Result<bool> {
		self.check(selector)?;
		Ok(self
			.element(selector)
			.is_some_and(|element| element.visible.unwrap_or(element.count() > 0)))
	}

	async fn all_text_contents(&self, selector: &Selector) -> Result<Vec<String>> {
		self.check(selector)?;
		Ok(self.element(selector).map(|element| element.texts).unwrap_or_default())
	}

	async fn drag_and_drop(&self, source: &Selector, target: &Selector) -> Result<()> {
		self.check(source)?;
		self.check(target)?;
		self.record(PageAction::DragAndDrop {
			source: source.clone(),
			target: target.clone(),
		});
		Ok(())
	}

	fn wait_options(&self) -> WaitOptions {
		self.wait
	}
}

/// Request recorded by [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
	pub method: Method,
	pub path: String,
	pub body: Option<Value>,
}

/// API double answering from canned routes.
///
/// Unknown routes answer `404` with a `null` body.
pub struct FakeApi {
	base_url: String,
	routes: Mutex<HashMap<(Method, String), (u16, Value)>>,
	requests: Mutex<Vec<RecordedRequest>>,
}

impl Default for FakeApi {
	fn default() -> Self {
		Self::new()
	}
}

impl FakeApi {
	pub fn new() -> Self {
		Self::with_base_url("https://api.test/")
	}

	pub fn with_base_url(base_url: &str) -> Self {
		Self {
			base_url: base_url.to_string(),
			routes: Mutex::new(HashMap::new()),
			requests: Mutex::new(Vec::new()),
		}
	}

	/// Answers `method path` with `status` and `body` from now on.
	pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
		self.routes.lock().insert((method, path.to_string()), (status, body));
	}

	/// Returns all recorded requests, oldest first.
	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}

	fn answer(&self, method: Method, path: &str, body: Option<Value>) -> ApiResponse {
		self.requests.lock().push(RecordedRequest {
			method,
			path: path.to_string(),
			body,
		});

		let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
		match self.routes.lock().get(&(method, path.to_string())) {
			Some((status, body)) => ApiResponse::new(method, url, *status, body.clone()),
			None => ApiResponse::new(method, url, 404, Value::Null),
		}
	}
}

#[async_trait]
impl ApiContext for FakeApi {
	fn base_url(&self) -> &str {
		&self.base_url
	}

	async fn get(&self, path: &str) -> Result<ApiResponse> {
		Ok(self.answer(Method::Get, path, None))
	}

	async fn post(&self, path: &str, body: Value) -> Result<ApiResponse> {
		Ok(self.answer(Method::Post, path, Some(body)))
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[tokio::test]
	async fn fill_is_observable_through_input_value() {
		let page = FakePage::new();
		let input = Selector::css("#q");

		page.fill(&input, "panda").await.unwrap();
		assert_eq!(page.input_value(&input).await.unwrap(), "panda");
		assert_eq!(page.count(&input).await.unwrap(), 1);
	}

	#[tokio::test]
	async fn unknown_selector_matches_nothing() {
		let page = FakePage::new();
		let missing = Selector::css("#missing");

		assert_eq!(page.count(&missing).await.unwrap(), 0);
		assert!(!page.is_visible(&missing).await.unwrap());
		assert!(page.all_text_contents(&missing).await.unwrap().is_empty());
		assert!(page.input_value(&missing).await.unwrap_err().is_timeout());
	}

	#[tokio::test]
	async fn fail_on_surfaces_transport_errors() {
		let page = FakePage::new();
		let button = Selector::css("#go");
		page.fail_on(&button, "browser crashed");

		assert!(page.click(&button).await.unwrap_err().is_transport());
		assert!(page.actions().is_empty());
	}

	#[tokio::test]
	async fn fake_api_routes_and_records() {
		let api = FakeApi::new();
		api.respond(Method::Get, "/cards/1", 200, json!({ "id": 1 }));

		let hit = api.get("/cards/1").await.unwrap();
		assert_eq!(hit.status(), 200);
		assert_eq!(hit.url(), "https://api.test/cards/1");

		let miss = api.post("/cards", json!({ "note": "x" })).await.unwrap();
		assert_eq!(miss.status(), 404);

		let requests = api.requests();
		assert_eq!(requests.len(), 2);
		assert_eq!(requests[1].body, Some(json!({ "note": "x" })));
	}
}
