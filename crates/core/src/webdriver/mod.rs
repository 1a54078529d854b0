//! [`PageAbility`] backed by a W3C WebDriver endpoint.
//!
//! One [`WebDriverPage`] owns one browser session. Element-addressed
//! operations wait for the element to be attached before acting, using the
//! page's [`WaitOptions`]; that wait fails with [`Error::Timeout`].
//!
//! ```ignore
//! let page = WebDriverPage::connect(WebDriverConfig {
//!     endpoint: "http://localhost:9515".into(),
//!     ..Default::default()
//! })
//! .await?;
//! page.goto("https://www.duckduckgo.com").await?;
//! page.close().await?;
//! ```

pub mod protocol;

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

pub use self::protocol::WebDriverBrowser;
use crate::api::Method;
use crate::error::{Error, Result};
use crate::page::{PageAbility, Selector};
use crate::wait::{self, WaitOptions};

/// Default WebDriver endpoint (Selenium / chromedriver `--port=4444`).
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4444";

/// Settings for a new browser session.
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
	pub endpoint: String,
	pub browser: WebDriverBrowser,
	pub headless: bool,
	/// Auto-wait policy for element lookups and the default for interactions.
	pub wait: WaitOptions,
}

impl Default for WebDriverConfig {
	fn default() -> Self {
		Self {
			endpoint: DEFAULT_ENDPOINT.to_string(),
			browser: WebDriverBrowser::default(),
			headless: true,
			wait: WaitOptions::default(),
		}
	}
}

/// Browser page driven over the WebDriver protocol.
#[derive(Debug)]
pub struct WebDriverPage {
	client: reqwest::Client,
	session_id: String,
	session_url: Url,
	wait: WaitOptions,
	closed: AtomicBool,
}

impl WebDriverPage {
	/// Starts a new browser session.
	pub async fn connect(config: WebDriverConfig) -> Result<Self> {
		let mut endpoint = Url::parse(&config.endpoint)?;
		if !endpoint.path().ends_with('/') {
			let path = format!("{}/", endpoint.path());
			endpoint.set_path(&path);
		}

		let client = reqwest::Client::new();
		let capabilities = protocol::new_session(config.browser, config.headless);
		let value = send(&client, Method::Post, endpoint.join("session")?, Some(capabilities), config.wait.timeout_ms()).await?;
		let session_id = protocol::session_id(&value)?;
		let session_url = endpoint.join(&format!("session/{session_id}/"))?;

		debug!(target: "screenplay", browser = %config.browser, headless = config.headless, session = %session_id, "webdriver session started");

		Ok(Self {
			client,
			session_id,
			session_url,
			wait: config.wait,
			closed: AtomicBool::new(false),
		})
	}

	pub fn session_id(&self) -> &str {
		&self.session_id
	}

	/// Ends the browser session. Once it succeeds, later calls are no-ops.
	///
	/// A rejected delete leaves the page open, so dropping it still warns.
	pub async fn close(&self) -> Result<()> {
		if self.closed.load(Ordering::SeqCst) {
			return Ok(());
		}
		let url = Url::parse(self.session_url.as_str().trim_end_matches('/'))?;
		self.delete_url(url).await?;
		self.closed.store(true, Ordering::SeqCst);
		debug!(target: "screenplay", session = %self.session_id, "webdriver session closed");
		Ok(())
	}

	async fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
		let url = self.session_url.join(path)?;
		send(&self.client, method, url, body, self.wait.timeout_ms()).await
	}

	async fn delete(&self, path: &str) -> Result<()> {
		self.delete_url(self.session_url.join(path)?).await
	}

	async fn delete_url(&self, url: Url) -> Result<()> {
		debug!(target: "screenplay", %url, "webdriver delete");
		let response = self.client.delete(url).send().await?;
		let status = response.status().as_u16();
		let text = response.text().await?;
		protocol::unpack(status, &text, self.wait.timeout_ms())?;
		Ok(())
	}

	async fn find_all(&self, selector: &Selector) -> Result<Vec<String>> {
		let value = self.command(Method::Post, "elements", Some(protocol::locate(selector))).await?;
		protocol::element_ids(&value)
	}

	/// First element matching `selector`, waiting for it to be attached.
	async fn find(&self, selector: &Selector) -> Result<String> {
		let condition = format!("{selector} to be attached");
		wait::poll_until(&condition, self.wait, move || async move { Ok(self.find_all(selector).await?.into_iter().next()) }).await
	}

	async fn element(&self, method: Method, element: &str, command: &str, body: Option<Value>) -> Result<Value> {
		self.command(method, &format!("element/{element}/{command}"), body).await
	}
}

async fn send(client: &reqwest::Client, method: Method, url: Url, body: Option<Value>, timeout_ms: u64) -> Result<Value> {
	debug!(target: "screenplay", %method, %url, "webdriver command");
	let request = match method {
		Method::Get => client.get(url),
		// WebDriver requires a JSON body on every POST, even an empty one.
		Method::Post => client.post(url).json(&body.unwrap_or_else(|| json!({}))),
	};
	let response = request.send().await?;
	let status = response.status().as_u16();
	let text = response.text().await?;
	protocol::unpack(status, &text, timeout_ms)
}

fn as_string(value: Value) -> String {
	match value {
		Value::String(s) => s,
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

#[async_trait]
impl PageAbility for WebDriverPage {
	async fn goto(&self, url: &str) -> Result<()> {
		self.command(Method::Post, "url", Some(json!({ "url": url }))).await?;
		Ok(())
	}

	async fn fill(&self, selector: &Selector, text: &str) -> Result<()> {
		let element = self.find(selector).await?;
		self.element(Method::Post, &element, "clear", None).await?;
		self.element(Method::Post, &element, "value", Some(json!({ "text": text }))).await?;
		Ok(())
	}

	async fn click(&self, selector: &Selector) -> Result<()> {
		let element = self.find(selector).await?;
		self.element(Method::Post, &element, "click", None).await?;
		Ok(())
	}

	async fn title(&self) -> Result<String> {
		Ok(as_string(self.command(Method::Get, "title", None).await?))
	}

	async fn input_value(&self, selector: &Selector) -> Result<String> {
		let element = self.find(selector).await?;
		Ok(as_string(self.element(Method::Get, &element, "property/value", None).await?))
	}

	async fn count(&self, selector: &Selector) -> Result<usize> {
		Ok(self.find_all(selector).await?.len())
	}

	async fn is_visible(&self, selector: &Selector) -> Result<bool> {
		let Some(element) = self.find_all(selector).await?.into_iter().next() else {
			return Ok(false);
		};
		match self.element(Method::Get, &element, "displayed", None).await {
			Ok(value) => Ok(value.as_bool().unwrap_or(false)),
			// Element detached between lookup and query.
			Err(Error::Driver { error, .. }) if error == "stale element reference" => Ok(false),
			Err(err) => Err(err),
		}
	}

	async fn all_text_contents(&self, selector: &Selector) -> Result<Vec<String>> {
		let mut texts = Vec::new();
		for element in self.find_all(selector).await? {
			texts.push(as_string(self.element(Method::Get, &element, "text", None).await?));
		}
		Ok(texts)
	}

	async fn drag_and_drop(&self, source: &Selector, target: &Selector) -> Result<()> {
		let from = self.find(source).await?;
		let to = self.find(target).await?;
		self.command(Method::Post, "actions", Some(protocol::drag_and_drop(&from, &to))).await?;
		self.delete("actions").await
	}

	fn wait_options(&self) -> WaitOptions {
		self.wait
	}
}

impl Drop for WebDriverPage {
	fn drop(&mut self) {
		if !self.closed.load(Ordering::SeqCst) {
			warn!(target: "screenplay", session = %self.session_id, "webdriver session dropped without close()");
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::AtomicUsize;

	use tokio::io::{AsyncReadExt, AsyncWriteExt};
	use tokio::net::TcpListener;

	use super::*;

	#[test]
	fn default_config_targets_local_headless_chrome() {
		let config = WebDriverConfig::default();
		assert_eq!(config.endpoint, "http://localhost:4444");
		assert_eq!(config.browser, WebDriverBrowser::Chrome);
		assert!(config.headless);
		assert_eq!(config.wait, WaitOptions::default());
	}

	#[test]
	fn as_string_flattens_scalar_values() {
		assert_eq!(as_string(json!("x")), "x");
		assert_eq!(as_string(Value::Null), "");
		assert_eq!(as_string(json!(3)), "3");
	}

	#[tokio::test]
	async fn connect_to_unreachable_endpoint_is_a_transport_error() {
		let config = WebDriverConfig {
			endpoint: "http://127.0.0.1:9".into(),
			..Default::default()
		};
		let err = WebDriverPage::connect(config).await.unwrap_err();
		assert!(err.is_transport());
	}

	/// Answers every request with one canned HTTP response and counts them.
	async fn canned_driver(status: &'static str, body: &'static str) -> (Url, Arc<AtomicUsize>) {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let hits = Arc::new(AtomicUsize::new(0));
		let counter = hits.clone();
		tokio::spawn(async move {
			while let Ok((mut stream, _)) = listener.accept().await {
				counter.fetch_add(1, Ordering::SeqCst);
				let mut request = Vec::new();
				let mut buf = [0u8; 1024];
				while !request.windows(4).any(|w| w == b"\r\n\r\n") {
					match stream.read(&mut buf).await {
						Ok(0) | Err(_) => break,
						Ok(n) => request.extend_from_slice(&buf[..n]),
					}
				}
				let response = format!(
					"HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
					body.len()
				);
				let _ = stream.write_all(response.as_bytes()).await;
				let _ = stream.shutdown().await;
			}
		});
		(Url::parse(&format!("http://{addr}/session/s1/")).unwrap(), hits)
	}

	fn page_at(session_url: Url) -> WebDriverPage {
		WebDriverPage {
			client: reqwest::Client::new(),
			session_id: "s1".into(),
			session_url,
			wait: WaitOptions::default(),
			closed: AtomicBool::new(false),
		}
	}

	#[tokio::test]
	async fn close_reports_driver_errors_and_stays_open() {
		let (url, hits) = canned_driver("404 Not Found", r#"{"value": {"error": "invalid session id", "message": "gone"}}"#).await;
		let page = page_at(url);

		let err = page.close().await.unwrap_err();
		assert!(matches!(&err, Error::Driver { error, .. } if error == "invalid session id"));
		assert!(!page.closed.load(Ordering::SeqCst));

		// Not marked closed, so a retry reaches the driver again.
		assert!(page.close().await.is_err());
		assert_eq!(hits.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn close_is_idempotent_after_success() {
		let (url, hits) = canned_driver("200 OK", r#"{"value": null}"#).await;
		let page = page_at(url);

		page.close().await.unwrap();
		page.close().await.unwrap();
		assert!(page.closed.load(Ordering::SeqCst));
		assert_eq!(hits.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn connect_rejects_malformed_endpoint() {
		let config = WebDriverConfig {
			endpoint: "not a url".into(),
			..Default::default()
		};
		assert!(matches!(WebDriverPage::connect(config).await.unwrap_err(), Error::InvalidUrl(_)));
	}
}
