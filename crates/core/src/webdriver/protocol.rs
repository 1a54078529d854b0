//! W3C WebDriver wire payloads.
//!
//! Pure functions only: request bodies, response unpacking and error
//! mapping. The session in [`super`] does the I/O.

use serde_json::{Value, json};

use crate::error::{Error, Result};
use crate::page::Selector;

/// Key under which WebDriver returns element references.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Browser requested when creating a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WebDriverBrowser {
	#[default]
	Chrome,
	Firefox,
}

impl WebDriverBrowser {
	pub fn browser_name(self) -> &'static str {
		match self {
			WebDriverBrowser::Chrome => "chrome",
			WebDriverBrowser::Firefox => "firefox",
		}
	}
}

impl std::fmt::Display for WebDriverBrowser {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.browser_name())
	}
}

/// Body for `POST /session`.
pub fn new_session(browser: WebDriverBrowser, headless: bool) -> Value {
	let mut always_match = json!({ "browserName": browser.browser_name() });
	if headless {
		let (key, args) = match browser {
			WebDriverBrowser::Chrome => ("goog:chromeOptions", json!({ "args": ["--headless=new", "--window-size=1280,960"] })),
			WebDriverBrowser::Firefox => ("moz:firefoxOptions", json!({ "args": ["-headless"] })),
		};
		always_match[key] = args;
	}
	json!({ "capabilities": { "alwaysMatch": always_match } })
}

/// Body for `POST /session/{id}/elements`.
pub fn locate(selector: &Selector) -> Value {
	let (using, value) = match selector {
		Selector::Css(css) => ("css selector", css.clone()),
		Selector::XPath(xpath) => ("xpath", xpath.clone()),
		Selector::Text(text) => ("xpath", format!("//*[normalize-space(text())={}]", xpath_literal(text.trim()))),
	};
	json!({ "using": using, "value": value })
}

/// Quotes `s` as an XPath 1.0 string literal.
pub fn xpath_literal(s: &str) -> String {
	if !s.contains('"') {
		return format!("\"{s}\"");
	}
	if !s.contains('\'') {
		return format!("'{s}'");
	}
	let parts: Vec<String> = s.split('"').map(|part| format!("\"{part}\"")).collect();
	format!("concat({})", parts.join(", '\"', "))
}

/// Body for `POST /session/{id}/actions`: press on `source`, release on `target`.
pub fn drag_and_drop(source: &str, target: &str) -> Value {
	json!({
		"actions": [{
			"type": "pointer",
			"id": "mouse",
			"parameters": { "pointerType": "mouse" },
			"actions": [
				{ "type": "pointerMove", "duration": 0, "origin": { ELEMENT_KEY: source }, "x": 0, "y": 0 },
				{ "type": "pointerDown", "button": 0 },
				{ "type": "pause", "duration": 100 },
				{ "type": "pointerMove", "duration": 250, "origin": { ELEMENT_KEY: target }, "x": 0, "y": 0 },
				{ "type": "pointerUp", "button": 0 }
			]
		}]
	})
}

/// Extracts the session id from a `POST /session` response value.
pub fn session_id(value: &Value) -> Result<String> {
	value["sessionId"]
		.as_str()
		.map(String::from)
		.ok_or_else(|| Error::Transport(format!("new session response missing 'sessionId': {value}")))
}

/// Extracts element references from a `POST /elements` response value.
pub fn element_ids(value: &Value) -> Result<Vec<String>> {
	let elements = value
		.as_array()
		.ok_or_else(|| Error::Transport(format!("expected element list, got {value}")))?;

	elements
		.iter()
		.map(|element| {
			element[ELEMENT_KEY]
				.as_str()
				.map(String::from)
				.ok_or_else(|| Error::Transport(format!("element reference missing '{ELEMENT_KEY}': {element}")))
		})
		.collect()
}

/// Splits a WebDriver response body into its `value`, or the error it encodes.
///
/// `timeout_ms` is reported when the driver itself answers with a timeout.
pub fn unpack(status: u16, body: &str, timeout_ms: u64) -> Result<Value> {
	let parsed: Option<Value> = serde_json::from_str(body).ok();

	if let Some(error) = parsed.as_ref().and_then(|v| v["value"]["error"].as_str()) {
		let message = parsed
			.as_ref()
			.and_then(|v| v["value"]["message"].as_str())
			.unwrap_or_default()
			.to_string();
		return Err(match error {
			"timeout" | "script timeout" => Error::Timeout {
				ms: timeout_ms,
				condition: message,
			},
			_ => Error::Driver {
				error: error.to_string(),
				message,
			},
		});
	}

	if !(200..300).contains(&status) {
		return Err(Error::Transport(format!("webdriver answered HTTP {status}: {body}")));
	}

	match parsed {
		Some(mut v) => Ok(v["value"].take()),
		None => Err(Error::Transport(format!("webdriver answered with non-JSON body: {body}"))),
	}
}
