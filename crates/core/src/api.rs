//! HTTP ability contract and its reqwest-backed implementation.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// HTTP methods an [`ApiContext`] can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
	Get,
	Post,
}

impl Method {
	pub fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Raw response of an API call: status plus JSON body.
///
/// Empty bodies read as `null`; bodies that are not JSON are kept as a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
	method: Method,
	url: String,
	status: u16,
	body: Value,
}

impl ApiResponse {
	pub fn new(method: Method, url: impl Into<String>, status: u16, body: Value) -> Self {
		Self {
			method,
			url: url.into(),
			status,
			body,
		}
	}

	/// Parses a raw body the way the HTTP context does.
	pub fn from_text(method: Method, url: impl Into<String>, status: u16, text: &str) -> Self {
		let body = if text.trim().is_empty() {
			Value::Null
		} else {
			serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
		};
		Self::new(method, url, status, body)
	}

	pub fn method(&self) -> Method {
		self.method
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub fn status(&self) -> u16 {
		self.status
	}

	/// Returns `true` for 2xx statuses.
	pub fn ok(&self) -> bool {
		(200..300).contains(&self.status)
	}

	pub fn json(&self) -> &Value {
		&self.body
	}

	pub fn into_json(self) -> Value {
		self.body
	}

	/// Deserializes the body into `T`.
	pub fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
		Ok(serde_json::from_value(self.body.clone())?)
	}

	/// Passes 2xx responses through; anything else becomes [`Error::UnexpectedStatus`].
	pub fn ensure_ok(self) -> Result<Self> {
		if self.ok() {
			Ok(self)
		} else {
			Err(Error::UnexpectedStatus {
				method: self.method.as_str(),
				url: self.url,
				status: self.status,
			})
		}
	}
}

/// HTTP operations available to API calls.
///
/// `path` is resolved against [`base_url`](Self::base_url); absolute URLs are
/// used as given.
#[async_trait]
pub trait ApiContext: Send + Sync {
	fn base_url(&self) -> &str;

	async fn get(&self, path: &str) -> Result<ApiResponse>;

	async fn post(&self, path: &str, body: Value) -> Result<ApiResponse>;
}

/// [`ApiContext`] bound to one base URL with default headers.
#[derive(Debug, Clone)]
pub struct HttpApiContext {
	client: reqwest::Client,
	base_url: Url,
}

impl HttpApiContext {
	pub fn builder(base_url: &str) -> HttpApiContextBuilder {
		HttpApiContextBuilder {
			base_url: base_url.to_string(),
			headers: Vec::new(),
			timeout: None,
			user_agent: concat!("screenplay/", env!("CARGO_PKG_VERSION")).to_string(),
		}
	}

	/// Absolute URLs pass through; anything else is appended to the base
	/// path so a base such as `https://host/api/v3` keeps its prefix.
	fn resolve(&self, path: &str) -> Result<Url> {
		match Url::parse(path) {
			Ok(url) => Ok(url),
			Err(url::ParseError::RelativeUrlWithoutBase) => {
				let base = self.base_url.as_str().trim_end_matches('/');
				Ok(Url::parse(&format!("{base}/{}", path.trim_start_matches('/')))?)
			}
			Err(err) => Err(err.into()),
		}
	}

	async fn send(&self, method: Method, url: Url, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
		debug!(target: "screenplay", %method, %url, "api request");
		let response = request.send().await?;
		let status = response.status().as_u16();
		let text = response.text().await?;
		debug!(target: "screenplay", %method, %url, status, "api response");
		Ok(ApiResponse::from_text(method, url.as_str(), status, &text))
	}
}

#[async_trait]
impl ApiContext for HttpApiContext {
	fn base_url(&self) -> &str {
		self.base_url.as_str()
	}

	async fn get(&self, path: &str) -> Result<ApiResponse> {
		let url = self.resolve(path)?;
		let request = self.client.get(url.clone());
		self.send(Method::Get, url, request).await
	}

	async fn post(&self, path: &str, body: Value) -> Result<ApiResponse> {
		let url = self.resolve(path)?;
		let request = self.client.post(url.clone()).json(&body);
		self.send(Method::Post, url, request).await
	}
}

/// Builder for [`HttpApiContext`].
#[derive(Debug, Clone)]
pub struct HttpApiContextBuilder {
	base_url: String,
	headers: Vec<(String, String)>,
	timeout: Option<Duration>,
	user_agent: String,
}

impl HttpApiContextBuilder {
	/// Adds a header sent with every request.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	pub fn accept(self, media_type: impl Into<String>) -> Self {
		self.header(ACCEPT.as_str(), media_type)
	}

	/// `Authorization: token <token>`
	pub fn token(self, token: &str) -> Self {
		self.header(AUTHORIZATION.as_str(), format!("token {token}"))
	}

	/// `Authorization: Bearer <token>`
	pub fn bearer(self, token: &str) -> Self {
		self.header(AUTHORIZATION.as_str(), format!("Bearer {token}"))
	}

	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();
		self
	}

	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	pub fn build(self) -> Result<HttpApiContext> {
		let base_url = Url::parse(&self.base_url)?;
		if base_url.cannot_be_a_base() {
			return Err(Error::InvalidArgument(format!("'{base_url}' cannot be used as a base URL")));
		}

		let mut headers = HeaderMap::new();
		for (name, value) in &self.headers {
			let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidArgument(format!("header name '{name}': {e}")))?;
			let mut value = HeaderValue::from_str(value).map_err(|e| Error::InvalidArgument(format!("header '{name}': {e}")))?;
			if name == AUTHORIZATION {
				value.set_sensitive(true);
			}
			headers.insert(name, value);
		}
		let user_agent = HeaderValue::from_str(&self.user_agent).map_err(|e| Error::InvalidArgument(format!("user agent: {e}")))?;
		headers.insert(USER_AGENT, user_agent);

		let mut client = reqwest::Client::builder().default_headers(headers);
		if let Some(timeout) = self.timeout {
			client = client.timeout(timeout);
		}

		Ok(HttpApiContext {
			client: client.build()?,
			base_url,
		})
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn from_text_parses_json_and_keeps_other_bodies() {
		let json = ApiResponse::from_text(Method::Get, "https://api.test/cards/1", 200, r#"{"id": 1}"#);
		assert_eq!(json.json(), &json!({ "id": 1 }));

		let empty = ApiResponse::from_text(Method::Post, "https://api.test/x", 204, "  ");
		assert_eq!(empty.json(), &Value::Null);

		let html = ApiResponse::from_text(Method::Get, "https://api.test/x", 502, "<html>bad gateway</html>");
		assert_eq!(html.json(), &json!("<html>bad gateway</html>"));
	}

	#[test]
	fn ensure_ok_rejects_non_2xx() {
		let created = ApiResponse::new(Method::Post, "https://api.test/cards", 201, json!({}));
		assert!(created.clone().ensure_ok().is_ok());

		let err = ApiResponse::new(Method::Get, "https://api.test/cards/9", 404, Value::Null).ensure_ok().unwrap_err();
		match err {
			Error::UnexpectedStatus { method, url, status } => {
				assert_eq!(method, "GET");
				assert_eq!(url, "https://api.test/cards/9");
				assert_eq!(status, 404);
			}
			other => panic!("expected unexpected status, got {other:?}"),
		}
	}

	#[test]
	fn builder_resolves_relative_and_absolute_paths() {
		let context = HttpApiContext::builder("https://api.github.com")
			.accept("application/vnd.github.v3+json")
			.token("secret")
			.build()
			.unwrap();

		assert_eq!(context.base_url(), "https://api.github.com/");
		assert_eq!(
			context.resolve("/projects/columns/cards/7").unwrap().as_str(),
			"https://api.github.com/projects/columns/cards/7"
		);
		assert_eq!(
			context.resolve("https://api.github.com/projects/1/columns").unwrap().as_str(),
			"https://api.github.com/projects/1/columns"
		);
	}

	#[test]
	fn resolve_keeps_the_base_path_prefix() {
		let enterprise = HttpApiContext::builder("https://ghe.example.com/api/v3").build().unwrap();
		assert_eq!(
			enterprise.resolve("/users/octocat/projects").unwrap().as_str(),
			"https://ghe.example.com/api/v3/users/octocat/projects"
		);
		assert_eq!(
			enterprise.resolve("projects/columns/cards/7").unwrap().as_str(),
			"https://ghe.example.com/api/v3/projects/columns/cards/7"
		);

		let trailing = HttpApiContext::builder("https://ghe.example.com/api/v3/").build().unwrap();
		assert_eq!(
			trailing.resolve("/users/octocat/projects").unwrap().as_str(),
			"https://ghe.example.com/api/v3/users/octocat/projects"
		);
		assert_eq!(
			trailing.resolve("https://ghe.example.com/api/v3/projects/1/columns").unwrap().as_str(),
			"https://ghe.example.com/api/v3/projects/1/columns"
		);
	}

	#[test]
	fn builder_rejects_bad_input() {
		assert!(matches!(HttpApiContext::builder("not a url").build(), Err(Error::InvalidUrl(_))));
		assert!(matches!(
			HttpApiContext::builder("mailto:someone@example.com").build(),
			Err(Error::InvalidArgument(_))
		));
		assert!(matches!(
			HttpApiContext::builder("https://api.test").header("bad header", "x").build(),
			Err(Error::InvalidArgument(_))
		));
	}
}
