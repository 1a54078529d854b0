
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use screenplay::webdriver::DEFAULT_ENDPOINT;
use screenplay::{WaitOptions, WebDriverBrowser, WebDriverConfig};
use screenplay_interactions::github::API_URL;

use crate::styles::cli_styles;

/// Root CLI for the screenplay scenario runner.
#[derive(Parser, Debug)]
#[command(name = "screenplay")]
#[command(about = "Run screenplay end-to-end scenarios against DuckDuckGo and GitHub")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v screenplay steps, -vv everything)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	#[command(flatten)]
	pub browser: BrowserArgs,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Search DuckDuckGo for each phrase and verify the results.
	Search(SearchArgs),
	/// Exercise a GitHub project board through the API and the web UI.
	#[command(name = "github")]
	GitHub(GitHubArgs),
}

/// Browser type for UI scenarios
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BrowserKind {
	/// Google Chrome through chromedriver
	#[default]
	Chrome,
	/// Mozilla Firefox through geckodriver
	Firefox,
}

impl From<BrowserKind> for WebDriverBrowser {
	fn from(kind: BrowserKind) -> Self {
		match kind {
			BrowserKind::Chrome => WebDriverBrowser::Chrome,
			BrowserKind::Firefox => WebDriverBrowser::Firefox,
		}
	}
}

#[derive(Args, Debug, Clone)]
pub struct BrowserArgs {
	/// WebDriver endpoint (chromedriver, geckodriver or a Selenium server)
	#[arg(long, global = true, env = "WEBDRIVER_URL", value_name = "URL", default_value = DEFAULT_ENDPOINT)]
	pub webdriver_url: String,

	#[arg(long, global = true, value_enum, default_value_t = BrowserKind::Chrome)]
	pub browser: BrowserKind,

	/// Show the browser window instead of running headless
	#[arg(long, global = true)]
	pub headed: bool,

	/// Upper bound for every wait and verification
	#[arg(long, global = true, value_name = "MS", default_value_t = 30_000)]
	pub timeout_ms: u64,
}

impl BrowserArgs {
	pub fn wait_options(&self) -> WaitOptions {
		WaitOptions::default().with_timeout(Duration::from_millis(self.timeout_ms))
	}

	pub fn webdriver_config(&self) -> WebDriverConfig {
		WebDriverConfig {
			endpoint: self.webdriver_url.clone(),
			browser: self.browser.into(),
			headless: !self.headed,
			wait: self.wait_options(),
		}
	}
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
	/// Phrases to search for; defaults to a list of ten animals
	#[arg(value_name = "PHRASE")]
	pub phrases: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct GitHubArgs {
	#[arg(long, env = "GITHUB_USERNAME", value_name = "USER")]
	pub username: Option<String>,

	/// Only needed by scenarios that log in through the web UI
	#[arg(long, env = "GITHUB_PASSWORD", hide_env_values = true)]
	pub password: Option<String>,

	/// Personal access token for the REST API
	#[arg(long, env = "GITHUB_ACCESS_TOKEN", hide_env_values = true)]
	pub token: Option<String>,

	/// Name of the classic project board to work on
	#[arg(long = "project", env = "GITHUB_PROJECT_NAME", value_name = "NAME")]
	pub project_name: Option<String>,

	#[arg(long, env = "GITHUB_API_URL", value_name = "URL", default_value = API_URL)]
	pub api_url: String,

	#[command(subcommand)]
	pub action: GitHubAction,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitHubAction {
	/// Create a card through the API and read it back.
	CreateCard,
	/// Create a card through the API, drag it to the next column in the web UI, then check the API agrees.
	MoveCard,
}
