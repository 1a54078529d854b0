//! screenplay: Actors, abilities, tasks and questions for end-to-end tests
//!
//! Test code talks to a single [`Actor`]. The actor holds typed abilities
//! (a browser page, an HTTP context) and performs [`Task`]s or asks
//! [`Question`]s that pull whatever ability they need at execution time.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use screenplay::{Actor, BrowseTheWeb, WebDriverConfig, WebDriverPage};
//!
//! #[tokio::main]
//! async fn main() -> screenplay::Result<()> {
//!     let page = Arc::new(WebDriverPage::connect(WebDriverConfig::default()).await?);
//!     let actor = Actor::named("Searcher").with_ability::<BrowseTheWeb>(page.clone())?;
//!
//!     actor.attempts_to(load_home_page()).await?;
//!     let titles = actor.asks_for(result_link_titles()).await?;
//!     assert!(!titles.is_empty());
//!
//!     page.close().await
//! }
//! ```
//!
//! # Layers
//!
//! ```text
//! ┌──────────────────┐
//! │  interactions    │  Tasks / Questions for a concrete application
//! └────────┬─────────┘
//!          │ attempts_to / asks_for / calls
//! ┌────────▼─────────┐
//! │      Actor       │  Ability registry, sequencing
//! └────────┬─────────┘
//!          │ ability::<C>()
//! ┌────────▼─────────┐
//! │    abilities     │  PageAbility (WebDriver), ApiContext (reqwest)
//! └──────────────────┘
//! ```

pub mod ability;
pub mod actor;
pub mod api;
pub mod error;
pub mod interaction;
pub mod page;
pub mod testing;
pub mod wait;
pub mod webdriver;

pub use ability::{Abilities, BrowseTheWeb, CallAnApi, Capability};
pub use actor::Actor;
pub use api::{ApiContext, ApiResponse, HttpApiContext, HttpApiContextBuilder, Method};
pub use error::{Error, Result};
pub use interaction::{Question, Task};
pub use page::{PageAbility, Selector};
pub use wait::WaitOptions;
pub use webdriver::{WebDriverBrowser, WebDriverConfig, WebDriverPage};
