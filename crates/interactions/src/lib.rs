//! Interaction libraries built on the `screenplay` core.
//!
//! - [`duckduckgo`]: search the DuckDuckGo home page and verify results (UI only).
//! - [`github`]: GitHub classic project boards, through the REST API and the web UI.
//!
//! Every task and question here is a plain value. Build one with the
//! lowercase constructor functions and hand it to an [`Actor`](screenplay::Actor):
//!
//! ```ignore
//! use screenplay_interactions::duckduckgo::*;
//!
//! actor.attempts_to((load_home_page(), search_for("panda"))).await?;
//! actor.attempts_to(verify_result_link_titles_contain("panda")).await?;
//! ```

pub mod duckduckgo;
pub mod github;
