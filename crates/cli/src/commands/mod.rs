//! Subcommand execution. Each subcommand runs one or more scenarios into a
//! [`Report`](crate::report::Report) and fails if any scenario failed.

pub mod github;
pub mod search;

use crate::cli::{Cli, Commands};
use crate::error::Result;

pub async fn dispatch(cli: Cli) -> Result<()> {
	match cli.command {
		Commands::Search(args) => search::run(&cli.browser, &args).await,
		Commands::GitHub(args) => github::run(&cli.browser, &args).await,
	}
}
