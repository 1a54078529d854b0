use clap::Parser;
use colored::Colorize;
use screenplay_cli::{cli::Cli, commands, logging};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = commands::dispatch(cli).await {
		// Failed scenarios have already printed their own FAIL lines
		if !err.is_reported() {
			eprintln!("{} {err}", "error:".red().bold());
		}
		std::process::exit(1);
	}
}
