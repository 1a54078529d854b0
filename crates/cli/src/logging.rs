use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Directive used when `RUST_LOG` is unset.
pub fn default_filter(verbosity: u8) -> &'static str {
	// 0 = warnings only; scenario results go to stdout regardless
	// 1 (-v) = actor steps, WebDriver commands and API requests
	// 2+ (-vv) = debug for everything, including reqwest/hyper
	match verbosity {
		0 => "warn",
		1 => "warn,screenplay=debug,screenplay_cli=debug",
		_ => "debug",
	}
}

pub fn init_logging(verbosity: u8) {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.compact()
		.init();
}
