use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	/// A required setting was given neither as a flag nor in the environment.
	#[error("`{0}` is not set")]
	MissingSetting(&'static str),

	/// Scenarios ran to completion but some of them failed.
	#[error("{failed} of {total} scenario(s) failed")]
	ScenariosFailed { failed: usize, total: usize },

	#[error(transparent)]
	Screenplay(#[from] screenplay::Error),
}

impl CliError {
	/// Whether the failure was already reported scenario by scenario.
	pub fn is_reported(&self) -> bool {
		matches!(self, CliError::ScenariosFailed { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_setting_names_the_variable() {
		assert_eq!(CliError::MissingSetting("GITHUB_ACCESS_TOKEN").to_string(), "`GITHUB_ACCESS_TOKEN` is not set");
	}

	#[test]
	fn screenplay_errors_pass_through() {
		let err: CliError = screenplay::Error::assertion("nope").into();
		assert_eq!(err.to_string(), "assertion failed: nope");
		assert!(!err.is_reported());
	}
}
